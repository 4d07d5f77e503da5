use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub messaging_type: &'static str,
    pub recipient: Recipient<'a>,
    pub message: MessageBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct Recipient<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MessageBody<'a> {
    pub text: &'a str,
}

impl<'a> SendMessageRequest<'a> {
    /// A plain-text reply; the Send API accepts `RESPONSE` messages inside the 24h window.
    pub fn response(recipient_id: &'a str, text: &'a str) -> Self {
        Self {
            messaging_type: "RESPONSE",
            recipient: Recipient { id: recipient_id },
            message: MessageBody { text },
        }
    }
}

/// What the Send API answered. The body is kept raw and never interpreted.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub status: u16,
    pub body: String,
}

impl SendReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
