use anyhow::{Context, Result};
use tracing::{info, warn};

pub mod types;

pub use types::{SendMessageRequest, SendReceipt};

/// Client for the Graph API Send endpoint (`me/messages`).
#[derive(Clone)]
pub struct MessengerClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl MessengerClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        }
    }

    pub async fn send(&self, message: &str, recipient_id: &str) -> Result<SendReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&SendMessageRequest::response(recipient_id, message))
            .send()
            .await
            .with_context(|| format!("send to {recipient_id} failed"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("reading send response for {recipient_id} failed"))?;

        let receipt = SendReceipt { status, body };
        if receipt.is_success() {
            info!(recipient_id, status, body = %receipt.body, "message sent");
        } else {
            warn!(recipient_id, status, body = %receipt.body, "send api rejected message");
        }

        Ok(receipt)
    }
}
