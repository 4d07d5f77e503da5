use std::{fmt, sync::Arc};

use anyhow::{anyhow, Result};
use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tracing::{error, info, warn, Instrument};

use crate::messenger::{MessengerClient, SendReceipt};

#[derive(Debug)]
pub struct DeliveryReport {
    pub recipient_id: String,
    pub outcome: Result<SendReceipt>,
}

impl fmt::Display for DeliveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(receipt) if receipt.is_success() => {
                write!(f, "{}: delivered ({})", self.recipient_id, receipt.status)
            }
            Ok(receipt) => write!(
                f,
                "{}: rejected ({}) {}",
                self.recipient_id, receipt.status, receipt.body
            ),
            Err(err) => write!(f, "{}: failed: {err:#}", self.recipient_id),
        }
    }
}

/// Per-recipient outcomes, in recipient-list order.
#[derive(Debug, Default)]
pub struct BroadcastReport {
    pub deliveries: Vec<DeliveryReport>,
}

impl BroadcastReport {
    pub fn delivered(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|d| matches!(&d.outcome, Ok(r) if r.is_success()))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|d| matches!(&d.outcome, Ok(r) if !r.is_success()))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.deliveries.iter().filter(|d| d.outcome.is_err()).count()
    }
}

/// Fans one message out to a fixed recipient list.
#[derive(Clone)]
pub struct Broadcaster {
    messenger: MessengerClient,
    recipients: Arc<[String]>,
}

impl Broadcaster {
    pub fn new(messenger: MessengerClient, recipients: Vec<String>) -> Self {
        Self {
            messenger,
            recipients: recipients.into(),
        }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Starts one send task per recipient and returns right away.
    ///
    /// The returned handle resolves once every send has finished. Dropping it
    /// does not cancel anything; the report is still logged.
    pub fn broadcast(&self, message: String) -> JoinHandle<BroadcastReport> {
        let message: Arc<str> = message.into();

        let sends: Vec<_> = self
            .recipients
            .iter()
            .map(|recipient_id| {
                let messenger = self.messenger.clone();
                let message = message.clone();
                let id = recipient_id.clone();
                let task = tokio::spawn(
                    async move { messenger.send(&message, &id).await }.in_current_span(),
                );
                (recipient_id.clone(), task)
            })
            .collect();

        tokio::spawn(
            async move {
                let (ids, tasks): (Vec<_>, Vec<_>) = sends.into_iter().unzip();
                let results = join_all(tasks).await;

                let deliveries = ids
                    .into_iter()
                    .zip(results)
                    .map(|(recipient_id, joined)| {
                        let outcome = match joined {
                            Ok(outcome) => outcome,
                            Err(err) => Err(anyhow!("send task aborted: {err}")),
                        };
                        let delivery = DeliveryReport {
                            recipient_id,
                            outcome,
                        };
                        match &delivery.outcome {
                            Ok(r) if r.is_success() => info!(%delivery, "delivery"),
                            Ok(_) => warn!(%delivery, "delivery"),
                            Err(_) => error!(%delivery, "delivery"),
                        }
                        delivery
                    })
                    .collect();

                let report = BroadcastReport { deliveries };
                info!(
                    delivered = report.delivered(),
                    rejected = report.rejected(),
                    failed = report.failed(),
                    "broadcast finished"
                );
                report
            }
            .in_current_span(),
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::test_support::{closed_port_url, drain, recording_upstream, recording_upstream_with};

    fn recipients() -> Vec<String> {
        ["a1", "b2", "c3", "d4", "e5"].iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn one_send_per_recipient_with_identical_text() {
        let (url, mut rx) =
            recording_upstream("/messages", StatusCode::OK, json!({ "message_id": "m" })).await;
        let broadcaster = Broadcaster::new(
            MessengerClient::new(reqwest::Client::new(), url, "token"),
            recipients(),
        );

        let report = broadcaster.broadcast("Violence : LIKELY\n\n".into()).await.unwrap();

        assert_eq!(report.delivered(), 5);
        let ids: Vec<_> = report.deliveries.iter().map(|d| d.recipient_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2", "c3", "d4", "e5"]);

        let captured = drain(&mut rx);
        assert_eq!(captured.len(), 5);
        let mut sent_to: Vec<_> = captured
            .iter()
            .map(|c| c.body["recipient"]["id"].as_str().unwrap().to_string())
            .collect();
        sent_to.sort();
        assert_eq!(sent_to, recipients());
        assert!(captured
            .iter()
            .all(|c| c.body["message"]["text"] == "Violence : LIKELY\n\n"));
    }

    #[tokio::test]
    async fn empty_message_still_fans_out() {
        let (url, mut rx) = recording_upstream("/messages", StatusCode::OK, json!({})).await;
        let broadcaster = Broadcaster::new(
            MessengerClient::new(reqwest::Client::new(), url, "token"),
            recipients(),
        );

        broadcaster.broadcast(String::new()).await.unwrap();

        let captured = drain(&mut rx);
        assert_eq!(captured.len(), 5);
        assert!(captured.iter().all(|c| c.body["message"]["text"] == ""));
    }

    #[tokio::test]
    async fn rejection_for_one_recipient_does_not_affect_others() {
        let (url, _rx) = recording_upstream_with("/messages", |body| {
            if body["recipient"]["id"] == "c3" {
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": { "message": "No matching user found" } }),
                )
            } else {
                (StatusCode::OK, json!({ "message_id": "m" }))
            }
        })
        .await;
        let broadcaster = Broadcaster::new(
            MessengerClient::new(reqwest::Client::new(), url, "token"),
            recipients(),
        );

        let report = broadcaster.broadcast("hi".into()).await.unwrap();

        assert_eq!(report.delivered(), 4);
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.failed(), 0);
        let rejected = &report.deliveries[2];
        assert_eq!(rejected.recipient_id, "c3");
        assert_eq!(rejected.outcome.as_ref().unwrap().status, 400);

        assert_eq!(report.deliveries[0].to_string(), "a1: delivered (200)");
        let line = rejected.to_string();
        assert!(line.starts_with("c3: rejected (400)"));
        assert!(line.contains("No matching user found"));
    }

    #[tokio::test]
    async fn transport_failures_are_collected_not_fatal() {
        let broadcaster = Broadcaster::new(
            MessengerClient::new(reqwest::Client::new(), closed_port_url().await, "token"),
            recipients(),
        );

        let report = broadcaster.broadcast("hi".into()).await.unwrap();

        assert_eq!(report.failed(), 5);
        assert_eq!(report.delivered(), 0);
        assert!(report.deliveries[3].to_string().starts_with("d4: failed: send to d4 failed"));
    }
}
