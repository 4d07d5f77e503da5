use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::info;

use crate::{
    broadcast::{BroadcastReport, Broadcaster},
    vision::{build_summary, VisionClient},
};

/// Annotate an image, turn the annotations into an alert, send it to everyone.
#[derive(Clone)]
pub struct AnalysisService {
    vision: VisionClient,
    broadcaster: Broadcaster,
}

impl AnalysisService {
    pub fn new(vision: VisionClient, broadcaster: Broadcaster) -> Self {
        Self {
            vision,
            broadcaster,
        }
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Waits for the annotation call only. The returned handle tracks the
    /// broadcast, which keeps running if the handle is dropped.
    pub async fn analyze(&self, image: &str) -> Result<JoinHandle<BroadcastReport>> {
        let results = self
            .vision
            .annotate(image)
            .await
            .context("image annotation failed")?;

        let message = build_summary(&results);
        info!(
            results = results.len(),
            recipients = self.broadcaster.recipients().len(),
            "broadcasting summary"
        );

        Ok(self.broadcaster.broadcast(message))
    }
}
