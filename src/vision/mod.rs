use anyhow::{anyhow, Context, Result};
use tracing::info;

pub mod summary;
pub mod types;

pub use summary::build_summary;
pub use types::{AnnotateRequest, AnnotateResponse, AnnotationResult};

/// Thin client for the Cloud Vision `images:annotate` endpoint.
#[derive(Clone)]
pub struct VisionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Runs web, safe-search and label detection over one base64 image.
    pub async fn annotate(&self, image: &str) -> Result<Vec<AnnotationResult>> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&AnnotateRequest::for_image(image))
            .send()
            .await
            .context("vision annotate request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("vision_error: status {status}: {text}"));
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .context("vision annotate response was not valid JSON")?;

        for result in &parsed.responses {
            info!(
                violence = %result.safe_search_annotation.violence,
                labels = ?result.label_descriptions(),
                "vision annotation"
            );
        }

        Ok(parsed.responses)
    }
}
