use serde::{Deserialize, Serialize};

/// Body of `POST /analyze-image`, echoed back unchanged on success.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImagePayload {
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
