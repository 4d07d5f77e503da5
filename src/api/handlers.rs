use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use tracing::{error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::{
    types::{ErrorResponse, HealthResponse, ImagePayload},
    AppState,
};

pub const INVALID_PAYLOAD: &str = "Invalid request payload";

pub async fn analyze_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImagePayload>, (StatusCode, Json<ErrorResponse>)> {
    // The body is decoded whatever the Content-Type header says.
    let payload: ImagePayload = serde_json::from_slice(&body).map_err(|err| {
        warn!("rejected analyze-image body: {err}");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: INVALID_PAYLOAD.into(),
            }),
        )
    })?;

    let request_id = Uuid::new_v4();
    let span = info_span!("analyze_image", %request_id);

    // Only the annotation call is awaited; sends outlive this request.
    if let Err(err) = state.analysis.analyze(&payload.image).instrument(span).await {
        error!(%request_id, "analysis failed: {err:#}");
    }

    Ok(Json(payload))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
