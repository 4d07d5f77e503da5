use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    analysis::AnalysisService, broadcast::Broadcaster, config::AppConfig,
    messenger::MessengerClient, vision::VisionClient,
};

pub mod handlers;
pub mod types;

#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("failed to build HTTP client")?;

        let vision = VisionClient::new(
            http.clone(),
            config.vision_api_url.clone(),
            config.vision_api_key.clone(),
        );
        let messenger = MessengerClient::new(
            http,
            config.messenger_api_url.clone(),
            config.page_access_token.clone(),
        );
        let broadcaster = Broadcaster::new(messenger, config.recipient_ids.clone());

        Ok(Self {
            analysis: Arc::new(AnalysisService::new(vision, broadcaster)),
        })
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/analyze-image",
            post(handlers::analyze_image).layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(handlers::health))
}

/// Routes plus the HTTP layers, ready to serve.
pub fn app(state: AppState) -> Router {
    router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}
