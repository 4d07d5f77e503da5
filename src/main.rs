use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod analysis;
mod api;
mod broadcast;
mod config;
mod messenger;
#[cfg(test)]
mod test_support;
mod vision;

use api::AppState;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // -----------------------------
    // Config / Dependencies
    // -----------------------------
    let config = AppConfig::from_env().context("invalid configuration")?;
    let state = AppState::from_config(&config)?;

    info!(
        recipients = config.recipient_ids.len(),
        vision = %config.vision_api_url,
        messenger = %config.messenger_api_url,
        "starting vision alert server"
    );

    // -----------------------------
    // Router
    // -----------------------------
    let app = api::app(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("server running at http://{}", config.bind_addr);
    info!("analyze endpoint at POST http://{}/analyze-image", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
