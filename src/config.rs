use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_VISION_API_URL: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_MESSENGER_API_URL: &str = "https://graph.facebook.com/v3.2/me/messages";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Page-scoped ids of the people who get the alert when `RECIPIENT_IDS` is unset.
pub const DEFAULT_RECIPIENT_IDS: [&str; 5] = [
    "3164926763533661",
    "2261957987199163",
    "2588420581185410",
    "2183290295081563",
    "2172166666192906",
];

/// Process configuration, read once at startup.
///
/// Values come from the environment; a `.env` file in the working directory is
/// honoured through `dotenvy`. Required keys:
/// - `VISION_API_KEY`
/// - `FB_PAGE_ACCESS_TOKEN`
///
/// Optional keys: `RECIPIENT_IDS` (comma-separated), `BIND_ADDR`,
/// `VISION_API_URL`, `MESSENGER_API_URL`, `HTTP_TIMEOUT_SECS`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub vision_api_key: String,
    pub vision_api_url: String,
    pub page_access_token: String,
    pub messenger_api_url: String,
    pub recipient_ids: Vec<String>,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} must be set"))
        };

        let vision_api_key = required("VISION_API_KEY")?;
        let page_access_token = required("FB_PAGE_ACCESS_TOKEN")?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        let recipient_ids = match lookup("RECIPIENT_IDS") {
            Some(raw) => parse_recipient_ids(&raw),
            None => DEFAULT_RECIPIENT_IDS.iter().map(|id| id.to_string()).collect(),
        };
        if recipient_ids.is_empty() {
            bail!("RECIPIENT_IDS must name at least one recipient");
        }

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            vision_api_key,
            vision_api_url: lookup("VISION_API_URL")
                .unwrap_or_else(|| DEFAULT_VISION_API_URL.to_string()),
            page_access_token,
            messenger_api_url: lookup("MESSENGER_API_URL")
                .unwrap_or_else(|| DEFAULT_MESSENGER_API_URL.to_string()),
            recipient_ids,
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}

fn parse_recipient_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
