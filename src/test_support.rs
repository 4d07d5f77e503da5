//! In-process stand-ins for the Vision and Graph APIs.

use std::collections::HashMap;

use axum::{
    extract::{DefaultBodyLimit, Query},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::mpsc};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub query: HashMap<String, String>,
    pub body: Value,
}

pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Upstream that records every POST to `path` and answers with `status`/`reply`.
pub async fn recording_upstream(
    path: &str,
    status: StatusCode,
    reply: Value,
) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
    recording_upstream_with(path, move |_| (status, reply.clone())).await
}

/// Like [`recording_upstream`], but the reply is computed from the request body.
pub async fn recording_upstream_with<F>(
    path: &str,
    respond: F,
) -> (String, mpsc::UnboundedReceiver<CapturedRequest>)
where
    F: Fn(&Value) -> (StatusCode, Value) + Clone + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    let handler = move |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| {
        let tx = tx.clone();
        let respond = respond.clone();
        async move {
            let (status, reply) = respond(&body);
            let _ = tx.send(CapturedRequest { query, body });
            (status, Json(reply))
        }
    };

    let router = Router::new().route(path, post(handler).layer(DefaultBodyLimit::disable()));
    let base = spawn_upstream(router).await;
    (format!("{base}{path}"), rx)
}

/// A URL nothing listens on, for transport-failure paths.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/unreachable")
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<CapturedRequest>) -> Vec<CapturedRequest> {
    let mut out = Vec::new();
    while let Ok(req) = rx.try_recv() {
        out.push(req);
    }
    out
}
