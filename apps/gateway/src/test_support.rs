//! Helpers shared by handler tests: a recording backend and router builders.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use bytes::Bytes;
use serde_json::Value;

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub request_id: Option<String>,
    pub body: Bytes,
}

/// A real HTTP server on an ephemeral port that answers every request with a
/// fixed status and JSON body and records what it received.
pub struct MockBackend {
    pub url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub async fn start(status: u16, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: &'static str, delay: Duration) -> Self {
        let recorded: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();
        let sink = recorded.clone();

        let app = Router::new().fallback(move |request: Request| {
            let sink = sink.clone();
            async move {
                let (parts, incoming) = request.into_parts();
                let received = axum::body::to_bytes(incoming, usize::MAX)
                    .await
                    .unwrap_or_default();
                let header_text = |name: &str| {
                    parts
                        .headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned)
                };
                sink.lock().unwrap().push(RecordedRequest {
                    path: parts.uri.path().to_string(),
                    content_type: header_text(header::CONTENT_TYPE.as_str()),
                    cache_control: header_text(header::CACHE_CONTROL.as_str()),
                    request_id: header_text("x-request-id"),
                    body: received,
                });

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let status = StatusCode::from_u16(status).unwrap();
                let reply: Response =
                    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response();
                reply
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            recorded,
        }
    }

    pub fn hits(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

/// A URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn app_for(backend_url: &str) -> Router {
    app_with(Config::with_backend_url(backend_url))
}

pub fn app_with(config: Config) -> Router {
    build_router(AppState::from_config(config).unwrap())
}

pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
