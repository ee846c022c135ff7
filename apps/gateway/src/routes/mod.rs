pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::proxy::{chat, upload};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/chat", post(chat::handle_chat))
        .route("/api/upload", post(upload::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
