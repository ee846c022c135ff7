use axum::{extract::State, http::HeaderMap, response::Response};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::proxy::models::{BackendChatRequest, BackendChatResponse, ChatRequest, ChatResponse};
use crate::proxy::{into_proxy_response, request_id};
use crate::state::AppState;

pub const CHAT_FIELDS_REQUIRED: &str = "threadId and message are required";

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let (thread_id, message) = parse_chat_request(&body)?;

    info!("Forwarding chat turn for thread {thread_id}");
    let outbound = BackendChatRequest {
        thread_id: &thread_id,
        message: &message,
    };
    let reply = state
        .backend
        .post_json::<_, BackendChatResponse>("/chat", &outbound, request_id(&headers))
        .await?;

    Ok(into_proxy_response::<_, ChatResponse>(reply))
}

/// Accepts a body only when both fields are non-empty strings.
fn parse_chat_request(body: &[u8]) -> Result<(String, String), AppError> {
    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|_| AppError::Validation(CHAT_FIELDS_REQUIRED))?;

    match (request.thread_id, request.message) {
        (Some(thread_id), Some(message)) if !thread_id.is_empty() && !message.is_empty() => {
            Ok((thread_id, message))
        }
        _ => Err(AppError::Validation(CHAT_FIELDS_REQUIRED)),
    }
}
