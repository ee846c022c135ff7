pub mod chat;
pub mod models;
pub mod upload;

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::{BackendReply, REQUEST_ID_HEADER};

/// Turns a backend reply into the browser-facing response: successes are
/// translated into `R` and returned as 200, everything else is relayed.
fn into_proxy_response<B, R>(reply: BackendReply<B>) -> Response
where
    R: From<B> + Serialize,
{
    match reply {
        BackendReply::Success(body) => Json(R::from(body)).into_response(),
        BackendReply::Relay(relayed) => relayed.into_response(),
    }
}

fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}
