use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, request::Parts, HeaderMap},
    response::Response,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::proxy::models::{BackendUploadResponse, UploadResponse};
use crate::proxy::{into_proxy_response, request_id};
use crate::state::AppState;

pub const FILE_REQUIRED: &str = "PDF file is required";
const FILE_FIELD: &str = "file";

/// POST /api/upload
///
/// The multipart body is buffered once, inspected on a copy, and the original
/// bytes are forwarded with the caller's `Content-Type` so the boundary stays valid.
pub async fn handle_upload(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let limit = state.config.max_upload_bytes;
    let (parts, body) = request.into_parts();

    enforce_content_length(&parts.headers, limit)?;
    let payload = axum::body::to_bytes(body, limit).await.map_err(|e| {
        if e.to_string().contains("length limit") {
            AppError::PayloadTooLarge(limit)
        } else {
            AppError::Internal(anyhow::anyhow!("Failed to buffer upload body: {e}"))
        }
    })?;

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or(AppError::Validation(FILE_REQUIRED))?;
    let request_id = request_id(&parts.headers).map(str::to_owned);

    if !has_file_part(parts, payload.clone()).await {
        return Err(AppError::Validation(FILE_REQUIRED));
    }

    info!("Forwarding {} byte resume upload", payload.len());
    let reply = state
        .backend
        .post_raw::<BackendUploadResponse>(
            "/upload",
            &content_type,
            payload,
            request_id.as_deref(),
        )
        .await?;

    Ok(into_proxy_response::<_, UploadResponse>(reply))
}

/// Rejects bodies whose declared length is already over the limit.
fn enforce_content_length(headers: &HeaderMap, limit: usize) -> Result<(), AppError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.parse::<usize>().ok());

    match declared {
        Some(length) if length > limit => Err(AppError::PayloadTooLarge(limit)),
        _ => Ok(()),
    }
}

/// True when the first part named `file` is a file part (it carries a filename).
/// A plain text value under that name does not count, and neither does a body
/// that is not multipart at all.
async fn has_file_part(parts: Parts, payload: Bytes) -> bool {
    let probe = Request::from_parts(parts, Body::from(payload));
    let Ok(mut multipart) = Multipart::from_request(probe, &()).await else {
        return false;
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => {
                return field.file_name().is_some();
            }
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => return false,
        }
    }
}
