/// Backend client: the single point of contact with the interview backend.
///
/// Handlers never build outbound requests themselves. Every call goes through
/// `BackendClient`, which decides whether a reply is decoded or relayed untouched.
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Backend did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Backend returned a non-JSON body (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Backend returned an invalid status code: {0}")]
    InvalidStatus(u16),
}

/// Outcome of one backend call that produced an HTTP response.
#[derive(Debug)]
pub enum BackendReply<T> {
    /// 2xx reply, decoded into the backend's response shape.
    Success(T),
    /// Non-2xx reply, passed back to the caller as-is.
    Relay(RelayedResponse),
}

/// A backend error reply. The body is only checked to be JSON and is otherwise
/// kept as the exact bytes the backend sent.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            self.body,
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POSTs `body` as JSON to `path`.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        request_id: Option<&str>,
    ) -> Result<BackendReply<T>, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.endpoint(path)).json(body);
        self.send(path, request, request_id).await
    }

    /// POSTs an already-encoded body to `path` without touching it.
    /// `content_type` must be the caller's original header value, boundary included.
    pub async fn post_raw<T>(
        &self,
        path: &str,
        content_type: &str,
        body: Bytes,
        request_id: Option<&str>,
    ) -> Result<BackendReply<T>, BackendError>
    where
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.endpoint(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        self.send(path, request, request_id).await
    }

    async fn send<T>(
        &self,
        path: &str,
        request: RequestBuilder,
        request_id: Option<&str>,
    ) -> Result<BackendReply<T>, BackendError>
    where
        T: DeserializeOwned,
    {
        let mut request = request.header(reqwest::header::CACHE_CONTROL, "no-store");
        if let Some(id) = request_id {
            request = request.header(REQUEST_ID_HEADER, id);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        debug!("Backend {path} replied {status} ({} bytes)", body.len());

        let reply = decode_reply(status, body)?;
        if let BackendReply::Relay(relayed) = &reply {
            warn!("Relaying backend {path} error status {}", relayed.status);
        }
        Ok(reply)
    }

    fn classify(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Transport(err)
        }
    }
}

/// Splits a raw backend reply into a decoded success or an opaque relay.
fn decode_reply<T>(status: u16, body: Bytes) -> Result<BackendReply<T>, BackendError>
where
    T: DeserializeOwned,
{
    let status_code =
        StatusCode::from_u16(status).map_err(|_| BackendError::InvalidStatus(status))?;

    if status_code.is_success() {
        let decoded = serde_json::from_slice(&body)
            .map_err(|source| BackendError::Decode { status, source })?;
        return Ok(BackendReply::Success(decoded));
    }

    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|source| BackendError::Decode { status, source })?;

    Ok(BackendReply::Relay(RelayedResponse {
        status: status_code,
        body,
    }))
}
