//! Request and response shapes on both sides of the gateway.
//!
//! Browser-facing types use camelCase; backend-facing types use snake_case.
//! Each success reply is translated once with a `From` impl, so every backend
//! field maps to exactly one browser field.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`. Fields stay optional here so that a missing field
/// and an empty one are rejected by the same check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST {BACKEND_URL}/chat`.
#[derive(Debug, Serialize)]
pub struct BackendChatRequest<'a> {
    pub thread_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeTarget {
    pub text: String,
    pub missing: String,
}

#[derive(Debug, Deserialize)]
pub struct BackendChatResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub final_bullet: Option<String>,
    pub status: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub question: Option<String>,
    pub final_bullet: Option<String>,
    pub status: String,
}

impl From<BackendChatResponse> for ChatResponse {
    fn from(reply: BackendChatResponse) -> Self {
        Self {
            question: reply.question,
            final_bullet: reply.final_bullet,
            status: reply.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BackendUploadResponse {
    pub thread_id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub current_target: Option<ResumeTarget>,
    pub status: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub thread_id: String,
    pub question: Option<String>,
    pub current_target: Option<ResumeTarget>,
    pub status: String,
}

impl From<BackendUploadResponse> for UploadResponse {
    fn from(reply: BackendUploadResponse) -> Self {
        Self {
            thread_id: reply.thread_id,
            question: reply.question,
            current_target: reply.current_target,
            status: reply.status,
        }
    }
}
