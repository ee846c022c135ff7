use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Gateway configuration loaded from environment variables.
/// Every value has a default, so startup only fails on malformed input.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the interview backend, without a trailing slash.
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Browser origin allowed by CORS. `None` means permissive.
    pub frontend_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: normalize_base_url(
                &std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            ),
            backend_timeout: Duration::from_secs(parse_env(
                "BACKEND_TIMEOUT_SECS",
                DEFAULT_BACKEND_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
            port: parse_env("PORT", 3000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration pointing at `backend_url` with every other value defaulted.
    #[cfg(test)]
    pub fn with_backend_url(backend_url: &str) -> Self {
        Config {
            backend_url: normalize_base_url(backend_url),
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            frontend_origin: None,
            port: 3000,
            rust_log: "info".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
