use anyhow::Result;

use crate::backend::BackendClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: Config,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let backend = BackendClient::new(config.backend_url.clone(), config.backend_timeout)?;
        Ok(Self { backend, config })
    }
}
