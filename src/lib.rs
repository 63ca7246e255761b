//! Auth Store
//!
//! Answers whether an API key is currently valid for an account:
//! - Known-valid credentials are served from a bounded LRU cache
//! - Cache misses are checked against a remote identity provider
//! - Only accepted credentials are cached; failures fail closed

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    identity::{HttpClient, RackspaceIdentityProvider},
    key_cache::InMemoryKeyCache,
    services::KeyValidationService,
};
use tracing::info;

/// Create the application state from validated configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = Arc::new(InMemoryKeyCache::with_capacity(config.cache.size));

    let client = HttpClient::with_timeout(config.identity.timeout())?;
    let provider = Arc::new(RackspaceIdentityProvider::with_endpoint(
        client,
        config.identity.endpoint.as_str(),
    ));

    info!(
        cache_size = config.cache.size,
        identity_endpoint = %config.identity.endpoint,
        "Key validation service initialized"
    );

    let service = KeyValidationService::new(cache, provider);

    Ok(AppState::new(Arc::new(service)))
}
