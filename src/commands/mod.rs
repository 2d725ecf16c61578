pub mod admin;
pub mod auth;
pub mod chapters;
pub mod comments;
pub mod config;
pub mod folders;
pub mod novels;
pub mod reviews;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::infra::api::{ApiClient, FileTokenStore, MemoryTokenStore, TokenStore};
use crate::shared::cache;
use crate::shared::config::Config;

/// What every backend-facing command needs.
pub struct AppContext {
    pub client: ApiClient,
    pub config: Config,
}

impl AppContext {
    /// Build the client from config. `ephemeral` keeps tokens in memory only.
    pub fn new(config: Config, ephemeral: bool) -> anyhow::Result<Self> {
        let store: Arc<dyn TokenStore> = if ephemeral {
            Arc::new(MemoryTokenStore::new())
        } else {
            let path = cache::session_file()
                .context("Could not determine the cache directory for the session file")?;
            let store = FileTokenStore::new(path);
            tracing::debug!(path = %store.path().display(), "session file");
            Arc::new(store)
        };

        let client = ApiClient::builder(config.api.base_url.clone())
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .refresh_trigger(config.api.refresh_trigger)
            .token_store(store)
            .build()
            .context("Failed to set up the API client")?;

        Ok(Self { client, config })
    }

    /// Use `token` for this process only. The token store is not touched.
    pub fn with_access_token(self, token: Option<String>) -> Self {
        if token.is_some() {
            tracing::debug!("using access token from NOVELHUB_TOKEN");
            self.client.set_access_token(token);
        }
        self
    }
}
