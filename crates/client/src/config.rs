//! Client configuration and builder

use std::sync::Arc;
use std::time::Duration;

use causeway_core::{ApiError, ApiResult, validation};
use url::Url;

use crate::auth::{MemoryStore, StateStore};
use crate::client::Client;
use crate::upload::ObjectStore;

/// Per-request timeout unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How long before expiry the proactive refresh fires
pub const DEFAULT_REFRESH_THRESHOLD: Duration = Duration::from_secs(5 * 60);

/// Storage slots for persisted auth state
#[derive(Debug, Clone)]
pub struct StorageKeys {
    pub token: String,
    pub refresh_token: String,
    pub user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "causeway_token".to_string(),
            refresh_token: "causeway_refresh_token".to_string(),
            user: "causeway_user".to_string(),
        }
    }
}

/// Resolved configuration a [`Client`] is built from
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    pub refresh_threshold: Duration,
    pub user_agent: String,
    pub keys: StorageKeys,
}

/// Builder for [`Client`]
pub struct ClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    refresh_threshold: Option<Duration>,
    user_agent: Option<String>,
    keys: StorageKeys,
    store: Option<Arc<dyn StateStore>>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl ClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            endpoint: None,
            timeout: None,
            refresh_threshold: None,
            user_agent: None,
            keys: StorageKeys::default(),
            store: None,
            object_store: None,
        }
    }

    /// Set the backend endpoint URL
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how long before token expiry the proactive refresh fires
    pub fn refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = Some(threshold);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Override the storage keys auth state is persisted under
    pub fn storage_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Plug in persistent client-side storage; defaults to in-memory
    pub fn state_store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Plug in an object-storage collaborator for media uploads; without
    /// one, uploads fall back to the backend's own `uploadMedia` action
    pub fn object_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(store);
        self
    }

    /// Build the client
    pub fn build(self) -> ApiResult<Client> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| ApiError::Configuration("endpoint is required".into()))?;
        let endpoint = validation::validate_endpoint(endpoint.trim_end_matches('/'))?;

        let config = ClientConfig {
            endpoint,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            refresh_threshold: self.refresh_threshold.unwrap_or(DEFAULT_REFRESH_THRESHOLD),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| "causeway-client/0.1.0".to_string()),
            keys: self.keys,
        };

        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::default()));
        Client::from_parts(config, store, self.object_store)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
