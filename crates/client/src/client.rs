//! Shared client handle and the refresh-and-retry path

use std::sync::Arc;

use causeway_core::{Action, ApiError, ApiResult, Envelope};
use tokio::sync::watch;
use tracing::debug;

use crate::admin::AdminApi;
use crate::auth::{AuthManager, SessionEvent, StateStore};
use crate::config::{ClientBuilder, ClientConfig};
use crate::public::PublicApi;
use crate::transport::Transport;
use crate::upload::ObjectStore;

/// Handle to the backend; constructed once at application start and
/// passed by reference to callers. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Transport,
    auth: AuthManager,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl Client {
    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        config: ClientConfig,
        store: Arc<dyn StateStore>,
        object_store: Option<Arc<dyn ObjectStore>>,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|err| ApiError::Configuration(err.to_string()))?;
        let transport = Transport::new(http, config.endpoint.clone());
        let auth = AuthManager::new(
            transport.clone(),
            store,
            config.keys.clone(),
            config.refresh_threshold,
        );
        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                auth,
                object_store,
            }),
        })
    }

    /// The authentication manager
    pub fn auth(&self) -> &AuthManager {
        &self.inner.auth
    }

    /// Unauthenticated read surface
    pub fn public(&self) -> PublicApi {
        PublicApi::new(self.clone())
    }

    /// Authenticated admin surface
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.clone())
    }

    /// Subscribe to session lifecycle events; the host decides what a
    /// `SessionExpired` means for navigation
    pub fn session_events(&self) -> watch::Receiver<SessionEvent> {
        self.inner.auth.subscribe()
    }

    pub(crate) fn object_store(&self) -> Option<&Arc<dyn ObjectStore>> {
        self.inner.object_store.as_ref()
    }

    pub(crate) async fn execute_public(
        &self,
        action: Action,
        params: &[(String, String)],
    ) -> ApiResult<Envelope> {
        self.inner.transport.send(action, params, None).await
    }

    /// Execute an authenticated call with the one-shot refresh-and-retry
    /// dance: a 401 triggers the shared refresh, the request is re-sent
    /// once with the fresh token, and a second 401 surfaces to the
    /// caller.
    pub(crate) async fn execute_admin(
        &self,
        action: Action,
        params: &[(String, String)],
    ) -> ApiResult<Envelope> {
        let auth = &self.inner.auth;
        let observed = auth.generation();
        // the token field is always sent, empty when nothing is stored;
        // the backend owns rejection
        let token = auth.token().unwrap_or_default();

        match self.inner.transport.send(action, params, Some(&token)).await {
            Err(original) if original.is_auth_expired() => {
                debug!(action = action.as_str(), "retrying after token refresh");
                if auth.refresh_if_stale(observed).await.is_err() {
                    return Err(original);
                }
                let token = auth.token().unwrap_or_default();
                self.inner.transport.send(action, params, Some(&token)).await
            }
            other => other,
        }
    }
}
