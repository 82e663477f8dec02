//! Token lifecycle management
//!
//! Owns the token and refresh-token slots, arms the proactive refresh
//! timer, and deduplicates concurrent refresh attempts so one expiry
//! window costs at most one network refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use causeway_core::types::{AuthUser, TokenSet};
use causeway_core::{Action, ApiError, ApiResult, validation};

use super::{SessionEvent, SessionEvents, StateStore};
use crate::config::StorageKeys;
use crate::transport::Transport;

/// Owns all auth state; UI code never touches the token slots directly.
/// Cheap to clone, all clones share one session.
#[derive(Clone)]
pub struct AuthManager {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    transport: Transport,
    store: Arc<dyn StateStore>,
    keys: StorageKeys,
    refresh_threshold: Duration,
    events: SessionEvents,
    refresh_gate: Mutex<()>,
    generation: AtomicU64,
    timer: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl AuthManager {
    pub(crate) fn new(
        transport: Transport,
        store: Arc<dyn StateStore>,
        keys: StorageKeys,
        refresh_threshold: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                transport,
                store,
                keys,
                refresh_threshold,
                events: SessionEvents::new(),
                refresh_gate: Mutex::new(()),
                generation: AtomicU64::new(0),
                timer: std::sync::Mutex::new(None),
            }),
        }
    }

    /// Log in with email and password
    ///
    /// Inputs are validated locally first; nothing goes on the wire for a
    /// malformed email or empty password. On success the token set is
    /// persisted and the proactive refresh timer armed.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthUser> {
        validation::validate_email(email)?;
        validation::validate_password(password)?;

        let params = vec![
            ("email".to_string(), email.trim().to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let envelope = self
            .inner
            .transport
            .send(Action::Login, &params, None)
            .await?;
        let tokens: TokenSet = envelope.into_data()?;

        let user = tokens.user.clone().unwrap_or_else(|| AuthUser {
            email: email.trim().to_string(),
            name: None,
            is_super_admin: None,
        });
        self.inner.install_tokens(&tokens);
        if let Ok(json) = serde_json::to_string(&user) {
            self.inner.store.set(&self.inner.keys.user, &json);
        }
        self.arm_refresh_timer(tokens.expires_at);
        self.inner.events.emit(SessionEvent::LoggedIn);
        debug!(email = %user.email, "login succeeded");
        Ok(user)
    }

    /// Log out: notify the backend best-effort, then clear local state
    ///
    /// The notification can fail without consequence; logout always
    /// succeeds client-side.
    pub async fn logout(&self) {
        if let Some(token) = self.token().filter(|t| !t.is_empty()) {
            if let Err(err) = self
                .inner
                .transport
                .send(Action::Logout, &[], Some(&token))
                .await
            {
                warn!(error = %err, "logout notification failed");
            }
        }
        self.inner.clear();
        self.inner.events.emit(SessionEvent::LoggedOut);
    }

    /// Refresh the token pair, sharing one network refresh among
    /// concurrent callers
    pub async fn refresh(&self) -> ApiResult<()> {
        let observed = self.generation();
        self.refresh_if_stale(observed).await
    }

    /// Refresh unless the token has already rotated past `observed`
    ///
    /// Callers that saw a 401 pass the generation their failed request
    /// used; whoever wins the gate performs the single network refresh
    /// for that expiry window and everyone else falls through.
    pub(crate) async fn refresh_if_stale(&self, observed: u64) -> ApiResult<()> {
        let _gate = self.inner.refresh_gate.lock().await;
        if self.generation() != observed {
            return Ok(());
        }

        let Some(refresh_token) = self
            .inner
            .store
            .get(&self.inner.keys.refresh_token)
            .filter(|t| !t.is_empty())
        else {
            return Err(ApiError::Unauthorized("no refresh token stored".into()));
        };

        let params = vec![("refreshToken".to_string(), refresh_token)];
        let result = self
            .inner
            .transport
            .send(Action::RefreshToken, &params, None)
            .await
            .and_then(|envelope| envelope.into_data::<TokenSet>());

        match result {
            Ok(tokens) => {
                self.inner.install_tokens(&tokens);
                self.arm_refresh_timer(tokens.expires_at);
                debug!("token refresh succeeded");
                Ok(())
            }
            Err(err) => {
                // refresh failure is terminal for the session
                warn!(error = %err, "token refresh failed");
                self.inner.clear();
                self.inner.events.emit(SessionEvent::SessionExpired);
                Err(err)
            }
        }
    }

    /// Whether a token is currently stored. Expiry is not checked
    /// locally; the server enforces it, which is why every call path
    /// still handles a 401.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    /// The stored token, if any
    pub fn token(&self) -> Option<String> {
        self.inner.store.get(&self.inner.keys.token)
    }

    /// The cached user projection, if any
    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner
            .store
            .get(&self.inner.keys.user)
            .and_then(|json| serde_json::from_str(&json).ok())
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    fn arm_refresh_timer(&self, expires_at: DateTime<Utc>) {
        let until_expiry = (expires_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        let delay = until_expiry.saturating_sub(self.inner.refresh_threshold);
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                let manager = AuthManager { inner };
                debug!("proactive token refresh firing");
                if let Err(err) = manager.refresh().await {
                    warn!(error = %err, "proactive token refresh failed");
                }
            }
        });
        self.inner.set_timer(handle);
    }
}

impl AuthInner {
    fn install_tokens(&self, tokens: &TokenSet) {
        self.store.set(&self.keys.token, &tokens.token);
        if let Some(refresh) = &tokens.refresh_token {
            self.store.set(&self.keys.refresh_token, refresh);
        }
        if let Some(user) = &tokens.user {
            if let Ok(json) = serde_json::to_string(user) {
                self.store.set(&self.keys.user, &json);
            }
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.store.remove(&self.keys.token);
        self.store.remove(&self.keys.refresh_token);
        self.store.remove(&self.keys.user);
        self.disarm_timer();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn set_timer(&self, handle: JoinHandle<()>) {
        let mut slot = self
            .timer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    fn disarm_timer(&self) {
        let mut slot = self
            .timer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl Drop for AuthInner {
    fn drop(&mut self) {
        self.disarm_timer();
    }
}
