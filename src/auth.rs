// src/auth.rs
//! Authentication context: owns the session lifecycle.
//!
//! State machine: `Checking` at startup, settling into `Authenticated` or
//! `Anonymous`; `Authenticated -> Anonymous` on logout or when the token no
//! longer verifies. The context is the sole writer of the persisted session
//! and serializes its own mutations, so no two login/logout calls interleave
//! their persistence writes.

use crate::api::JobBoard;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::types::UserSummary;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone)]
enum AuthState {
    Checking,
    Authenticated(UserSummary),
    Anonymous,
}

/// What consumers observe. `loading` is true only during the initial check,
/// never during later logins or logouts.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub user: Option<UserSummary>,
    pub is_authenticated: bool,
    pub loading: bool,
}

pub struct AuthContext {
    store: Arc<SessionStore>,
    api: Arc<dyn JobBoard>,
    state: Mutex<AuthState>,
}

impl AuthContext {
    pub fn new(store: Arc<SessionStore>, api: Arc<dyn JobBoard>) -> Self {
        Self {
            store,
            api,
            state: Mutex::new(AuthState::Checking),
        }
    }

    /// Startup check: read the persisted session and verify any stored access
    /// token by fetching the current user. A token that fails verification,
    /// for whatever reason, is cleared; the failure is not surfaced here and
    /// not retried. The state always settles, never staying `Checking`.
    pub async fn initialize(&self) {
        let mut state = self.state.lock().await;

        let session = self.store.load().await;
        if !session.has_access_token() {
            *state = AuthState::Anonymous;
            return;
        }

        match self.api.current_user().await {
            Ok(user) => {
                info!("Session verified for {}", user.display_name());
                *state = AuthState::Authenticated(user);
            }
            Err(e) => {
                warn!("Stored token failed verification: {}", e);
                if let Err(e) = self.store.clear().await {
                    warn!("Failed to clear session: {}", e);
                }
                *state = AuthState::Anonymous;
            }
        }
    }

    /// Persist a freshly issued token pair and derive the user summary.
    /// Idempotent when called again with the same tokens. When verification
    /// fails the tokens are cleared and the error is returned to the caller.
    pub async fn login(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<UserSummary, ApiError> {
        let mut state = self.state.lock().await;

        self.store.save(access_token, refresh_token).await?;

        match self.api.current_user().await {
            Ok(user) => {
                info!("Logged in as {}", user.display_name());
                *state = AuthState::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                if let Err(clear_err) = self.store.clear().await {
                    warn!("Failed to clear session: {}", clear_err);
                }
                *state = AuthState::Anonymous;
                Err(e)
            }
        }
    }

    /// Clear the session and go anonymous. Safe to call with no session.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;

        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear session: {}", e);
        }
        *state = AuthState::Anonymous;
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        let state = self.state.lock().await;
        match &*state {
            AuthState::Checking => AuthSnapshot {
                user: None,
                is_authenticated: false,
                loading: true,
            },
            AuthState::Authenticated(user) => AuthSnapshot {
                user: Some(user.clone()),
                is_authenticated: true,
                loading: false,
            },
            AuthState::Anonymous => AuthSnapshot {
                user: None,
                is_authenticated: false,
                loading: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBoard;
    use tempfile::TempDir;

    fn user() -> UserSummary {
        UserSummary {
            username: Some("jane".to_string()),
            email: "jane@example.com".to_string(),
        }
    }

    fn context(dir: &TempDir, api: MockBoard) -> (Arc<SessionStore>, AuthContext) {
        let store = Arc::new(SessionStore::new(dir.path().join("session.json")));
        let auth = AuthContext::new(store.clone(), Arc::new(api));
        (store, auth)
    }

    #[tokio::test]
    async fn test_starts_loading_until_initialized() {
        let dir = TempDir::new().unwrap();
        let (_store, auth) = context(&dir, MockBoard::new());

        assert!(auth.snapshot().await.loading);
        auth.initialize().await;
        assert!(!auth.snapshot().await.loading);
    }

    #[tokio::test]
    async fn test_initialize_without_tokens_is_anonymous() {
        let dir = TempDir::new().unwrap();
        let (_store, auth) = context(&dir, MockBoard::new().with_user(user()));

        auth.initialize().await;

        let snapshot = auth.snapshot().await;
        assert!(!snapshot.is_authenticated);
        assert_eq!(snapshot.user, None);
    }

    #[tokio::test]
    async fn test_initialize_verifies_stored_token() {
        let dir = TempDir::new().unwrap();
        let (store, auth) = context(&dir, MockBoard::new().with_user(user()));
        store.save("access", "refresh").await.unwrap();

        auth.initialize().await;

        let snapshot = auth.snapshot().await;
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.user, Some(user()));
    }

    #[tokio::test]
    async fn test_failed_verification_clears_session() {
        let dir = TempDir::new().unwrap();
        // No user configured: current_user fails.
        let (store, auth) = context(&dir, MockBoard::new());
        store.save("stale-access", "stale-refresh").await.unwrap();

        auth.initialize().await;

        let snapshot = auth.snapshot().await;
        assert!(!snapshot.is_authenticated);
        assert_eq!(snapshot.user, None);
        assert!(!snapshot.loading);
        assert_eq!(store.load().await.access_token, None);
    }

    #[tokio::test]
    async fn test_network_failure_during_verification_goes_anonymous() {
        let dir = TempDir::new().unwrap();
        let (store, auth) = context(&dir, MockBoard::new().with_network_failure());
        store.save("access", "refresh").await.unwrap();

        auth.initialize().await;

        let snapshot = auth.snapshot().await;
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_login_persists_exact_token_pair() {
        let dir = TempDir::new().unwrap();
        let (store, auth) = context(&dir, MockBoard::new().with_user(user()));

        auth.login("access-abc", "refresh-xyz").await.unwrap();

        let session = store.load().await;
        assert_eq!(session.access_token.as_deref(), Some("access-abc"));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-xyz"));
        assert!(auth.snapshot().await.is_authenticated);
    }

    #[tokio::test]
    async fn test_login_is_idempotent_for_same_tokens() {
        let dir = TempDir::new().unwrap();
        let (store, auth) = context(&dir, MockBoard::new().with_user(user()));

        auth.login("a", "r").await.unwrap();
        auth.login("a", "r").await.unwrap();

        let session = store.load().await;
        assert_eq!(session.access_token.as_deref(), Some("a"));
        assert_eq!(auth.snapshot().await.user, Some(user()));
    }

    #[tokio::test]
    async fn test_login_with_unverifiable_token_fails_closed() {
        let dir = TempDir::new().unwrap();
        let (store, auth) = context(&dir, MockBoard::new());

        let result = auth.login("bad", "pair").await;

        assert!(result.is_err());
        assert!(!auth.snapshot().await.is_authenticated);
        assert_eq!(store.load().await.access_token, None);
    }

    #[tokio::test]
    async fn test_logout_clears_regardless_of_prior_state() {
        let dir = TempDir::new().unwrap();
        let (store, auth) = context(&dir, MockBoard::new().with_user(user()));

        auth.login("a", "r").await.unwrap();
        auth.logout().await;

        let session = store.load().await;
        assert_eq!(session.access_token, None);
        assert_eq!(session.refresh_token, None);
        assert!(!auth.snapshot().await.is_authenticated);

        // And again with nothing persisted: still safe.
        auth.logout().await;
        assert!(!auth.snapshot().await.is_authenticated);
    }
}
