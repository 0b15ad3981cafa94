// src/session.rs
//! Persisted session: the access/refresh token pair that survives between
//! invocations. Stored as JSON under the configured session path, the
//! equivalent of the browser's origin-scoped key-value storage. Tokens are
//! readable by anything running as the same user; that is an accepted
//! property of this storage, not something this module tries to fix.

use crate::api::{AuthFailureHook, TokenProvider};
use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// The client-held record of authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }
}

/// File-backed store for the token pair.
///
/// `save` is atomic from a reader's perspective: the new pair is written to a
/// temporary file and renamed into place, so a concurrent `load` sees either
/// the old pair or the new pair, never a mix. `save` returns only after the
/// rename completed, so the write is visible to any request issued afterwards.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted session. Absent or malformed files yield an empty
    /// session rather than an error.
    pub async fn load(&self) -> Session {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => return Session::default(),
        };

        match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                warn!("Malformed session file {}: {}", self.path.display(), e);
                Session::default()
            }
        }
    }

    /// Persist both tokens.
    pub async fn save(&self, access_token: &str, refresh_token: &str) -> Result<(), ApiError> {
        self.write_atomic(&Session {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
        })
        .await
    }

    /// Replace only the access token, keeping the stored refresh token.
    /// Used after a successful token refresh.
    ///
    /// This is a read-modify-write: a rotation racing a concurrent `save` or
    /// `clear` could resurrect the pair the other writer just replaced.
    /// Rotation happens mid-request while the caller awaits that request, and
    /// login/logout writes are serialized by [`crate::auth::AuthContext`], so
    /// the race requires issuing requests concurrently with login/logout on
    /// separate tasks.
    pub async fn set_access_token(&self, access_token: &str) -> Result<(), ApiError> {
        let mut session = self.load().await;
        session.access_token = Some(access_token.to_string());
        self.write_atomic(&session).await
    }

    /// Remove both tokens. Safe to call when no session exists.
    pub async fn clear(&self) -> Result<(), ApiError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_atomic(&self, session: &Session) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ApiError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| ApiError::Storage(format!("Failed to serialize session: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await.map_err(|e| {
            ApiError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;

        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            ApiError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl TokenProvider for SessionStore {
    async fn access_token(&self) -> Option<String> {
        self.load().await.access_token
    }

    async fn refresh_token(&self) -> Option<String> {
        self.load().await.refresh_token
    }

    async fn access_token_rotated(&self, access_token: &str) -> Result<(), ApiError> {
        self.set_access_token(access_token).await
    }
}

#[async_trait]
impl AuthFailureHook for SessionStore {
    async fn on_auth_failure(&self) {
        info!("Tearing down session after authentication failure");
        if let Err(e) = self.clear().await {
            warn!("Failed to clear session: {}", e);
        }
    }
}
