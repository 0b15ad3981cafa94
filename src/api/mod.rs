// src/api/mod.rs
//! HTTP surface of the JobFinder backend.
//!
//! The adapter (`ApiClient`) and the session never import each other: the
//! adapter pulls tokens through an injected [`TokenProvider`] and reports
//! terminal authentication failures through an injected [`AuthFailureHook`].
//! Views and the auth context call the backend through the [`JobBoard`]
//! trait so tests can substitute a mock.

mod client;
mod endpoints;

pub use client::ApiClient;

use crate::error::ApiError;
use crate::types::{
    Job, JobMatchSummary, MatchResult, NewJob, NewUser, Resume, TokenPair, UploadOutcome,
    UserSummary,
};
use async_trait::async_trait;

/// Source of bearer credentials for outgoing requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current access token, if a session exists.
    async fn access_token(&self) -> Option<String>;

    /// Current refresh token, if a session exists.
    async fn refresh_token(&self) -> Option<String>;

    /// Persist a rotated access token after a successful refresh.
    async fn access_token_rotated(&self, access_token: &str) -> Result<(), ApiError>;
}

/// Invoked when a 401 survives the single refresh-and-retry cycle. The
/// implementation must tear the session down so no stale authenticated state
/// is presented afterwards.
#[async_trait]
pub trait AuthFailureHook: Send + Sync {
    async fn on_auth_failure(&self);
}

/// The backend operations the client consumes.
#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;
    async fn create_job(&self, job: &NewJob) -> Result<Job, ApiError>;
    async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError>;
    async fn get_resume(&self, resume_id: i64) -> Result<Resume, ApiError>;
    async fn upload_resume(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadOutcome, ApiError>;
    async fn match_resume(&self, resume_id: i64, job_id: i64) -> Result<MatchResult, ApiError>;
    async fn match_all_jobs(&self, resume_id: i64) -> Result<Vec<JobMatchSummary>, ApiError>;
    async fn create_token(&self, email: &str, password: &str) -> Result<TokenPair, ApiError>;
    async fn register(&self, user: &NewUser) -> Result<UserSummary, ApiError>;
    async fn current_user(&self) -> Result<UserSummary, ApiError>;
}
