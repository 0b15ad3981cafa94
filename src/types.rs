// src/types.rs
//! Wire types for the JobFinder backend. All entities are owned by the
//! backend; the client only holds transient, request-scoped copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting, read-only from the client except for creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub skills_required: String,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_online: bool,
}

/// Payload for posting a new job.
#[derive(Debug, Clone, Serialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub skills_required: String,
}

/// An uploaded resume. `parsed_text` is unstructured text extracted
/// server-side; the client only mines it for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub parsed_text: String,
    pub file_url: Option<String>,
}

/// Response of the resume upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub message: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Result of matching one resume against one job. Ephemeral, never persisted
/// client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

/// One row of matching a resume against every stored job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchSummary {
    #[serde(alias = "job id")]
    pub job_id: i64,
    pub job_title: String,
    pub match_score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

/// Envelope of the match-all-jobs endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAllResponse {
    pub results: Vec<JobMatchSummary>,
}

/// Display-only summary of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
}

impl UserSummary {
    /// Preferred display name: username when present, email otherwise.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}

/// Payload for registration.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Access/refresh token pair issued by `auth/jwt/create/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Response of `auth/jwt/refresh/`: a fresh access token only.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
}
