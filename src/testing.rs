// src/testing.rs
//! In-memory [`JobBoard`] implementation for unit tests. Responses are
//! configured up front; every call is recorded so tests can assert how many
//! requests a component issued.

use crate::api::JobBoard;
use crate::error::ApiError;
use crate::types::{
    Job, JobMatchSummary, MatchResult, NewJob, NewUser, Resume, TokenPair, UploadOutcome,
    UserSummary,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockBoard {
    jobs: Vec<Job>,
    resumes: Vec<Resume>,
    match_result: Option<MatchResult>,
    match_all: Vec<JobMatchSummary>,
    upload_outcome: Option<UploadOutcome>,
    token_pair: Option<(String, String)>,
    user: Option<UserSummary>,
    delay: Option<Duration>,
    network_failure: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(mut self, jobs: Vec<Job>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_resumes(mut self, resumes: Vec<Resume>) -> Self {
        self.resumes = resumes;
        self
    }

    pub fn with_match_result(mut self, result: MatchResult) -> Self {
        self.match_result = Some(result);
        self
    }

    pub fn with_match_all(mut self, rows: Vec<JobMatchSummary>) -> Self {
        self.match_all = rows;
        self
    }

    pub fn with_upload_outcome(mut self, outcome: UploadOutcome) -> Self {
        self.upload_outcome = Some(outcome);
        self
    }

    pub fn with_token_pair(mut self, access: &str, refresh: &str) -> Self {
        self.token_pair = Some((access.to_string(), refresh.to_string()));
        self
    }

    pub fn with_user(mut self, user: UserSummary) -> Self {
        self.user = Some(user);
        self
    }

    /// Every call sleeps this long before responding; used to hold a request
    /// in flight while a second submission is attempted.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call fails with a simulated transport error.
    pub fn with_network_failure(self) -> Self {
        self.network_failure.store(true, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    async fn begin(&self, name: &str) -> Result<(), ApiError> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(name.to_string()),
            Err(poisoned) => poisoned.into_inner().push(name.to_string()),
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.network_failure.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JobBoard for MockBoard {
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.begin("list_jobs").await?;
        Ok(self.jobs.clone())
    }

    async fn create_job(&self, job: &NewJob) -> Result<Job, ApiError> {
        self.begin("create_job").await?;
        Ok(Job {
            id: (self.jobs.len() + 1) as i64,
            title: job.title.clone(),
            description: job.description.clone(),
            skills_required: job.skills_required.clone(),
            company_name: None,
            location: None,
            salary_range: None,
            job_type: None,
            created_at: None,
            is_online: false,
        })
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError> {
        self.begin("list_resumes").await?;
        Ok(self.resumes.clone())
    }

    async fn get_resume(&self, resume_id: i64) -> Result<Resume, ApiError> {
        self.begin("get_resume").await?;
        self.resumes
            .iter()
            .find(|r| r.id == resume_id)
            .cloned()
            .ok_or_else(|| ApiError::Backend {
                status: 404,
                detail: "Resume not found".to_string(),
            })
    }

    async fn upload_resume(
        &self,
        _file_name: &str,
        _content: Vec<u8>,
    ) -> Result<UploadOutcome, ApiError> {
        self.begin("upload_resume").await?;
        self.upload_outcome
            .clone()
            .ok_or_else(|| ApiError::Backend {
                status: 500,
                detail: "upload failed".to_string(),
            })
    }

    async fn match_resume(&self, _resume_id: i64, _job_id: i64) -> Result<MatchResult, ApiError> {
        self.begin("match_resume").await?;
        self.match_result.clone().ok_or_else(|| ApiError::Backend {
            status: 404,
            detail: "Resume not found".to_string(),
        })
    }

    async fn match_all_jobs(&self, _resume_id: i64) -> Result<Vec<JobMatchSummary>, ApiError> {
        self.begin("match_all_jobs").await?;
        Ok(self.match_all.clone())
    }

    async fn create_token(&self, _email: &str, _password: &str) -> Result<TokenPair, ApiError> {
        self.begin("create_token").await?;
        match &self.token_pair {
            Some((access, refresh)) => Ok(TokenPair {
                access: access.clone(),
                refresh: refresh.clone(),
            }),
            None => Err(ApiError::Backend {
                status: 401,
                detail: "No active account found with the given credentials".to_string(),
            }),
        }
    }

    async fn register(&self, user: &NewUser) -> Result<UserSummary, ApiError> {
        self.begin("register").await?;
        Ok(UserSummary {
            username: Some(user.username.clone()),
            email: user.email.clone(),
        })
    }

    async fn current_user(&self) -> Result<UserSummary, ApiError> {
        self.begin("current_user").await?;
        self.user.clone().ok_or(ApiError::AuthRequired)
    }
}
