// src/api/endpoints.rs
//! Typed operations over the backend REST surface.

use super::{ApiClient, JobBoard};
use crate::error::ApiError;
use crate::types::{
    Job, JobMatchSummary, MatchAllResponse, MatchResult, NewJob, NewUser, Resume, TokenPair,
    UploadOutcome, UserSummary,
};
use crate::utils::get_file_extension;
use async_trait::async_trait;

const JOBS_ENDPOINT: &str = "jobs/";
const RESUMES_ENDPOINT: &str = "resumes/";
const RESUME_UPLOAD_ENDPOINT: &str = "resumes/upload/";
const RESUME_MATCH_ENDPOINT: &str = "resume/match/";
const JWT_CREATE_ENDPOINT: &str = "auth/jwt/create/";
const REGISTER_ENDPOINT: &str = "auth/users/";
const CURRENT_USER_ENDPOINT: &str = "auth/users/me/";

const UPLOAD_FILE_FIELD: &str = "file";

/// Content type for the resume file the backend accepts.
fn upload_content_type(file_name: &str) -> Result<&'static str, ApiError> {
    match get_file_extension(file_name).as_deref() {
        Some("pdf") => Ok("application/pdf"),
        Some("doc") => Ok("application/msword"),
        Some("docx") => {
            Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => Err(ApiError::Validation(format!(
            "Unsupported file format: {}. Please upload a PDF or DOC/DOCX file.",
            file_name
        ))),
    }
}

#[async_trait]
impl JobBoard for ApiClient {
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get_json(JOBS_ENDPOINT).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<Job, ApiError> {
        let payload = serde_json::to_value(job)
            .map_err(|e| ApiError::Validation(format!("Invalid job payload: {}", e)))?;
        self.post_json(JOBS_ENDPOINT, payload).await
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError> {
        self.get_json(RESUMES_ENDPOINT).await
    }

    async fn get_resume(&self, resume_id: i64) -> Result<Resume, ApiError> {
        self.get_json(&format!("resume/{}/", resume_id)).await
    }

    async fn upload_resume(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadOutcome, ApiError> {
        let content_type = upload_content_type(file_name)?;
        self.post_file(
            RESUME_UPLOAD_ENDPOINT,
            UPLOAD_FILE_FIELD,
            file_name,
            content,
            content_type,
        )
        .await
    }

    async fn match_resume(&self, resume_id: i64, job_id: i64) -> Result<MatchResult, ApiError> {
        let payload = serde_json::json!({
            "resume_id": resume_id,
            "job_id": job_id,
        });
        self.post_json(RESUME_MATCH_ENDPOINT, payload).await
    }

    async fn match_all_jobs(&self, resume_id: i64) -> Result<Vec<JobMatchSummary>, ApiError> {
        let response: MatchAllResponse = self
            .get_json(&format!("resume/{}/match_job/", resume_id))
            .await?;
        Ok(response.results)
    }

    async fn create_token(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        self.post_json(JWT_CREATE_ENDPOINT, payload).await
    }

    async fn register(&self, user: &NewUser) -> Result<UserSummary, ApiError> {
        let payload = serde_json::to_value(user)
            .map_err(|e| ApiError::Validation(format!("Invalid registration payload: {}", e)))?;
        self.post_json(REGISTER_ENDPOINT, payload).await
    }

    async fn current_user(&self) -> Result<UserSummary, ApiError> {
        self.get_json(CURRENT_USER_ENDPOINT).await
    }
}
