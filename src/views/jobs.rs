// src/views/jobs.rs
//! Job listing and job posting screens.

use super::{lock, RequestGate, RequestState};
use crate::api::JobBoard;
use crate::types::{Job, NewJob};
use std::sync::Mutex;

#[derive(Default)]
struct JobListInner {
    jobs: Vec<Job>,
    state: RequestState,
}

pub struct JobListView {
    gate: RequestGate,
    inner: Mutex<JobListInner>,
}

impl JobListView {
    pub fn new() -> Self {
        Self {
            gate: RequestGate::default(),
            inner: Mutex::new(JobListInner::default()),
        }
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub fn jobs(&self) -> Vec<Job> {
        lock(&self.inner).jobs.clone()
    }

    pub async fn refresh(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }
        lock(&self.inner).state = RequestState::Loading;

        let outcome = api.list_jobs().await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(jobs) => {
                inner.jobs = jobs;
                RequestState::Success(format!("{} job(s) found", inner.jobs.len()))
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match &inner.state {
            RequestState::Error(msg) => return format!("Failed to load jobs: {}", msg),
            RequestState::Loading => return "Loading jobs...".to_string(),
            _ => {}
        }
        if inner.jobs.is_empty() {
            return "No jobs posted yet.".to_string();
        }
        let mut out = String::new();
        for job in &inner.jobs {
            out.push_str(&format!("#{} {}\n", job.id, job.title));
            if let Some(company) = &job.company_name {
                out.push_str(&format!("  {}", company));
                if let Some(location) = &job.location {
                    out.push_str(&format!(" — {}", location));
                }
                out.push('\n');
            }
            if !job.skills_required.is_empty() {
                out.push_str(&format!("  skills: {}\n", job.skills_required));
            }
        }
        out
    }
}

impl Default for JobListView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct JobPostInner {
    title: String,
    description: String,
    skills_required: String,
    state: RequestState,
}

#[derive(Default)]
pub struct JobPostForm {
    gate: RequestGate,
    inner: Mutex<JobPostInner>,
}

impl JobPostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.title = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_description(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.description = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_skills_required(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.skills_required = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub async fn submit(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }

        let job = {
            let mut inner = lock(&self.inner);
            if inner.title.trim().is_empty() || inner.description.trim().is_empty() {
                inner.state =
                    RequestState::Error("Title and description are required.".to_string());
                self.gate.finish();
                return;
            }
            inner.state = RequestState::Loading;
            NewJob {
                title: inner.title.clone(),
                description: inner.description.clone(),
                skills_required: inner.skills_required.clone(),
            }
        };

        let outcome = api.create_job(&job).await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(_) => {
                inner.title.clear();
                inner.description.clear();
                inner.skills_required.clear();
                RequestState::Success(
                    "Job posted successfully! Your listing is now live.".to_string(),
                )
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match &inner.state {
            RequestState::Idle => "Fill in the job details to post a listing.".to_string(),
            RequestState::Loading => "Posting job...".to_string(),
            RequestState::Success(msg) => msg.clone(),
            RequestState::Error(msg) => format!("Failed to post job: {}", msg),
        }
    }
}
