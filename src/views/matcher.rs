// src/views/matcher.rs
//! Resume-to-job matcher screens: one resume against one job, and one resume
//! against every stored job.

use super::{lock, RequestGate, RequestState};
use crate::api::JobBoard;
use crate::types::{JobMatchSummary, MatchResult};
use crate::utils::join_keywords;
use std::sync::Mutex;

fn parse_id(label: &str, value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a number.", label))
}

#[derive(Default)]
struct MatchInner {
    resume_id: String,
    job_id: String,
    result: Option<MatchResult>,
    state: RequestState,
}

/// Match one resume with one job.
#[derive(Default)]
pub struct MatchForm {
    gate: RequestGate,
    inner: Mutex<MatchInner>,
}

impl MatchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resume_id(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.resume_id = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_job_id(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.job_id = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub fn result(&self) -> Option<MatchResult> {
        lock(&self.inner).result.clone()
    }

    pub async fn submit(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }

        let ids = {
            let mut inner = lock(&self.inner);
            let parsed = parse_id("Resume ID", &inner.resume_id)
                .and_then(|r| parse_id("Job ID", &inner.job_id).map(|j| (r, j)));
            match parsed {
                Ok(ids) => {
                    inner.state = RequestState::Loading;
                    inner.result = None;
                    ids
                }
                Err(msg) => {
                    inner.state = RequestState::Error(msg);
                    self.gate.finish();
                    return;
                }
            }
        };

        let outcome = api.match_resume(ids.0, ids.1).await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(result) => {
                inner.result = Some(result);
                RequestState::Success("Resume matched successfully.".to_string())
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match (&inner.state, &inner.result) {
            (RequestState::Error(msg), _) => format!("Match failed: {}", msg),
            (RequestState::Loading, _) => "Checking match...".to_string(),
            (_, Some(result)) => format!(
                "Score: {}%\nMatched Keywords: {}\nMissing Keywords: {}",
                result.score,
                join_keywords(&result.matched_keywords),
                join_keywords(&result.missing_keywords)
            ),
            _ => "Enter a resume ID and a job ID to check the match.".to_string(),
        }
    }
}

#[derive(Default)]
struct MatchAllInner {
    resume_id: String,
    rows: Vec<JobMatchSummary>,
    state: RequestState,
}

/// Match one resume against all stored jobs.
#[derive(Default)]
pub struct MatchAllView {
    gate: RequestGate,
    inner: Mutex<MatchAllInner>,
}

impl MatchAllView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resume_id(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.resume_id = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub async fn submit(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }

        let resume_id = {
            let mut inner = lock(&self.inner);
            match parse_id("Resume ID", &inner.resume_id) {
                Ok(id) => {
                    inner.state = RequestState::Loading;
                    inner.rows.clear();
                    id
                }
                Err(msg) => {
                    inner.state = RequestState::Error(msg);
                    self.gate.finish();
                    return;
                }
            }
        };

        let outcome = api.match_all_jobs(resume_id).await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(rows) => {
                inner.rows = rows;
                RequestState::Success(format!("Matched against {} jobs.", inner.rows.len()))
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match &inner.state {
            RequestState::Error(msg) => return format!("Match failed: {}", msg),
            RequestState::Loading => return "Matching against all jobs...".to_string(),
            _ => {}
        }
        if inner.rows.is_empty() {
            return "No match results yet.".to_string();
        }
        let mut out = String::new();
        for row in &inner.rows {
            out.push_str(&format!(
                "#{} {} — {}%\n  matched: {}\n  missing: {}\n",
                row.job_id,
                row.job_title,
                row.match_score,
                join_keywords(&row.matched_skills),
                join_keywords(&row.missing_skills)
            ));
        }
        out
    }
}
