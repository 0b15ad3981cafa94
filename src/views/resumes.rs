// src/views/resumes.rs
//! Uploaded-resume listing, with contact details mined from the parsed text.

use super::{lock, RequestGate, RequestState};
use crate::api::JobBoard;
use crate::extract::ContactDetails;
use crate::types::Resume;
use std::sync::Mutex;

const RAW_PREVIEW_CHARS: usize = 240;

#[derive(Default)]
struct ResumeListInner {
    resumes: Vec<Resume>,
    state: RequestState,
}

#[derive(Default)]
pub struct ResumeListView {
    gate: RequestGate,
    inner: Mutex<ResumeListInner>,
}

impl ResumeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub fn resumes(&self) -> Vec<Resume> {
        lock(&self.inner).resumes.clone()
    }

    pub async fn refresh(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }
        lock(&self.inner).state = RequestState::Loading;

        let outcome = api.list_resumes().await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(resumes) => {
                inner.resumes = resumes;
                RequestState::Success(format!("{} resume(s) found", inner.resumes.len()))
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match &inner.state {
            RequestState::Error(msg) => return format!("Failed to load resumes: {}", msg),
            RequestState::Loading => return "Loading resumes...".to_string(),
            _ => {}
        }
        if inner.resumes.is_empty() {
            return "No resumes have been uploaded yet.".to_string();
        }

        let mut out = String::new();
        for resume in &inner.resumes {
            out.push_str(&format!(
                "Resume #{} (uploaded {})\n",
                resume.id,
                resume.uploaded_at.format("%Y-%m-%d")
            ));
            out.push_str(&render_contact(&resume.parsed_text));
            if let Some(url) = &resume.file_url {
                out.push_str(&format!("  file: {}\n", url));
            }
        }
        out
    }
}

fn render_contact(parsed_text: &str) -> String {
    let details = ContactDetails::from_text(parsed_text);
    let mut out = String::new();

    if let Some(email) = &details.email {
        out.push_str(&format!("  email: {}\n", email));
    }
    if let Some(phone) = &details.phone {
        out.push_str(&format!("  phone: {}\n", phone));
    }
    if let Some(linkedin) = &details.linkedin {
        out.push_str(&format!("  linkedin: https://{}\n", linkedin));
    }
    if let Some(github) = &details.github {
        out.push_str(&format!("  github: https://{}\n", github));
    }

    let remainder = details.remainder;
    if !remainder.is_empty() {
        let preview: String = remainder.chars().take(RAW_PREVIEW_CHARS).collect();
        out.push_str(&format!("  raw: {}\n", preview));
    }
    out
}
