// src/views/upload.rs
//! Resume upload screen. File type is checked locally before any request;
//! on success the skills extracted by the backend are kept for display.

use super::{lock, RequestGate, RequestState};
use crate::api::JobBoard;
use crate::utils::{validate_file_extension, RESUME_EXTENSIONS};
use std::sync::Mutex;

struct SelectedFile {
    name: String,
    content: Vec<u8>,
}

#[derive(Default)]
struct UploadInner {
    file: Option<SelectedFile>,
    extracted_skills: Vec<String>,
    state: RequestState,
}

#[derive(Default)]
pub struct ResumeUploadForm {
    gate: RequestGate,
    inner: Mutex<UploadInner>,
}

impl ResumeUploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a file. A wrong type is rejected here with a local error,
    /// leaving any previously extracted skills untouched; a valid choice
    /// resets the transient state for a fresh submission.
    pub fn select_file(&self, name: &str, content: Vec<u8>) {
        let mut inner = lock(&self.inner);

        if let Err(e) = validate_file_extension(name, RESUME_EXTENSIONS) {
            inner.file = None;
            inner.state = RequestState::Error(e.to_string());
            return;
        }

        inner.file = Some(SelectedFile {
            name: name.to_string(),
            content,
        });
        inner.extracted_skills.clear();
        inner.state = RequestState::Idle;
    }

    pub fn extracted_skills(&self) -> Vec<String> {
        lock(&self.inner).extracted_skills.clone()
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub async fn submit(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }

        let file = {
            let mut inner = lock(&self.inner);
            match &inner.file {
                Some(file) => {
                    let file = SelectedFile {
                        name: file.name.clone(),
                        content: file.content.clone(),
                    };
                    inner.state = RequestState::Loading;
                    inner.extracted_skills.clear();
                    file
                }
                None => {
                    inner.state =
                        RequestState::Error("Please select a resume file first.".to_string());
                    self.gate.finish();
                    return;
                }
            }
        };

        let outcome = api.upload_resume(&file.name, file.content).await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(outcome) if !outcome.skills.is_empty() => {
                inner.extracted_skills = outcome.skills;
                RequestState::Success("Resume uploaded successfully.".to_string())
            }
            Ok(_) => RequestState::Error(
                "Upload successful, but no skills were extracted.".to_string(),
            ),
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        let mut out = String::new();
        match &inner.state {
            RequestState::Idle => match &inner.file {
                Some(file) => out.push_str(&format!("Ready to upload {}.", file.name)),
                None => out.push_str("Choose a resume file (PDF or DOC/DOCX)."),
            },
            RequestState::Loading => out.push_str("Uploading..."),
            RequestState::Success(msg) => out.push_str(msg),
            RequestState::Error(msg) => out.push_str(msg),
        }
        if !inner.extracted_skills.is_empty() {
            out.push_str("\nExtracted skills: ");
            out.push_str(&inner.extracted_skills.join(", "));
        }
        out
    }
}
