// src/views/mod.rs
//! View layer: one struct per screen, each a thin fetch-and-render wrapper
//! around the [`JobBoard`](crate::api::JobBoard) port.
//!
//! Every form honors the same contract: at most one in-flight request per
//! user action (the gate doubles as the disabled state of the submit
//! control), backend error messages surfaced verbatim, and transient
//! success/error state cleared as soon as an input changes again.

pub mod jobs;
pub mod login;
pub mod matcher;
pub mod register;
pub mod resumes;
pub mod upload;

pub use jobs::{JobListView, JobPostForm};
pub use login::LoginForm;
pub use matcher::{MatchAllView, MatchForm};
pub use register::RegisterForm;
pub use resumes::ResumeListView;
pub use upload::ResumeUploadForm;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Local request state of a single view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RequestState::Success(msg) | RequestState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Single-in-flight guard. `try_begin` atomically claims the submission slot;
/// while claimed the triggering control counts as disabled and further
/// submissions are dropped.
#[derive(Debug, Default)]
pub struct RequestGate(AtomicBool);

impl RequestGate {
    pub fn try_begin(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    pub fn finish(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Lock a view's inner state, recovering from poisoning. View state is plain
/// data; a panic mid-update cannot leave it in a state worse than the panic
/// itself.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
