// src/views/login.rs
//! Login screen: exchanges credentials for a token pair and hands the pair
//! to the auth context.

use super::{lock, RequestGate, RequestState};
use crate::api::JobBoard;
use crate::auth::AuthContext;
use std::sync::Mutex;

#[derive(Default)]
struct LoginInner {
    email: String,
    password: String,
    state: RequestState,
}

#[derive(Default)]
pub struct LoginForm {
    gate: RequestGate,
    inner: Mutex<LoginInner>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&self, email: &str) {
        let mut inner = lock(&self.inner);
        inner.email = email.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_password(&self, password: &str) {
        let mut inner = lock(&self.inner);
        inner.password = password.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Submit the form. Dropped silently while a previous submission is in
    /// flight, mirroring a disabled submit button.
    pub async fn submit(&self, api: &dyn JobBoard, auth: &AuthContext) {
        if !self.gate.try_begin() {
            return;
        }

        let (email, password) = {
            let mut inner = lock(&self.inner);
            inner.state = RequestState::Loading;
            (inner.email.clone(), inner.password.clone())
        };

        let outcome = match api.create_token(&email, &password).await {
            Ok(pair) => auth.login(&pair.access, &pair.refresh).await,
            Err(e) => Err(e),
        };

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(user) => {
                inner.password.clear();
                RequestState::Success(format!("Logged in as {}", user.display_name()))
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match &inner.state {
            RequestState::Idle => "Enter your email and password to log in.".to_string(),
            RequestState::Loading => "Logging in...".to_string(),
            RequestState::Success(msg) => msg.clone(),
            RequestState::Error(msg) => format!("Login failed: {}", msg),
        }
    }
}
