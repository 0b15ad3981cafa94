// src/views/register.rs
//! Registration screen. The password confirmation check runs locally and
//! rejects before any request is issued.

use super::{lock, RequestGate, RequestState};
use crate::api::JobBoard;
use crate::types::NewUser;
use std::sync::Mutex;

#[derive(Default)]
struct RegisterInner {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
    state: RequestState,
}

#[derive(Default)]
pub struct RegisterForm {
    gate: RequestGate,
    inner: Mutex<RegisterInner>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.username = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_email(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.email = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_password(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.password = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn set_confirm_password(&self, value: &str) {
        let mut inner = lock(&self.inner);
        inner.confirm_password = value.to_string();
        inner.state = RequestState::Idle;
    }

    pub fn state(&self) -> RequestState {
        lock(&self.inner).state.clone()
    }

    pub async fn submit(&self, api: &dyn JobBoard) {
        if !self.gate.try_begin() {
            return;
        }

        let user = {
            let mut inner = lock(&self.inner);
            if inner.password != inner.confirm_password {
                inner.state = RequestState::Error("Passwords do not match.".to_string());
                self.gate.finish();
                return;
            }
            inner.state = RequestState::Loading;
            NewUser {
                username: inner.username.clone(),
                email: inner.email.clone(),
                password: inner.password.clone(),
            }
        };

        let outcome = api.register(&user).await;

        let mut inner = lock(&self.inner);
        inner.state = match outcome {
            Ok(_) => {
                inner.username.clear();
                inner.email.clear();
                inner.password.clear();
                inner.confirm_password.clear();
                RequestState::Success(
                    "Registration successful! You can now log in.".to_string(),
                )
            }
            Err(e) => RequestState::Error(e.to_string()),
        };
        self.gate.finish();
    }

    pub fn render(&self) -> String {
        let inner = lock(&self.inner);
        match &inner.state {
            RequestState::Idle => "Fill in the form to create your account.".to_string(),
            RequestState::Loading => "Registering...".to_string(),
            RequestState::Success(msg) => msg.clone(),
            RequestState::Error(msg) => format!("Registration failed: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBoard;

    fn filled_form(password: &str, confirm: &str) -> RegisterForm {
        let form = RegisterForm::new();
        form.set_username("jane");
        form.set_email("jane@example.com");
        form.set_password(password);
        form.set_confirm_password(confirm);
        form
    }

    #[tokio::test]
    async fn test_password_mismatch_issues_no_request() {
        let api = MockBoard::new();
        let form = filled_form("hunter2", "hunter3");

        form.submit(&api).await;

        assert_eq!(
            form.state(),
            RequestState::Error("Passwords do not match.".to_string())
        );
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_registration_clears_fields() {
        let api = MockBoard::new();
        let form = filled_form("hunter2", "hunter2");

        form.submit(&api).await;

        assert_eq!(
            form.state(),
            RequestState::Success("Registration successful! You can now log in.".to_string())
        );
        assert_eq!(api.calls(), vec!["register".to_string()]);

        let inner = lock(&form.inner);
        assert!(inner.username.is_empty());
        assert!(inner.password.is_empty());
    }

    #[tokio::test]
    async fn test_mismatch_error_cleared_on_edit() {
        let api = MockBoard::new();
        let form = filled_form("hunter2", "hunter3");

        form.submit(&api).await;
        assert!(matches!(form.state(), RequestState::Error(_)));

        form.set_confirm_password("hunter2");
        assert_eq!(form.state(), RequestState::Idle);

        form.submit(&api).await;
        assert!(matches!(form.state(), RequestState::Success(_)));
    }
}
