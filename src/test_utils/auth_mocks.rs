//! In-memory implementations of the auth flow ports.

use async_trait::async_trait;
use authgate_sdk::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use std::sync::Mutex;

use crate::application::{
    app_error::{AppError, AppResult},
    use_cases::auth::{AuthGateway, Notifier},
};

// ============================================================================
// InMemoryAuthGateway
// ============================================================================

/// Returns canned responses and records what was asked. Unset responses fail
/// with [`AppError::Unknown`].
pub struct InMemoryAuthGateway {
    login_response: Mutex<AppResult<LoginResponse>>,
    sign_up_response: Mutex<AppResult<SignupResponse>>,
    login_calls: Mutex<Vec<String>>,
    signup_calls: Mutex<Vec<(String, String)>>,
}

impl Default for InMemoryAuthGateway {
    fn default() -> Self {
        Self {
            login_response: Mutex::new(Err(AppError::Unknown)),
            sign_up_response: Mutex::new(Err(AppError::Unknown)),
            login_calls: Mutex::new(Vec::new()),
            signup_calls: Mutex::new(Vec::new()),
        }
    }
}

impl InMemoryAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_login(&self, response: AppResult<LoginResponse>) {
        *self.login_response.lock().unwrap() = response;
    }

    pub fn set_sign_up(&self, response: AppResult<SignupResponse>) {
        *self.sign_up_response.lock().unwrap() = response;
    }

    /// Emails of every login attempt, in order.
    pub fn login_calls(&self) -> Vec<String> {
        self.login_calls.lock().unwrap().clone()
    }

    /// `(name, email)` of every signup attempt, in order.
    pub fn signup_calls(&self) -> Vec<(String, String)> {
        self.signup_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        self.login_calls.lock().unwrap().push(request.email.clone());
        self.login_response.lock().unwrap().clone()
    }

    async fn sign_up(&self, request: &SignupRequest) -> AppResult<SignupResponse> {
        self.signup_calls
            .lock()
            .unwrap()
            .push((request.name.clone(), request.email.clone()));
        self.sign_up_response.lock().unwrap().clone()
    }
}

// ============================================================================
// RecordingNotifier
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Success(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Info(message.to_string()));
    }

    fn error(&self, message: &str, _details: Option<&str>) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Error(message.to_string()));
    }
}
