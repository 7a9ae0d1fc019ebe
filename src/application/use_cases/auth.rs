use std::sync::Arc;

use async_trait::async_trait;
use authgate_sdk::{
    Credential, HOME_PATH, LOGIN_PATH, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
    User,
};
use tracing::{info, instrument, warn};

use crate::application::{
    app_error::{AppError, AppResult},
    dictionaries::{MessageKey, text},
    error_handler::ErrorNormalizer,
    forms::{LoginForm, SignupForm},
    session::SessionContext,
};

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;
    async fn sign_up(&self, request: &SignupRequest) -> AppResult<SignupResponse>;
}

/// Toast-style feedback for the user.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str, details: Option<&str>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// Account created and signed in.
    LoggedIn(User),
    /// Account created; the user has to sign in manually.
    Created,
}

#[derive(Clone)]
pub struct AuthUseCases {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    normalizer: ErrorNormalizer,
}

impl AuthUseCases {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
        normalizer: ErrorNormalizer,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
            normalizer,
        }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn normalizer(&self) -> &ErrorNormalizer {
        &self.normalizer
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn login(&self, form: &LoginForm) -> AppResult<User> {
        form.validate(self.normalizer.language())
            .map_err(AppError::Validation)?;

        match self.authenticate(form).await {
            Ok(user) => {
                info!(user_id = %user.id, "login succeeded");
                self.notifier.success(&self.text(MessageKey::LoginSuccess));
                self.session.navigator().push(HOME_PATH);
                Ok(user)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn sign_up(&self, form: &SignupForm) -> AppResult<SignupOutcome> {
        form.validate(self.normalizer.language())
            .map_err(AppError::Validation)?;

        let response = match self.gateway.sign_up(&form.to_request()).await {
            Ok(response) => response,
            Err(e) => return Err(self.report(e)),
        };
        info!("account created");
        self.notifier.success(&self.text(MessageKey::SignupSuccess));

        if let Some(user) = self.establish(response.access_token, response.user) {
            self.notifier.success(&self.text(MessageKey::LoginSuccess));
            self.session.navigator().push(HOME_PATH);
            return Ok(SignupOutcome::LoggedIn(user));
        }

        match self.authenticate(&form.login_form()).await {
            Ok(user) => {
                self.notifier.success(&self.text(MessageKey::LoginSuccess));
                self.session.navigator().push(HOME_PATH);
                Ok(SignupOutcome::LoggedIn(user))
            }
            Err(e) => {
                if e.is_auth_required() {
                    self.session.refresh();
                }
                warn!(error = %e, "automatic login after signup failed");
                self.notifier
                    .info(&self.text(MessageKey::SignupLoginRequired));
                self.session.navigator().push(LOGIN_PATH);
                Ok(SignupOutcome::Created)
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
        self.notifier.success(&self.text(MessageKey::LoggedOut));
    }

    async fn authenticate(&self, form: &LoginForm) -> AppResult<User> {
        let response = self.gateway.login(&form.to_request()).await?;
        self.establish(response.access_token, response.user)
            .ok_or_else(|| AppError::Message(self.text(MessageKey::InvalidResponse)))
    }

    /// Starts the session when the backend handed out both a token and a user.
    fn establish(&self, access_token: Option<String>, user: Option<User>) -> Option<User> {
        let credential = access_token.and_then(Credential::new)?;
        let user = user?;
        self.session.login(credential, user.clone());
        Some(user)
    }

    /// Normalizes a failure once and shows it to the user.
    fn report(&self, error: AppError) -> AppError {
        if error.is_auth_required() {
            self.session.refresh();
        }
        let normalized = self.normalizer.normalize(&error);
        warn!(status = normalized.status, error = %error, "auth request failed");
        let details = self.normalizer.details(&error);
        self.notifier.error(&normalized.message, details.as_deref());
        error
    }

    fn text(&self, key: MessageKey) -> String {
        text(self.normalizer.language(), key)
    }
}
