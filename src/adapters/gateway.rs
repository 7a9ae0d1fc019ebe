//! [`AuthGateway`] over the authenticated request client.

use async_trait::async_trait;
use authgate_sdk::{ApiClient, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use tracing::instrument;

use crate::application::{
    app_error::AppResult,
    use_cases::auth::AuthGateway,
};

pub const LOGIN_ENDPOINT: &str = "/users/login";
pub const SIGNUP_ENDPOINT: &str = "/users";

#[derive(Clone)]
pub struct BackendAuthGateway {
    client: ApiClient,
}

impl BackendAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for BackendAuthGateway {
    #[instrument(skip_all)]
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        Ok(self.client.post(LOGIN_ENDPOINT, Some(request)).await?)
    }

    #[instrument(skip_all)]
    async fn sign_up(&self, request: &SignupRequest) -> AppResult<SignupResponse> {
        Ok(self.client.post(SIGNUP_ENDPOINT, Some(request)).await?)
    }
}
