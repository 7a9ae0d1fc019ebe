use std::sync::Arc;

use authgate_sdk::{ApiClient, HistoryNavigator};

use crate::{
    application::{
        error_handler::ErrorNormalizer, session::SessionContext, use_cases::auth::AuthUseCases,
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: ApiClient,
    pub session: Arc<SessionContext>,
    pub navigator: Arc<HistoryNavigator>,
    pub normalizer: ErrorNormalizer,
    pub auth_use_cases: Arc<AuthUseCases>,
}
