use std::{fs::File, path::Path, sync::Arc};

use authgate_sdk::{ApiClient, ApiConfig, HistoryNavigator, SessionStorage, TokenStore};
use reqwest::Client;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        app_state::AppState, gateway::BackendAuthGateway, storage::FileStorage,
    },
    application::{
        error_handler::ErrorNormalizer,
        session::SessionContext,
        use_cases::auth::{AuthUseCases, Notifier},
    },
    infra::{config::AppConfig, error::InfraError, http_client::try_build_client},
};

/// Wires the app against the session file from `config`.
pub fn init_app_state(
    config: AppConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<AppState, InfraError> {
    if let Some(parent) = config
        .session_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|source| InfraError::SessionStorage {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let storage = Arc::new(FileStorage::new(config.session_file.clone()));
    let http = try_build_client()?;
    Ok(build_app_state(config, http, storage, notifier))
}

/// Wires the app over any storage backend. The session is hydrated before
/// this returns.
pub fn build_app_state(
    config: AppConfig,
    http: Client,
    storage: Arc<dyn SessionStorage>,
    notifier: Arc<dyn Notifier>,
) -> AppState {
    let tokens = TokenStore::new(storage);
    let navigator = Arc::new(HistoryNavigator::default());

    let api = ApiClient::new(
        ApiConfig {
            base_url: config.api_url.clone(),
        },
        http,
        tokens.clone(),
        navigator.clone(),
    );

    let session = Arc::new(SessionContext::restore(tokens, navigator.clone()));
    let normalizer = ErrorNormalizer::new(config.language, config.env);

    let auth_use_cases = AuthUseCases::new(
        Arc::new(BackendAuthGateway::new(api.clone())),
        session.clone(),
        notifier,
        normalizer,
    );
    debug!(api_url = %config.api_url, "app state ready");

    AppState {
        config: Arc::new(config),
        api,
        session,
        navigator,
        normalizer,
        auth_use_cases: Arc::new(auth_use_cases),
    }
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "authgate=info,authgate_sdk=info".into());

    // Console (pretty logs); stdout is reserved for command output
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .pretty();

    // File (structured JSON logs)
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| InfraError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        app_error::AppError, error_handler::is_transport_failure, forms::LoginForm,
        guard::{GuardOutcome, ProtectedRoute}, language::UserLanguage, runtime_env::RuntimeEnv,
        session::SessionState,
    };
    use crate::test_utils::{Notice, RecordingNotifier, credential, temp_dir, user};
    use authgate_sdk::{ClientError, MemoryStorage, NavigationKind, UserId};
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use url::Url;

    async fn spawn_backend(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/users/login",
                post(|| async {
                    Json(json!({
                        "success": true,
                        "user": { "id": 1, "email": "a@b.com", "name": "A" },
                        "access_token": "tok123"
                    }))
                }),
            )
            .route(
                "/reports",
                get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "expired" }))) }),
            )
    }

    fn config(api_url: Url) -> AppConfig {
        AppConfig {
            api_url,
            env: RuntimeEnv::Production,
            language: UserLanguage::En,
            ..AppConfig::default()
        }
    }

    fn state(api_url: Url, storage: Arc<dyn SessionStorage>) -> (AppState, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let state = build_app_state(config(api_url), Client::new(), storage, notifier.clone());
        (state, notifier)
    }

    #[tokio::test]
    async fn test_login_end_to_end() {
        let (state, notifier) = state(
            spawn_backend(backend()).await,
            Arc::new(MemoryStorage::new()),
        );

        let user = state
            .auth_use_cases
            .login(&LoginForm::new("a@b.com", "longenough1"))
            .await
            .unwrap();

        assert_eq!(user.id, UserId::Numeric(1));
        assert_eq!(state.api.tokens().get_credential(), Some(credential("tok123")));
        assert!(matches!(state.session.state(), SessionState::Authenticated { .. }));
        assert_eq!(state.navigator.current(), "/");
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success("Signed in successfully".into())]
        );
        assert_eq!(ProtectedRoute::new(&state.session).evaluate(), GuardOutcome::Render);
    }

    #[tokio::test]
    async fn test_unauthorized_call_clears_session_and_hard_redirects() {
        let storage = Arc::new(MemoryStorage::new());
        TokenStore::new(storage.clone())
            .set_session(&credential("stale"), &user())
            .unwrap();
        let (state, _) = state(spawn_backend(backend()).await, storage.clone());
        assert!(state.session.is_auth());

        let error = state.api.get::<Value>("/reports").await.unwrap_err();
        state.session.refresh();

        assert_eq!(error, ClientError::AuthRequired);
        assert!(storage.is_empty());
        assert!(!state.session.is_auth());
        assert_eq!(
            state.navigator.log(),
            vec![(NavigationKind::Assign, "/auth".to_string())]
        );
        let normalized = state.normalizer.normalize(&AppError::from(error));
        assert_eq!(normalized.status, 401);
        assert_eq!(normalized.message, "Authentication required");
    }

    #[tokio::test]
    async fn test_connection_failure_is_normalized_to_status_zero() {
        // Bind and drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let (state, notifier) = state(
            Url::parse(&format!("http://{addr}")).unwrap(),
            Arc::new(MemoryStorage::new()),
        );

        let error = state
            .auth_use_cases
            .login(&LoginForm::new("a@b.com", "longenough1"))
            .await
            .unwrap_err();

        let normalized = state.normalizer.normalize(&error);
        assert!(is_transport_failure(&normalized));
        assert_eq!(
            normalized.message,
            "Could not reach the server. Check your internet connection."
        );
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error(normalized.message.clone())]
        );
    }

    #[tokio::test]
    async fn test_short_password_never_reaches_backend() {
        // Any request would fail with a transport error; validation must stop first.
        let (state, notifier) = state(
            Url::parse("http://127.0.0.1:1").unwrap(),
            Arc::new(MemoryStorage::new()),
        );

        let error = state
            .auth_use_cases
            .login(&LoginForm::new("a@b.com", "short"))
            .await
            .unwrap_err();

        match error {
            AppError::Validation(fields) => assert_eq!(
                fields.get("password"),
                Some("Password must be at least 8 characters")
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(notifier.notices().is_empty());
        assert!(state.navigator.log().is_empty());
    }

    #[test]
    fn test_init_app_state_uses_session_file() {
        let dir = temp_dir();
        let path = dir.path().join("nested/session.json");
        let storage_config = AppConfig {
            session_file: path.clone(),
            ..AppConfig::default()
        };
        let state = init_app_state(storage_config, Arc::new(RecordingNotifier::new())).unwrap();

        assert!(path.parent().unwrap().exists());
        assert!(!state.session.is_loading());
        assert!(!state.session.is_auth());
    }
}
