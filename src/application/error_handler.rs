//! Turns every failure the client can see into one [`NormalizedError`]
//! with a localized, user-facing message.

use authgate_sdk::{ApiError, ClientError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::application::{
    app_error::AppError,
    dictionaries::{MessageKey, text},
    language::UserLanguage,
    runtime_env::RuntimeEnv,
};

/// Canonical failure shape. `status == 0` means no response reached us.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedError {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl NormalizedError {
    fn bare(status: u16, message: String) -> Self {
        Self {
            message,
            status,
            details: None,
            path: None,
            method: None,
            timestamp: None,
        }
    }
}

/// True when the failure never got a response from the backend.
pub fn is_transport_failure(error: &NormalizedError) -> bool {
    error.status == 0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNormalizer {
    language: UserLanguage,
    env: RuntimeEnv,
}

impl ErrorNormalizer {
    pub fn new(language: UserLanguage, env: RuntimeEnv) -> Self {
        Self { language, env }
    }

    pub fn language(&self) -> UserLanguage {
        self.language
    }

    pub fn normalize(&self, error: &AppError) -> NormalizedError {
        let mut normalized = match error {
            AppError::Client(ClientError::AuthRequired) => {
                NormalizedError::bare(401, self.text(MessageKey::AuthRequired))
            }
            AppError::Client(ClientError::Application(api)) => self.from_api_error(api),
            AppError::Client(ClientError::Transport(_)) => {
                NormalizedError::bare(0, self.text(MessageKey::ConnectionProblem))
            }
            AppError::Client(ClientError::Decode(message))
            | AppError::Client(ClientError::Encode(message))
            | AppError::Message(message) => self.verbatim(message, None),
            AppError::Validation(fields) => {
                let details = fields
                    .iter()
                    .map(|(field, message)| (field.to_string(), Value::from(message)))
                    .collect::<Map<_, _>>();
                self.verbatim(&fields.to_string(), Some(Value::Object(details)))
            }
            AppError::Unknown => self.unknown(),
        };

        if !self.env.is_development() {
            normalized.details = None;
        }
        normalized
    }

    /// User-facing message only.
    pub fn format_message(&self, error: &AppError) -> String {
        self.normalize(error).message
    }

    /// Developer-facing details, only outside production.
    pub fn details(&self, error: &AppError) -> Option<String> {
        if !self.env.is_development() {
            return None;
        }
        match self.normalize(error).details {
            Some(details) => {
                Some(serde_json::to_string_pretty(&details).unwrap_or_else(|_| details.to_string()))
            }
            None => Some(format!("{error:?}")),
        }
    }

    fn from_api_error(&self, api: &ApiError) -> NormalizedError {
        let server_message = api
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        let or_server = |key: MessageKey| server_message.clone().unwrap_or_else(|| self.text(key));

        let message = match api.status {
            400 => or_server(MessageKey::BadRequest),
            401 => self.text(MessageKey::AuthRequired),
            403 => self.text(MessageKey::Forbidden),
            404 => or_server(MessageKey::NotFound),
            409 => or_server(MessageKey::Conflict),
            422 => or_server(MessageKey::ValidationError),
            500 => self.text(MessageKey::ServerError),
            503 => self.text(MessageKey::ServerUnavailable),
            _ => or_server(MessageKey::GenericError),
        };

        NormalizedError {
            message,
            status: api.status,
            details: api.details.clone(),
            path: api.path.clone(),
            method: api.method.clone(),
            timestamp: api.timestamp.clone(),
        }
    }

    fn verbatim(&self, message: &str, details: Option<Value>) -> NormalizedError {
        if message.trim().is_empty() {
            return self.unknown();
        }
        NormalizedError {
            details,
            ..NormalizedError::bare(0, message.to_string())
        }
    }

    fn unknown(&self) -> NormalizedError {
        NormalizedError::bare(0, self.text(MessageKey::UnknownError))
    }

    fn text(&self, key: MessageKey) -> String {
        text(self.language, key)
    }
}
