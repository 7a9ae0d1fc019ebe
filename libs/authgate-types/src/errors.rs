use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured error returned by the backend for a non-2xx response.
///
/// `status` always comes from the HTTP response; the remaining fields are
/// whatever the body supplied. A body that cannot be decoded leaves them
/// all empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: Option<String>,
    pub details: Option<Value>,
    pub path: Option<String>,
    pub method: Option<String>,
    pub timestamp: Option<String>,
}

/// Wire shape: `{ message | error, statusCode, details?, path?, method?, timestamp? }`.
/// `statusCode` is ignored in favour of the response status.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ErrorBody {
    message: Option<MessageField>,
    error: Option<String>,
    details: Option<Value>,
    path: Option<String>,
    method: Option<String>,
    timestamp: Option<String>,
}

/// Validation pipes on the backend report a list of messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    Single(String),
    Many(Vec<String>),
}

impl MessageField {
    fn into_text(self) -> String {
        match self {
            Self::Single(message) => message,
            Self::Many(messages) => messages.join("; "),
        }
    }
}

impl ApiError {
    /// Error carrying only the HTTP status.
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            message: None,
            details: None,
            path: None,
            method: None,
            timestamp: None,
        }
    }

    /// Decodes a response body, falling back to [`ApiError::from_status`]
    /// when the body is not a JSON object.
    pub fn from_body(status: u16, body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
            return Self::from_status(status);
        };

        let message = parsed
            .message
            .map(MessageField::into_text)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| parsed.error.filter(|e| !e.trim().is_empty()));

        Self {
            status,
            message,
            details: parsed.details,
            path: parsed.path,
            method: parsed.method,
            timestamp: parsed.timestamp,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} - {}", self.status, message),
            None => write!(f, "{}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_full() {
        let body = json!({
            "message": "Email already in use",
            "statusCode": 409,
            "details": {"field": "email"},
            "path": "/users",
            "method": "POST",
            "timestamp": "2024-01-15T10:30:00Z"
        })
        .to_string();

        let error = ApiError::from_body(409, &body);
        assert_eq!(error.status, 409);
        assert_eq!(error.message.as_deref(), Some("Email already in use"));
        assert_eq!(error.details, Some(json!({"field": "email"})));
        assert_eq!(error.path.as_deref(), Some("/users"));
        assert_eq!(error.method.as_deref(), Some("POST"));
        assert_eq!(error.timestamp.as_deref(), Some("2024-01-15T10:30:00Z"));
    }

    #[test]
    fn test_from_body_uses_error_field_when_message_missing() {
        let error = ApiError::from_body(404, r#"{"error": "Not Found", "statusCode": 404}"#);
        assert_eq!(error.message.as_deref(), Some("Not Found"));
    }

    #[test]
    fn test_from_body_joins_message_list() {
        let error = ApiError::from_body(
            400,
            r#"{"message": ["email must be an email", "password too short"], "error": "Bad Request"}"#,
        );
        assert_eq!(
            error.message.as_deref(),
            Some("email must be an email; password too short")
        );
    }

    #[test]
    fn test_from_body_garbage_keeps_status_only() {
        let error = ApiError::from_body(502, "<html>Bad gateway</html>");
        assert_eq!(error, ApiError::from_status(502));
    }

    #[test]
    fn test_status_comes_from_response_not_body() {
        let error = ApiError::from_body(500, r#"{"message": "boom", "statusCode": 418}"#);
        assert_eq!(error.status, 500);
    }

    #[test]
    fn test_blank_message_is_dropped() {
        let error = ApiError::from_body(400, r#"{"message": "   "}"#);
        assert!(error.message.is_none());
    }
}
