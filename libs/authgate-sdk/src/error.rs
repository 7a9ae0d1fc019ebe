use authgate_types::ApiError;
use thiserror::Error;

/// Failure of a single request made through the client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Backend answered 401. The session has already been cleared and the
    /// login page requested by the time this is returned.
    #[error("Authentication required")]
    AuthRequired,

    /// The request never produced a response (DNS, connect, reset, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// Backend answered with any other non-2xx status
    #[error("API error: {0}")]
    Application(ApiError),

    /// Request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// 2xx JSON response whose body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by a [`crate::SessionStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
