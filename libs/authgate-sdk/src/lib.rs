//! Client-side session plumbing for authgate.
//!
//! # Features
//!
//! - **Token store** - Persist the bearer credential and user record behind a
//!   pluggable [`SessionStorage`] capability
//! - **Navigation** - A [`Navigator`] port for the redirects the client triggers
//! - **Request client** - [`ApiClient`] injects the credential, interprets the
//!   response status and reports failures as a tagged [`ClientError`]
//!   (requires the `client` feature, on by default)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use authgate_sdk::{ApiClient, ApiConfig, HistoryNavigator, MemoryStorage, TokenStore};
//!
//! let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
//! let client = ApiClient::new(
//!     ApiConfig { base_url: "http://localhost:5000".parse()? },
//!     reqwest::Client::new(),
//!     tokens,
//!     Arc::new(HistoryNavigator::new("/")),
//! );
//!
//! let profile: serde_json::Value = client.get("/users/me").await?;
//! ```

#[cfg(feature = "client")]
mod client;
mod error;
mod headers;
mod navigation;
mod storage;
mod token_store;

#[cfg(feature = "client")]
pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, ClientResult, StorageError};
pub use headers::{extract_bearer, format_bearer};
pub use navigation::{HOME_PATH, HistoryNavigator, LOGIN_PATH, NavigationKind, Navigator};
pub use storage::{MemoryStorage, NoopStorage, SessionStorage};
pub use token_store::{TOKEN_KEY, TokenStore, USER_KEY};

// Re-export shared types for convenience
pub use authgate_types::{
    ApiError, Credential, LoginRequest, LoginResponse, SignupRequest, SignupResponse, User,
    UserId,
};
