//! Shared types for the authgate client.
//!
//! This crate provides:
//! - The persisted session record (`User`, `UserId`, `Credential`)
//! - The structured error body returned by the backend (`ApiError`)
//! - Login and signup request/response shapes

mod credential;
mod errors;
mod requests;
mod responses;
mod user;

pub use credential::Credential;
pub use errors::ApiError;
pub use requests::{LoginRequest, SignupRequest};
pub use responses::{LoginResponse, SignupResponse};
pub use user::{User, UserId};
