use serde::{Deserialize, Serialize};

use crate::User;

/// Response of `POST /users/login`.
///
/// Every field is optional on the wire; callers decide what a usable
/// response looks like.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: bool,
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub message: Option<String>,
}

/// Response of `POST /users`.
///
/// `access_token` is present when the backend logs the new account in
/// straight away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupResponse {
    pub success: bool,
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub message: Option<String>,
}
