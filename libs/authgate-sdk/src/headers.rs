//! `Authorization` header helpers.

use authgate_types::Credential;

/// Render a credential as an `Authorization` header value.
pub fn format_bearer(credential: &Credential) -> String {
    format!("Bearer {}", credential.expose())
}

/// Extract the token from an `Authorization: Bearer` header value.
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}
