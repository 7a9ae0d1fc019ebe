use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer token issued by the backend.
///
/// Never empty. `Debug` output is redacted; use [`Credential::expose`] only
/// where the raw value has to leave the process (storage, the
/// `Authorization` header).
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wraps a raw token. Returns `None` for an empty string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw: String = raw.into();
        if raw.is_empty() {
            return None;
        }
        Some(Self(SecretString::from(raw)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}
