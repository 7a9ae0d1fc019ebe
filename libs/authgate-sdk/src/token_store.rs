//! Persistence of the bearer credential and the signed-in user.

use std::sync::Arc;

use authgate_types::{Credential, User};
use tracing::warn;

use crate::error::StorageError;
use crate::storage::SessionStorage;

/// Storage key of the raw bearer credential.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key of the JSON-encoded user record.
pub const USER_KEY: &str = "auth_user";

/// Reads and writes the session pair in a [`SessionStorage`].
///
/// The credential and the user are always written and cleared together.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn SessionStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Persist both values. If either write fails the pair is removed again
    /// and the error returned, so callers can treat the session as unset.
    pub fn set_session(&self, credential: &Credential, user: &User) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(user).map_err(|source| StorageError::Encode {
            key: USER_KEY.to_string(),
            source,
        })?;

        let written = self
            .storage
            .set_item(TOKEN_KEY, credential.expose())
            .and_then(|()| self.storage.set_item(USER_KEY, &encoded));

        if let Err(e) = written {
            warn!(error = %e, "failed to persist session, rolling back");
            self.clear_session();
            return Err(e);
        }

        Ok(())
    }

    pub fn get_credential(&self) -> Option<Credential> {
        self.storage.get_item(TOKEN_KEY).and_then(Credential::new)
    }

    /// Stored user, or `None` when absent or not decodable.
    pub fn get_user(&self) -> Option<User> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user record is malformed, ignoring it");
                None
            }
        }
    }

    pub fn clear_session(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!(error = %e, key, "failed to remove session entry");
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_credential().is_some()
    }
}
