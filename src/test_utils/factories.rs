use std::sync::Arc;

use authgate_sdk::{Credential, HistoryNavigator, MemoryStorage, TokenStore, User};
use tempfile::TempDir;

pub fn user() -> User {
    User::new(1, "user@example.com", "Bat Erdene")
}

pub fn credential(raw: &str) -> Credential {
    Credential::new(raw).expect("test credential must not be empty")
}

/// Token store already holding a session, plus a navigator parked on `/`.
pub fn seeded_tokens(raw: &str, user: User) -> (TokenStore, Arc<HistoryNavigator>) {
    let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
    tokens
        .set_session(&credential(raw), &user)
        .expect("memory storage never fails");
    (tokens, Arc::new(HistoryNavigator::new("/")))
}

/// Scratch directory, removed when the guard is dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_removed_on_drop() {
        let dir = temp_dir();
        let root = dir.path().to_path_buf();
        std::fs::write(root.join("session.json"), "{}").unwrap();
        assert!(root.exists());

        drop(dir);
        assert!(!root.exists());
    }
}
