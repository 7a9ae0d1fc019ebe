//! Navigation port used for the redirects the session layer triggers.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Login entry point.
pub const LOGIN_PATH: &str = "/auth";

/// Landing page after a successful login.
pub const HOME_PATH: &str = "/";

/// How a navigation affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// New history entry
    Push,
    /// Overwrite the current entry so the previous page cannot be returned to
    Replace,
    /// Full page load, discarding in-memory state
    Assign,
}

pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
    /// Hard navigation.
    fn assign(&self, path: &str);
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    log: Vec<(NavigationKind, String)>,
}

/// In-process history stack.
///
/// Behaves like a browser tab's session history: `push` appends, `replace`
/// overwrites the top entry, `assign` appends and counts as a full load.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<History>,
}

impl HistoryNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![start.to_string()],
                log: Vec::new(),
            }),
        }
    }

    pub fn current(&self) -> String {
        let history = self.lock();
        history.entries.last().cloned().unwrap_or_default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    /// Every navigation performed, oldest first.
    pub fn log(&self) -> Vec<(NavigationKind, String)> {
        self.lock().log.clone()
    }

    pub fn hard_loads(&self) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|(kind, _)| *kind == NavigationKind::Assign)
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, kind: NavigationKind, path: &str) {
        debug!(?kind, path, "navigate");
        let mut history = self.lock();
        match kind {
            NavigationKind::Push | NavigationKind::Assign => {
                history.entries.push(path.to_string());
            }
            NavigationKind::Replace => match history.entries.last_mut() {
                Some(top) => *top = path.to_string(),
                None => history.entries.push(path.to_string()),
            },
        }
        history.log.push((kind, path.to_string()));
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        self.record(NavigationKind::Push, path);
    }

    fn replace(&self, path: &str) {
        self.record(NavigationKind::Replace, path);
    }

    fn assign(&self, path: &str) {
        self.record(NavigationKind::Assign, path);
    }
}
