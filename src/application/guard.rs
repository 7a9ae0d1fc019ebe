use std::sync::{Arc, Weak};

use authgate_sdk::{LOGIN_PATH, Navigator};
use tokio::sync::watch;
use tracing::debug;

use crate::application::session::{SessionContext, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still hydrating; show the loading indicator.
    Waiting,
    /// Visitor sent to the login page.
    Redirected,
    /// Authenticated, show the protected content.
    Render,
}

/// Gate in front of pages that need a signed-in user.
pub struct ProtectedRoute {
    session: Weak<SessionContext>,
    navigator: Arc<dyn Navigator>,
    status_rx: watch::Receiver<SessionStatus>,
}

impl ProtectedRoute {
    pub fn new(session: &Arc<SessionContext>) -> Self {
        Self {
            session: Arc::downgrade(session),
            navigator: session.navigator(),
            status_rx: session.subscribe(),
        }
    }

    /// Never navigates while loading. The redirect replaces the current
    /// history entry so "back" does not return to the gated page.
    pub fn evaluate(&self) -> GuardOutcome {
        let (is_loading, is_auth) = match self.session.upgrade() {
            Some(session) => (session.is_loading(), session.is_auth()),
            None => (false, false),
        };
        let outcome = if is_loading {
            GuardOutcome::Waiting
        } else if !is_auth {
            self.navigator.replace(LOGIN_PATH);
            GuardOutcome::Redirected
        } else {
            GuardOutcome::Render
        };
        debug!(?outcome, "protected route evaluated");
        outcome
    }

    /// Waits for the next session change and re-evaluates. `None` once the
    /// session is gone.
    pub async fn changed(&mut self) -> Option<GuardOutcome> {
        self.status_rx.changed().await.ok()?;
        Some(self.evaluate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{credential, seeded_tokens, user};
    use authgate_sdk::{HistoryNavigator, MemoryStorage, NavigationKind, TokenStore};

    fn empty_session() -> (Arc<SessionContext>, Arc<HistoryNavigator>) {
        let nav = Arc::new(HistoryNavigator::new("/reports"));
        let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
        (Arc::new(SessionContext::new(tokens, nav.clone())), nav)
    }

    #[test]
    fn test_waits_while_loading_without_navigating() {
        let (session, nav) = empty_session();
        let guard = ProtectedRoute::new(&session);
        assert_eq!(guard.evaluate(), GuardOutcome::Waiting);
        assert!(nav.log().is_empty());
    }

    #[test]
    fn test_redirects_with_replace_when_unauthenticated() {
        let (session, nav) = empty_session();
        session.hydrate();
        let guard = ProtectedRoute::new(&session);

        assert_eq!(guard.evaluate(), GuardOutcome::Redirected);
        assert_eq!(nav.entries(), vec!["/auth"]);
        assert_eq!(
            nav.log(),
            vec![(NavigationKind::Replace, "/auth".to_string())]
        );
    }

    #[test]
    fn test_renders_when_authenticated() {
        let (tokens, nav) = seeded_tokens("abc", user());
        let session = Arc::new(SessionContext::restore(tokens, nav.clone()));
        let guard = ProtectedRoute::new(&session);
        assert_eq!(guard.evaluate(), GuardOutcome::Render);
        assert!(nav.log().is_empty());
    }

    #[tokio::test]
    async fn test_reevaluates_on_session_change() {
        let (session, nav) = empty_session();
        let mut guard = ProtectedRoute::new(&session);
        assert_eq!(guard.evaluate(), GuardOutcome::Waiting);

        session.hydrate();
        assert_eq!(guard.changed().await, Some(GuardOutcome::Redirected));

        session.login(credential("abc"), user());
        assert_eq!(guard.changed().await, Some(GuardOutcome::Render));
        assert_eq!(nav.hard_loads(), 0);
    }

    #[tokio::test]
    async fn test_changed_ends_when_session_dropped() {
        let (session, _nav) = empty_session();
        let mut guard = ProtectedRoute::new(&session);
        drop(session);
        assert_eq!(guard.changed().await, None);
    }
}
