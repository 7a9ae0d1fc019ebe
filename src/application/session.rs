//! In-memory session state, hydrated from the token store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use authgate_sdk::{Credential, LOGIN_PATH, Navigator, TokenStore, User};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Authenticated { user: User },
    Unauthenticated,
}

/// What subscribers see on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub is_loading: bool,
    pub is_auth: bool,
}

#[derive(Debug)]
struct Inner {
    credential: Option<Credential>,
    user: Option<User>,
    is_loading: bool,
}

/// Process-wide session. Build one with [`SessionContext::restore`] and share
/// it behind an `Arc`.
pub struct SessionContext {
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    inner: RwLock<Inner>,
    status_tx: watch::Sender<SessionStatus>,
}

impl SessionContext {
    /// Starts in the loading state. Nothing is read until [`Self::hydrate`].
    pub fn new(tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus {
            is_loading: true,
            is_auth: false,
        });
        Self {
            tokens,
            navigator,
            inner: RwLock::new(Inner {
                credential: None,
                user: None,
                is_loading: true,
            }),
            status_tx,
        }
    }

    pub fn restore(tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        let session = Self::new(tokens, navigator);
        session.hydrate();
        session
    }

    /// Loads the persisted session. Only the first call has any effect.
    pub fn hydrate(&self) {
        {
            let mut inner = self.write();
            if !inner.is_loading {
                return;
            }
            let credential = self.tokens.get_credential();
            let user = self.tokens.get_user();
            // A half-written session counts as none.
            if credential.is_some() && user.is_some() {
                inner.credential = credential;
                inner.user = user;
            }
            inner.is_loading = false;
            debug!(authenticated = inner.user.is_some(), "session hydrated");
        }
        self.publish();
    }

    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn login(&self, credential: Credential, user: User) {
        if let Err(e) = self.tokens.set_session(&credential, &user) {
            warn!(error = %e, "failed to persist session");
        }
        {
            let mut inner = self.write();
            inner.credential = Some(credential);
            inner.user = Some(user);
            inner.is_loading = false;
        }
        info!("session started");
        self.publish();
    }

    #[instrument(skip_all)]
    pub fn logout(&self) {
        self.tokens.clear_session();
        {
            let mut inner = self.write();
            inner.credential = None;
            inner.user = None;
            inner.is_loading = false;
        }
        info!("session ended");
        self.publish();
        self.navigator.push(LOGIN_PATH);
    }

    /// Re-syncs the cached values after the token store was changed behind
    /// our back, e.g. by the request client on a 401.
    pub fn refresh(&self) {
        if !self.tokens.is_authenticated() {
            let mut inner = self.write();
            inner.credential = None;
            inner.user = None;
        }
        self.publish();
    }

    /// Always consults the token store, never the cache.
    pub fn is_auth(&self) -> bool {
        self.tokens.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.read().credential.clone()
    }

    pub fn state(&self) -> SessionState {
        let inner = self.read();
        if inner.is_loading {
            return SessionState::Loading;
        }
        match (&inner.user, self.tokens.is_authenticated()) {
            (Some(user), true) => SessionState::Authenticated { user: user.clone() },
            _ => SessionState::Unauthenticated,
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            is_loading: self.is_loading(),
            is_auth: self.is_auth(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.status());
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("inner", &*self.read())
            .finish_non_exhaustive()
    }
}
