use std::sync::Arc;

use taskdeck_core::{AccessToken, Session, SessionUser};
use tokio::sync::RwLock;
use tracing::info;

/// Injectable handle to the authenticated session.
///
/// Created once at startup and cloned into every consumer. Signing in
/// or out is visible to all clones.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Creates a signed-out context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that starts signed in.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Stores the session established at login.
    pub async fn sign_in(&self, session: Session) {
        info!(user_id = %session.user().user_id(), "session established");
        *self.inner.write().await = Some(session);
    }

    /// Clears the session at logout or after expiry.
    pub async fn sign_out(&self) {
        if let Some(session) = self.inner.write().await.take() {
            info!(user_id = %session.user().user_id(), "session cleared");
        }
    }

    /// Returns the authenticated user, if any.
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|session| session.user().clone())
    }

    /// Returns the bearer token, if any.
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token().clone())
    }

    /// Returns whether a session is active.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
