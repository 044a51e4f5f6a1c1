//! Logged-in user record
//!
//! The record is kept under a single key. The last loaded or saved value is
//! cached so request code can read the bearer token without touching disk.

use std::sync::Arc;

use blog_core::Session;
use parking_lot::RwLock;

use crate::backend::{KeyValueStore, StoreResult};

/// Key the session record is stored under
pub const SESSION_KEY: &str = "user";

/// Session store shared by the API client and the services
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &*self.current.read())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a session store over a backend
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Read the persisted record
    ///
    /// A missing, unreadable or malformed record yields `None`; the last two
    /// are logged.
    pub async fn load(&self) -> Option<Session> {
        let session = match self.backend.get(SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed session record");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session record");
                None
            }
        };

        *self.current.write() = session.clone();
        session
    }

    /// Persist a session and make it current
    pub async fn save(&self, session: &Session) -> StoreResult<()> {
        let raw = serde_json::to_string(session)?;
        self.backend.set(SESSION_KEY, raw).await?;
        *self.current.write() = Some(session.clone());

        tracing::debug!(user_id = %session.id, "Session saved");
        Ok(())
    }

    /// Forget the session, in memory and on disk
    pub async fn clear(&self) -> StoreResult<()> {
        *self.current.write() = None;
        if self.backend.delete(SESSION_KEY).await? {
            tracing::debug!("Session cleared");
        }
        Ok(())
    }

    /// Session loaded or saved last
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Bearer token of the current session
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|session| session.token.clone())
            .filter(|token| !token.is_empty())
    }
}
