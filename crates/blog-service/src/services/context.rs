//! Service context - dependency container for services
//!
//! Holds the gateways, the state container, the session store and the
//! notification sink needed by services.

use std::sync::Arc;

use blog_api::ApiClient;
use blog_core::{AuthGateway, HealthProbe, MediaGateway, Notifier, PostGateway, ReactionGateway};
use blog_store::SessionStore;

use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionLedger;
use super::store::AppStore;

/// Service context containing all dependencies
///
/// Cloning is cheap; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // State
    store: AppStore,
    sessions: SessionStore,
    reaction_ledger: Arc<ReactionLedger>,

    // Gateways
    health: Arc<dyn HealthProbe>,
    posts: Arc<dyn PostGateway>,
    reactions: Arc<dyn ReactionGateway>,
    auth: Arc<dyn AuthGateway>,
    media: Arc<dyn MediaGateway>,

    // Notifications
    notifier: Arc<dyn Notifier>,
}

impl ServiceContext {
    /// Context backed by the HTTP client for every gateway
    pub fn from_client(client: ApiClient, store: AppStore, notifier: Arc<dyn Notifier>) -> Self {
        let sessions = client.sessions().clone();
        let client = Arc::new(client);

        Self {
            store,
            sessions,
            reaction_ledger: Arc::new(ReactionLedger::default()),
            health: client.clone(),
            posts: client.clone(),
            reactions: client.clone(),
            auth: client.clone(),
            media: client,
            notifier,
        }
    }

    // === State ===

    /// Get the application state container
    pub fn store(&self) -> &AppStore {
        &self.store
    }

    /// Get the persisted session store
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Get the per-post reaction bookkeeping
    pub fn reaction_ledger(&self) -> &ReactionLedger {
        self.reaction_ledger.as_ref()
    }

    // === Gateways ===

    pub fn health(&self) -> Arc<dyn HealthProbe> {
        Arc::clone(&self.health)
    }

    pub fn posts(&self) -> &dyn PostGateway {
        self.posts.as_ref()
    }

    pub fn reactions(&self) -> Arc<dyn ReactionGateway> {
        Arc::clone(&self.reactions)
    }

    pub fn auth(&self) -> &dyn AuthGateway {
        self.auth.as_ref()
    }

    pub fn media(&self) -> &dyn MediaGateway {
        self.media.as_ref()
    }

    // === Notifications ===

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &self.store)
            .field("sessions", &self.sessions)
            .field("gateways", &"...")
            .finish_non_exhaustive()
    }
}

/// Builder for creating a ServiceContext from individual gateways
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<AppStore>,
    sessions: Option<SessionStore>,
    health: Option<Arc<dyn HealthProbe>>,
    posts: Option<Arc<dyn PostGateway>>,
    reactions: Option<Arc<dyn ReactionGateway>>,
    auth: Option<Arc<dyn AuthGateway>>,
    media: Option<Arc<dyn MediaGateway>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: AppStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn health(mut self, health: Arc<dyn HealthProbe>) -> Self {
        self.health = Some(health);
        self
    }

    pub fn posts(mut self, posts: Arc<dyn PostGateway>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn reactions(mut self, reactions: Arc<dyn ReactionGateway>) -> Self {
        self.reactions = Some(reactions);
        self
    }

    pub fn auth(mut self, auth: Arc<dyn AuthGateway>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn media(mut self, media: Arc<dyn MediaGateway>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the ServiceContext
    ///
    /// The store defaults to an empty `AppStore`; every other dependency is required.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            store: self.store.unwrap_or_default(),
            sessions: self
                .sessions
                .ok_or_else(|| ServiceError::validation("sessions is required"))?,
            reaction_ledger: Arc::new(ReactionLedger::default()),
            health: self
                .health
                .ok_or_else(|| ServiceError::validation("health is required"))?,
            posts: self
                .posts
                .ok_or_else(|| ServiceError::validation("posts is required"))?,
            reactions: self
                .reactions
                .ok_or_else(|| ServiceError::validation("reactions is required"))?,
            auth: self
                .auth
                .ok_or_else(|| ServiceError::validation("auth is required"))?,
            media: self
                .media
                .ok_or_else(|| ServiceError::validation("media is required"))?,
            notifier: self
                .notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
        })
    }
}
