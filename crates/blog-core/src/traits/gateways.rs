//! Gateway traits (ports) - define the interface to the blog backend
//!
//! The domain layer defines what it needs from the outside world,
//! and the API client crate provides the HTTP implementation.

use async_trait::async_trait;

use crate::entities::{
    Credentials, MediaFile, NewPost, Post, PostUpdate, ReactionKind, Registration, Session,
    UploadedMedia,
};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, DomainError>;

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Succeeds when the backend answers its health endpoint
    async fn health_check(&self) -> GatewayResult<()>;
}

// ============================================================================
// Reactions
// ============================================================================

#[async_trait]
pub trait ReactionGateway: Send + Sync {
    /// Set or switch the user's reaction on a post
    async fn react_to_post(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> GatewayResult<()>;

    /// Remove the user's reaction from a post
    async fn remove_reaction(&self, post_id: EntityId, user_id: EntityId) -> GatewayResult<()>;
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
pub trait PostGateway: Send + Sync {
    /// List all posts
    async fn list_posts(&self) -> GatewayResult<Vec<Post>>;

    /// Fetch a single post, with reaction flags for `viewer` when given
    async fn get_post(&self, post_id: EntityId, viewer: Option<EntityId>) -> GatewayResult<Post>;

    /// Create a post; returns the stored post when the backend echoes it
    async fn create_post(&self, post: &NewPost) -> GatewayResult<Option<Post>>;

    /// Update a post; returns the stored post when the backend echoes it
    async fn update_post(&self, update: &PostUpdate) -> GatewayResult<Option<Post>>;

    /// Delete a post
    async fn delete_post(&self, post_id: EntityId) -> GatewayResult<()>;
}

// ============================================================================
// Authentication
// ============================================================================

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account
    async fn register(&self, registration: &Registration) -> GatewayResult<()>;

    /// Exchange credentials for a session
    async fn login(&self, credentials: &Credentials) -> GatewayResult<Session>;
}

// ============================================================================
// Media
// ============================================================================

#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Upload one or more files
    async fn upload(&self, files: &[MediaFile]) -> GatewayResult<UploadedMedia>;
}

// ============================================================================
// Notifications
// ============================================================================

/// Fire-and-forget user notifications (toasts)
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);

    fn notify_success(&self, message: &str);
}
