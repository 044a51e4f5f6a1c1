//! # blog-core
//!
//! Domain layer containing entities, value objects, gateway traits and the
//! reducer-style application state.
//! This crate has zero dependencies on infrastructure (HTTP client, storage, runtime).

pub mod entities;
pub mod error;
pub mod state;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Credentials, MediaFile, MediaType, NewPost, Post, PostReactions, PostUpdate, ReactionCall,
    ReactionIntent, ReactionKind, Registration, Session, UploadedMedia,
};
pub use error::DomainError;
pub use state::{
    Action, AppState, AuthState, PostsState, ReactionSnapshot, ReadinessPhase, ReadinessState,
};
pub use traits::{
    AuthGateway, GatewayResult, HealthProbe, MediaGateway, Notifier, PostGateway,
    ReactionGateway,
};
pub use value_objects::{EntityId, EntityIdParseError};
