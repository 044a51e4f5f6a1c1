//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidMedia(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Not post author")]
    NotPostAuthor,

    #[error("Cannot react to your own post")]
    SelfReaction,

    // =========================================================================
    // Remote / Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Remote(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidMedia(_) => "INVALID_MEDIA",

            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::SelfReaction => "SELF_REACTION",

            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Remote(_) => "REMOTE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidMedia(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::NotPostAuthor | Self::SelfReaction
        )
    }

    /// Check if this error came from the backend or the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::Remote(_))
    }
}
