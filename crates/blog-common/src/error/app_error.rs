//! Application error types
//!
//! Unified error handling for the client. Every backend failure ends up as an
//! `AppError` carrying a human readable message.

use blog_core::DomainError;
use serde::Deserialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("User not authenticated")]
    NotAuthenticated,

    // Backend errors
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Local persistence
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// HTTP status reported by the backend, if the request got that far
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error code for logs and notifications
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Api { .. } => "API_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if the backend rejected the request (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }

    /// Check if the backend failed (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| (500..600).contains(&status))
    }

    /// Failures worth retrying later: transport problems and 5xx answers
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ServiceUnavailable(_)) || self.is_server_error()
    }

    /// Convert into the domain error the gateway ports return
    #[must_use]
    pub fn into_domain(self) -> DomainError {
        match self {
            Self::Domain(e) => e,
            Self::NotAuthenticated => DomainError::NotAuthenticated,
            Self::ServiceUnavailable(message) => DomainError::ServiceUnavailable(message),
            Self::Validation(message) | Self::InvalidInput(message) => {
                DomainError::ValidationError(message)
            }
            Self::Storage(message) => DomainError::StorageError(message),
            Self::Internal(e) => DomainError::InternalError(e.to_string()),
            other => DomainError::Remote(other.to_string()),
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        err.into_domain()
    }
}

/// Error body the backend sends with a failed request
///
/// Either field may be present; `error` wins when both are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, tolerating anything that is not the expected JSON
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// First non-empty message carried by the body
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
    }

    /// Pick the message to show: body `error`, body `message`, the transport
    /// message, then the per-operation fallback
    #[must_use]
    pub fn normalize(&self, transport: Option<&str>, fallback: &str) -> String {
        self.message()
            .or_else(|| transport.map(str::trim).filter(|m| !m.is_empty()))
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
