//! Application services
//!
//! Services read and write the shared `AppStore`, call the backend through the
//! gateways held by `ServiceContext` and report outcomes to the `Notifier`.

pub mod auth;
pub mod context;
pub mod error;
pub mod media;
pub mod notify;
pub mod post;
pub mod reaction;
pub mod readiness;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use media::MediaService;
pub use notify::{ChannelNotifier, Notification, NotificationLevel, TracingNotifier};
pub use post::PostService;
pub use reaction::{PendingReaction, ReactionLedger, ReactionOutcome, ReactionService};
pub use readiness::{GateHandle, GateOutcome, ReadinessGate};
pub use store::AppStore;
