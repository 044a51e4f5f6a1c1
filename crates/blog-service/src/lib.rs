//! # blog-service
//!
//! Application layer: the readiness gate, the reaction reconciler, the
//! state container and the post/auth/media use cases.

pub mod dto;
pub mod services;

pub use dto::{LoginForm, PostForm, RegistrationForm};
pub use services::{
    AppStore, AuthService, ChannelNotifier, GateHandle, GateOutcome, MediaService, Notification,
    NotificationLevel, PendingReaction, PostService, ReactionLedger, ReactionOutcome, ReactionService,
    ReadinessGate, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    TracingNotifier,
};
