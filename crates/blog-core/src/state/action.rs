//! Actions - every state change of the application goes through one of these

use crate::entities::{Post, ReactionKind, Session};
use crate::value_objects::EntityId;

use super::posts::ReactionSnapshot;
use super::readiness::ReadinessState;

/// All actions understood by the application reducers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // =========================================================================
    // Auth
    // =========================================================================
    AuthStart,
    AuthFailure(String),
    /// `None` leaves the user logged out
    LoginSuccess(Option<Session>),
    Logout,

    // =========================================================================
    // Posts
    // =========================================================================
    FetchPostsStart,
    FetchPostsSuccess(Vec<Post>),
    FetchPostsFailure(String),
    SetCurrentPost(Option<Post>),
    UpsertPost(Post),
    RemovePost(EntityId),

    // =========================================================================
    // Reactions
    // =========================================================================
    /// Optimistic toggle of the current user's reaction
    ApplyReaction {
        post_id: EntityId,
        kind: ReactionKind,
    },
    /// Put back the reaction state captured before a toggle
    RestoreReactions {
        post_id: EntityId,
        snapshot: ReactionSnapshot,
    },

    // =========================================================================
    // Readiness
    // =========================================================================
    ReadinessChanged(ReadinessState),
}

impl Action {
    /// Action name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthStart => "auth_start",
            Self::AuthFailure(_) => "auth_failure",
            Self::LoginSuccess(_) => "login_success",
            Self::Logout => "logout",
            Self::FetchPostsStart => "fetch_posts_start",
            Self::FetchPostsSuccess(_) => "fetch_posts_success",
            Self::FetchPostsFailure(_) => "fetch_posts_failure",
            Self::SetCurrentPost(_) => "set_current_post",
            Self::UpsertPost(_) => "upsert_post",
            Self::RemovePost(_) => "remove_post",
            Self::ApplyReaction { .. } => "apply_reaction",
            Self::RestoreReactions { .. } => "restore_reactions",
            Self::ReadinessChanged(_) => "readiness_changed",
        }
    }
}
