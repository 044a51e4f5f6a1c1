//! Application state - slices combined behind pure reducers
//!
//! `AppState::reduce` is the only way state changes; the service layer
//! owns the container and dispatches actions into it.

mod action;
mod auth;
mod posts;
mod readiness;

pub use action::Action;
pub use auth::AuthState;
pub use posts::{PostsState, ReactionSnapshot};
pub use readiness::{ReadinessPhase, ReadinessState, DEFAULT_COUNTDOWN_SECONDS};

/// Complete client state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub posts: PostsState,
    pub readiness: ReadinessState,
}

impl AppState {
    /// Apply an action to every slice
    pub fn reduce(self, action: &Action) -> Self {
        let readiness = match action {
            Action::ReadinessChanged(readiness) => *readiness,
            _ => self.readiness,
        };
        Self {
            auth: self.auth.reduce(action),
            posts: self.posts.reduce(action),
            readiness,
        }
    }
}
