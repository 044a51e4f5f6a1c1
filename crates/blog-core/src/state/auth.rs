//! Auth slice

use crate::entities::Session;
use crate::value_objects::EntityId;

use super::action::Action;

/// Authentication state of the current user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub user: Option<Session>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Id of the logged-in user
    pub fn user_id(&self) -> Option<EntityId> {
        self.user.as_ref().map(|user| user.id)
    }

    pub fn reduce(mut self, action: &Action) -> Self {
        match action {
            Action::AuthStart => {
                self.loading = true;
                self.error = None;
            }
            Action::AuthFailure(message) => {
                self.loading = false;
                self.error = Some(message.clone());
            }
            Action::LoginSuccess(user) => {
                self.loading = false;
                self.is_authenticated = user.is_some();
                self.user = user.clone();
                self.error = None;
            }
            Action::Logout => self = Self::default(),
            _ => {}
        }
        self
    }
}
