//! User entities - session and authentication inputs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::EntityId;

/// Logged-in user, as persisted between runs
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub id: EntityId,
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, id: EntityId, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            id,
            username: username.into(),
        }
    }
}

// Keep the token out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Login input
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Sign-up input
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
