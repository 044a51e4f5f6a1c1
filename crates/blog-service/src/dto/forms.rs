//! Form input DTOs
//!
//! All forms implement `Validate`; services validate before any request is sent.

use std::fmt;

use blog_core::{Credentials, EntityId, MediaType, NewPost, PostUpdate, Registration};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Forms
// ============================================================================

/// Sign-up form
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[validate(length(min = 2, message = "User Name must be at least 2 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords don't match"))]
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn to_registration(&self) -> Registration {
        Registration {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login form
#[derive(Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Post Forms
// ============================================================================

/// Create or edit post form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub media_type: MediaType,

    /// URLs returned by a media upload
    #[serde(default)]
    pub media_urls: Vec<String>,
}

impl PostForm {
    /// Text post; title and content are trimmed
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
            media_type: MediaType::Text,
            media_urls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_media(mut self, media_type: MediaType, media_urls: Vec<String>) -> Self {
        self.media_type = media_type;
        self.media_urls = media_urls;
        self
    }

    fn media_urls(&self) -> Option<Vec<String>> {
        (!self.media_urls.is_empty()).then(|| self.media_urls.clone())
    }

    pub fn to_new_post(&self) -> NewPost {
        NewPost {
            title: self.title.clone(),
            content: self.content.clone(),
            media_type: self.media_type,
            media_urls: self.media_urls(),
        }
    }

    pub fn to_update(&self, post_id: EntityId) -> PostUpdate {
        PostUpdate {
            post_id,
            title: self.title.clone(),
            content: self.content.clone(),
            media_type: self.media_type,
            media_urls: self.media_urls(),
        }
    }
}
