//! Response bodies
//!
//! The backend is not consistent about envelopes, so list and single-post
//! payloads accept both bare and wrapped shapes.

use blog_core::{EntityId, Post, Session};
use serde::Deserialize;
use serde_json::Value;

/// Successful login
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(alias = "userId")]
    pub id: EntityId,
    #[serde(default)]
    pub username: Option<String>,
}

impl LoginResponse {
    /// Build the session record; `fallback_username` is the name typed at login
    pub fn into_session(self, fallback_username: &str) -> Session {
        let username = self
            .username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback_username.to_string());
        Session::new(self.token, self.id, username)
    }
}

/// Post list payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostsPayload {
    List(Vec<Post>),
    Posts { posts: Vec<Post> },
    Data { data: Vec<Post> },
}

impl PostsPayload {
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            Self::List(posts) | Self::Posts { posts } | Self::Data { data: posts } => posts,
        }
    }
}

/// Single post payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostPayload {
    Bare(Box<Post>),
    Post { post: Box<Post> },
    Data { data: Box<Post> },
}

impl PostPayload {
    pub fn into_post(self) -> Post {
        match self {
            Self::Bare(post) | Self::Post { post } | Self::Data { data: post } => *post,
        }
    }

    /// Decode a post echoed by a write call; anything else yields `None`
    pub fn lenient(raw: &str) -> Option<Post> {
        serde_json::from_str::<Self>(raw).ok().map(Self::into_post)
    }
}

/// Media upload result
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub media_urls: Value,
}

impl UploadResponse {
    /// Uploaded URLs; a missing or non-array field yields none
    pub fn urls(&self) -> Vec<String> {
        self.media_urls
            .as_array()
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
