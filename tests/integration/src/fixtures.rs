//! Test fixtures and data generators
//!
//! Backend payloads in the shapes the blog API returns.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const JANE_ID: i64 = 7;
pub const JANE_TOKEN: &str = "tok-jane";
pub const JANE_PASSWORD: &str = "secret1";
pub const JOHN_ID: i64 = 99;

/// Login response body
pub fn login_response(token: &str, id: i64, username: &str) -> Value {
    json!({ "token": token, "id": id, "username": username })
}

/// Error body as the backend sends it
pub fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

/// A post as returned by the backend
#[derive(Debug, Clone)]
pub struct PostFixture {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub author_id: i64,
    pub likes: u32,
    pub dislikes: u32,
    pub is_liked: bool,
    pub is_disliked: bool,
}

impl PostFixture {
    /// Text post written by john with no reactions
    pub fn by_john(id: i64) -> Self {
        Self {
            id,
            title: format!("Post {}", unique_suffix()),
            author: "john".to_string(),
            author_id: JOHN_ID,
            likes: 0,
            dislikes: 0,
            is_liked: false,
            is_disliked: false,
        }
    }

    pub fn reactions(mut self, likes: u32, dislikes: u32) -> Self {
        self.likes = likes;
        self.dislikes = dislikes;
        self
    }

    pub fn liked(mut self) -> Self {
        self.is_liked = true;
        self
    }

    pub fn disliked(mut self) -> Self {
        self.is_disliked = true;
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "content": format!("Content of {}", self.title),
            "author": self.author,
            "authorId": self.author_id,
            "date": "2024-05-01",
            "mediaType": "TEXT",
            "mediaUrls": null,
            "likes": self.likes,
            "dislikes": self.dislikes,
            "isLiked": self.is_liked,
            "isDisliked": self.is_disliked,
        })
    }
}

/// Post list wrapped the way `/posts/allPost` returns it
pub fn posts_envelope(posts: &[PostFixture]) -> Value {
    json!({ "posts": posts.iter().map(PostFixture::to_json).collect::<Vec<_>>() })
}
