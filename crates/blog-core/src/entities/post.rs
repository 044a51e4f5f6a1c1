//! Post entity - a blog post as returned by the backend

use serde::{Deserialize, Deserializer, Serialize};

use super::media::MediaType;
use super::reaction::PostReactions;
use crate::value_objects::EntityId;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Display name of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub author_id: Option<EntityId>,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media_urls: Vec<String>,
    #[serde(flatten)]
    pub reactions: PostReactions,
}

impl Post {
    /// Create a text post with no reactions
    pub fn new(id: EntityId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            preview: None,
            author: None,
            author_id: None,
            date: None,
            media_type: MediaType::Text,
            media_urls: Vec::new(),
            reactions: PostReactions::default(),
        }
    }

    /// Set the author id
    pub fn with_author(mut self, author_id: EntityId, author: impl Into<String>) -> Self {
        self.author_id = Some(author_id);
        self.author = Some(author.into());
        self
    }

    /// Set the reaction state
    pub fn with_reactions(mut self, reactions: PostReactions) -> Self {
        self.reactions = reactions;
        self
    }

    /// Check if the given user wrote this post
    #[inline]
    pub fn is_authored_by(&self, user_id: EntityId) -> bool {
        self.author_id == Some(user_id)
    }

    /// Short text for list views: the preview if present, otherwise the start of the content
    pub fn summary(&self, max_chars: usize) -> String {
        match &self.preview {
            Some(preview) if !preview.is_empty() => preview.clone(),
            _ => {
                let mut summary: String = self.content.chars().take(max_chars).collect();
                if self.content.chars().count() > max_chars {
                    summary.push_str("...");
                }
                summary
            }
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Input for creating a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub media_type: MediaType,
    pub media_urls: Option<Vec<String>>,
}

/// Input for updating an existing post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub post_id: EntityId,
    pub title: String,
    pub content: String,
    pub media_type: MediaType,
    pub media_urls: Option<Vec<String>>,
}
