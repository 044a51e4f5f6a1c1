//! Request bodies, camelCase on the wire

use blog_core::{EntityId, MediaType, NewPost, PostUpdate, ReactionKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostRequest {
    pub post_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
}

/// `mediaUrls` is sent as `null` when there is no media
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub media_type: MediaType,
    pub media_urls: Option<&'a [String]>,
}

impl<'a> From<&'a NewPost> for CreatePostRequest<'a> {
    fn from(post: &'a NewPost) -> Self {
        Self {
            title: &post.title,
            content: &post.content,
            media_type: post.media_type,
            media_urls: post.media_urls.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest<'a> {
    pub post_id: EntityId,
    pub title: &'a str,
    pub content: &'a str,
    pub media_type: MediaType,
    pub media_urls: Option<&'a [String]>,
}

impl<'a> From<&'a PostUpdate> for UpdatePostRequest<'a> {
    fn from(update: &'a PostUpdate) -> Self {
        Self {
            post_id: update.post_id,
            title: &update.title,
            content: &update.content,
            media_type: update.media_type,
            media_urls: update.media_urls.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: EntityId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    pub post_id: EntityId,
    pub user_id: EntityId,
    pub reaction_type: ReactionKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReactionRequest {
    pub post_id: EntityId,
    pub user_id: EntityId,
}
