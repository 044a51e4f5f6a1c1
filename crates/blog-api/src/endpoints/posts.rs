//! /posts endpoints

use async_trait::async_trait;
use blog_core::{EntityId, GatewayResult, NewPost, Post, PostGateway, PostUpdate};
use reqwest::Method;

use super::auth::to_body;
use crate::client::{ApiClient, RequestOptions};
use crate::dto::{
    CreatePostRequest, DeletePostRequest, GetPostRequest, PostPayload, PostsPayload,
    UpdatePostRequest,
};

#[async_trait]
impl PostGateway for ApiClient {
    async fn list_posts(&self) -> GatewayResult<Vec<Post>> {
        let payload: PostsPayload = self
            .request(
                Method::GET,
                "/posts/allPost",
                None,
                RequestOptions::new("Failed to fetch posts"),
            )
            .await?;
        Ok(payload.into_posts())
    }

    async fn get_post(&self, post_id: EntityId, viewer: Option<EntityId>) -> GatewayResult<Post> {
        let body = to_body(GetPostRequest {
            post_id,
            user_id: viewer,
        })?;

        let payload: PostPayload = self
            .request(
                Method::POST,
                "/posts/getPost",
                Some(body),
                RequestOptions::new("Failed to fetch post").authenticated(),
            )
            .await?;
        Ok(payload.into_post())
    }

    async fn create_post(&self, post: &NewPost) -> GatewayResult<Option<Post>> {
        let body = to_body(CreatePostRequest::from(post))?;

        let raw = self
            .send(
                Method::POST,
                "/posts/createPost",
                Some(body),
                RequestOptions::new("Failed to create post").attach_user(),
            )
            .await?;

        tracing::info!(title = %post.title, media_type = %post.media_type, "Post created");
        Ok(PostPayload::lenient(&raw))
    }

    async fn update_post(&self, update: &PostUpdate) -> GatewayResult<Option<Post>> {
        let body = to_body(UpdatePostRequest::from(update))?;

        let raw = self
            .send(
                Method::PUT,
                "/posts/updatePost",
                Some(body),
                RequestOptions::new("Failed to update post").authenticated(),
            )
            .await?;

        tracing::info!(post_id = %update.post_id, "Post updated");
        Ok(PostPayload::lenient(&raw))
    }

    async fn delete_post(&self, post_id: EntityId) -> GatewayResult<()> {
        let body = to_body(DeletePostRequest { post_id })?;

        self.request_unit(
            Method::DELETE,
            "/posts/deletePost",
            Some(body),
            RequestOptions::new("Failed to delete post").authenticated(),
        )
        .await?;

        tracing::info!(post_id = %post_id, "Post deleted");
        Ok(())
    }
}
