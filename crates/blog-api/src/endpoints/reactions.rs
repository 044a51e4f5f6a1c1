//! /postReactions endpoints

use async_trait::async_trait;
use blog_core::{DomainError, EntityId, GatewayResult, ReactionGateway, ReactionKind};
use reqwest::Method;

use super::auth::to_body;
use crate::client::{ApiClient, RequestOptions};
use crate::dto::{ReactRequest, RemoveReactionRequest};

#[async_trait]
impl ReactionGateway for ApiClient {
    async fn react_to_post(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> GatewayResult<()> {
        if post_id.is_zero() || user_id.is_zero() {
            return Err(DomainError::ValidationError(
                "postId, userId and reactionType are required".to_string(),
            ));
        }

        let body = to_body(ReactRequest {
            post_id,
            user_id,
            reaction_type: kind,
        })?;

        self.request_unit(
            Method::POST,
            "/postReactions/reactPost",
            Some(body),
            RequestOptions::new("Failed to react to post").authenticated(),
        )
        .await?;

        tracing::debug!(post_id = %post_id, kind = %kind, "Reaction sent");
        Ok(())
    }

    async fn remove_reaction(&self, post_id: EntityId, user_id: EntityId) -> GatewayResult<()> {
        if post_id.is_zero() || user_id.is_zero() {
            return Err(DomainError::ValidationError(
                "postId and userId are required".to_string(),
            ));
        }

        let body = to_body(RemoveReactionRequest { post_id, user_id })?;

        self.request_unit(
            Method::DELETE,
            "/postReactions/removeReactPost",
            Some(body),
            RequestOptions::new("Failed to remove reaction").authenticated(),
        )
        .await?;

        tracing::debug!(post_id = %post_id, "Reaction removed");
        Ok(())
    }
}
