//! Post service
//!
//! Lists, opens, creates, edits and deletes posts, keeping the posts slice of
//! the store in sync with the backend.

use blog_core::{Action, DomainError, EntityId, Post};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::PostForm;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reload the post list
    #[instrument(skip(self))]
    pub async fn refresh_posts(&self) -> ServiceResult<Vec<Post>> {
        self.ctx.store().dispatch(Action::FetchPostsStart);

        match self.ctx.posts().list_posts().await {
            Ok(posts) => {
                debug!(count = posts.len(), "Posts loaded");
                self.ctx
                    .store()
                    .dispatch(Action::FetchPostsSuccess(posts.clone()));
                Ok(posts)
            }
            Err(e) => {
                let message = e.to_string();
                self.ctx
                    .store()
                    .dispatch(Action::FetchPostsFailure(message.clone()));
                Err(self.report(e.into()))
            }
        }
    }

    /// Fetch a post with the viewer's reaction flags and make it the current post
    #[instrument(skip(self))]
    pub async fn open_post(&self, post_id: EntityId) -> ServiceResult<Post> {
        let viewer = self.ctx.store().select(|s| s.auth.user_id());

        let post = self
            .ctx
            .posts()
            .get_post(post_id, viewer)
            .await
            .map_err(|e| self.report(e.into()))?;

        self.ctx
            .store()
            .dispatch(Action::SetCurrentPost(Some(post.clone())));
        Ok(post)
    }

    /// Leave the post detail view
    pub fn close_post(&self) {
        self.ctx.store().dispatch(Action::SetCurrentPost(None));
    }

    /// Create a post as the logged-in user
    ///
    /// When the backend does not echo the stored post, the list is reloaded
    /// and `None` is returned.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create_post(&self, form: PostForm) -> ServiceResult<Option<Post>> {
        self.require_user()?;
        form.validate()?;

        let created = self
            .ctx
            .posts()
            .create_post(&form.to_new_post())
            .await
            .map_err(|e| self.report(e.into()))?;

        match &created {
            Some(post) => {
                info!(post_id = %post.id, "Post created");
                self.ctx.store().dispatch(Action::UpsertPost(post.clone()));
            }
            None => {
                info!("Post created, reloading list");
                // Failure is already reported by refresh_posts
                let _ = self.refresh_posts().await;
            }
        }

        self.ctx.notifier().notify_success("Post created successfully");
        Ok(created)
    }

    /// Edit a post; only its author may do this
    #[instrument(skip(self, form))]
    pub async fn update_post(&self, post_id: EntityId, form: PostForm) -> ServiceResult<Post> {
        let user_id = self.require_user()?;
        form.validate()?;
        let existing = self.authored_post(post_id, user_id).await?;

        let echoed = self
            .ctx
            .posts()
            .update_post(&form.to_update(post_id))
            .await
            .map_err(|e| self.report(e.into()))?;

        let updated = echoed.unwrap_or_else(|| {
            let mut post = existing;
            post.title = form.title;
            post.content = form.content;
            post.media_type = form.media_type;
            post.media_urls = form.media_urls;
            post
        });

        info!(post_id = %post_id, "Post updated");
        self.ctx.store().dispatch(Action::UpsertPost(updated.clone()));
        self.ctx.notifier().notify_success("Post updated successfully");
        Ok(updated)
    }

    /// Delete a post; only its author may do this
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: EntityId) -> ServiceResult<()> {
        let user_id = self.require_user()?;
        self.authored_post(post_id, user_id).await?;

        self.ctx
            .posts()
            .delete_post(post_id)
            .await
            .map_err(|e| self.report(e.into()))?;

        info!(post_id = %post_id, "Post deleted");
        self.ctx.store().dispatch(Action::RemovePost(post_id));
        self.ctx.notifier().notify_success("Post deleted successfully");
        Ok(())
    }

    fn require_user(&self) -> ServiceResult<EntityId> {
        self.ctx
            .store()
            .select(|s| s.auth.user_id().filter(|_| s.auth.is_authenticated))
            .ok_or(ServiceError::Domain(DomainError::NotAuthenticated))
    }

    /// Loaded copy of the post, fetched if needed, checked for authorship
    async fn authored_post(&self, post_id: EntityId, user_id: EntityId) -> ServiceResult<Post> {
        let loaded = self.ctx.store().select(|s| s.posts.find(post_id).cloned());
        let post = match loaded {
            Some(post) => post,
            None => self
                .ctx
                .posts()
                .get_post(post_id, Some(user_id))
                .await
                .map_err(|e| self.report(e.into()))?,
        };

        if !post.is_authored_by(user_id) {
            warn!(post_id = %post_id, user_id = %user_id, "Not the post author");
            return Err(DomainError::NotPostAuthor.into());
        }
        Ok(post)
    }

    fn report(&self, err: ServiceError) -> ServiceError {
        warn!(error = %err, code = err.error_code(), "Post operation failed");
        self.ctx.notifier().notify_error(&err.user_message());
        err
    }
}
