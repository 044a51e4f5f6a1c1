//! Posts slice
//!
//! A post can appear twice: in the list and as the currently opened post.
//! Reaction actions update both copies.

use crate::entities::{Post, PostReactions, ReactionKind};
use crate::value_objects::EntityId;

use super::action::Action;

/// Loaded posts and the post currently opened
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub current_post: Option<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Reaction state of both copies of a post, taken before a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionSnapshot {
    pub listed: Option<PostReactions>,
    pub current: Option<PostReactions>,
}

impl ReactionSnapshot {
    /// Capture the reaction state of `post_id`, `None` if the post is not loaded
    pub fn capture(state: &PostsState, post_id: EntityId) -> Option<Self> {
        let listed = state
            .posts
            .iter()
            .find(|post| post.id == post_id)
            .map(|post| post.reactions);
        let current = state
            .current_post
            .as_ref()
            .filter(|post| post.id == post_id)
            .map(|post| post.reactions);

        if listed.is_none() && current.is_none() {
            None
        } else {
            Some(Self { listed, current })
        }
    }

    /// The state that decides which remote call a toggle needs
    pub fn primary(&self) -> Option<PostReactions> {
        self.listed.or(self.current)
    }
}

impl PostsState {
    /// Find a loaded post, preferring the list entry
    pub fn find(&self, post_id: EntityId) -> Option<&Post> {
        self.posts
            .iter()
            .find(|post| post.id == post_id)
            .or_else(|| self.current_post.as_ref().filter(|post| post.id == post_id))
    }

    pub fn reduce(mut self, action: &Action) -> Self {
        match action {
            Action::FetchPostsStart => {
                self.loading = true;
                self.error = None;
            }
            Action::FetchPostsSuccess(posts) => {
                self.loading = false;
                self.posts = posts.clone();
                self.error = None;
            }
            Action::FetchPostsFailure(message) => {
                self.loading = false;
                self.error = Some(message.clone());
            }
            Action::SetCurrentPost(post) => self.current_post = post.clone(),
            Action::UpsertPost(post) => {
                match self.posts.iter_mut().find(|p| p.id == post.id) {
                    Some(existing) => *existing = post.clone(),
                    None => self.posts.insert(0, post.clone()),
                }
                if let Some(current) = self.current_post.as_mut().filter(|p| p.id == post.id) {
                    *current = post.clone();
                }
            }
            Action::RemovePost(post_id) => {
                self.posts.retain(|post| post.id != *post_id);
                if self.current_post.as_ref().is_some_and(|p| p.id == *post_id) {
                    self.current_post = None;
                }
            }
            Action::ApplyReaction { post_id, kind } => {
                self.update_reactions(*post_id, |reactions| reactions.toggled(*kind));
            }
            Action::RestoreReactions { post_id, snapshot } => {
                if let Some(listed) = snapshot.listed {
                    if let Some(post) = self.posts.iter_mut().find(|p| p.id == *post_id) {
                        post.reactions = listed;
                    }
                }
                if let Some(current) = snapshot.current {
                    if let Some(post) = self.current_post.as_mut().filter(|p| p.id == *post_id) {
                        post.reactions = current;
                    }
                }
            }
            _ => {}
        }
        self
    }

    fn update_reactions(&mut self, post_id: EntityId, f: impl Fn(PostReactions) -> PostReactions) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
            post.reactions = f(post.reactions);
        }
        if let Some(post) = self.current_post.as_mut().filter(|p| p.id == post_id) {
            post.reactions = f(post.reactions);
        }
    }

    /// Reaction kind currently held by the user on `post_id`
    pub fn reaction_of(&self, post_id: EntityId) -> Option<ReactionKind> {
        self.find(post_id).and_then(|post| post.reactions.mine())
    }
}
