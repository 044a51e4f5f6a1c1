//! Reaction service
//!
//! Optimistic like/dislike toggling. The toggle is applied to the store before
//! the request is sent; a failed request restores the exact pre-toggle
//! reaction state and raises an error notification.
//!
//! Every toggle gets a per-post sequence number, and the ledger keeps the
//! pre-toggle snapshot of each toggle still in flight. A failed toggle hands
//! its snapshot to the next newer toggle in flight, so that one's rollback
//! undoes both. With no newer toggle in flight it restores its own snapshot,
//! unless a newer toggle was confirmed and owns the displayed state.

use std::collections::BTreeMap;
use std::ops::Bound;

use blog_core::{
    Action, EntityId, ReactionCall, ReactionIntent, ReactionKind, ReactionSnapshot,
};
use dashmap::DashMap;
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;

/// How a reaction attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The backend accepted the change; the optimistic state stands
    Confirmed,
    /// The backend rejected the change; the snapshot was restored
    RolledBack,
    /// The backend rejected the change while a newer toggle owned the
    /// displayed state; nothing was restored now
    Superseded,
    /// No user is logged in; nothing changed
    LoginRequired,
    /// The user wrote the post; nothing changed
    SelfReactionRejected,
    /// The post is not loaded; nothing changed
    PostNotFound,
}

impl ReactionOutcome {
    /// Whether the backend failed the request
    pub fn is_failure(self) -> bool {
        matches!(self, Self::RolledBack | Self::Superseded)
    }
}

#[derive(Debug, Default)]
struct PostEntry {
    last_sequence: u64,
    confirmed: u64,
    in_flight: BTreeMap<u64, ReactionSnapshot>,
}

/// Per-post sequence numbers and the snapshots of unsettled toggles
#[derive(Debug, Default)]
pub struct ReactionLedger {
    posts: DashMap<EntityId, PostEntry>,
}

impl ReactionLedger {
    fn register(&self, post_id: EntityId, snapshot: ReactionSnapshot) -> u64 {
        let mut entry = self.posts.entry(post_id).or_default();
        entry.last_sequence += 1;
        let sequence = entry.last_sequence;
        entry.in_flight.insert(sequence, snapshot);
        sequence
    }

    /// Sequence number of the newest toggle started for `post_id`, 0 if none
    pub fn latest_sequence(&self, post_id: EntityId) -> u64 {
        self.posts.get(&post_id).map_or(0, |entry| entry.last_sequence)
    }

    /// Whether a request for `post_id` is still awaiting its answer
    pub fn is_reconciling(&self, post_id: EntityId) -> bool {
        self.posts
            .get(&post_id)
            .is_some_and(|entry| !entry.in_flight.is_empty())
    }

    fn confirm(&self, post_id: EntityId, sequence: u64) {
        if let Some(mut entry) = self.posts.get_mut(&post_id) {
            entry.in_flight.remove(&sequence);
            entry.confirmed = entry.confirmed.max(sequence);
        }
    }

    /// Settle a failed toggle; returns the snapshot to restore, if any
    fn fail(&self, post_id: EntityId, sequence: u64) -> Option<ReactionSnapshot> {
        let mut entry = self.posts.get_mut(&post_id)?;
        let snapshot = entry.in_flight.remove(&sequence)?;
        if entry.confirmed > sequence {
            return None;
        }

        let newer = entry
            .in_flight
            .range_mut((Bound::Excluded(sequence), Bound::Unbounded))
            .next();
        match newer {
            Some((_, inherited)) => {
                *inherited = snapshot;
                None
            }
            None => Some(snapshot),
        }
    }

    fn abandon(&self, post_id: EntityId, sequence: u64) {
        if let Some(mut entry) = self.posts.get_mut(&post_id) {
            entry.in_flight.remove(&sequence);
        }
    }
}

/// A toggle applied locally and waiting to be sent
///
/// Dropping it without calling [`settle`](Self::settle) keeps the optimistic
/// state and sends nothing.
#[must_use = "the toggle is not sent until `settle` is awaited"]
pub struct PendingReaction {
    ctx: ServiceContext,
    intent: ReactionIntent,
}

impl std::fmt::Debug for PendingReaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReaction")
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}

impl PendingReaction {
    pub fn intent(&self) -> &ReactionIntent {
        &self.intent
    }

    /// Send the request and reconcile the local state with its result
    pub async fn settle(self) -> ReactionOutcome {
        let ReactionIntent {
            post_id,
            user_id,
            sequence,
            ..
        } = self.intent;
        let gateway = self.ctx.reactions();

        let result = match self.intent.call() {
            ReactionCall::React(kind) => gateway.react_to_post(post_id, user_id, kind).await,
            ReactionCall::Remove => gateway.remove_reaction(post_id, user_id).await,
        };

        let ledger = self.ctx.reaction_ledger();
        let error = match result {
            Ok(()) => {
                ledger.confirm(post_id, sequence);
                debug!(post_id = %post_id, sequence, "Reaction confirmed");
                return ReactionOutcome::Confirmed;
            }
            Err(e) => e,
        };

        let rolled_back = self.ctx.store().transact(|_| {
            match ledger.fail(post_id, sequence) {
                Some(snapshot) => (Some(Action::RestoreReactions { post_id, snapshot }), true),
                None => (None, false),
            }
        });

        warn!(
            post_id = %post_id,
            sequence,
            rolled_back,
            error = %error,
            "Reaction failed"
        );
        self.ctx.notifier().notify_error(&error.to_string());

        if rolled_back {
            ReactionOutcome::RolledBack
        } else {
            ReactionOutcome::Superseded
        }
    }
}

impl Drop for PendingReaction {
    fn drop(&mut self) {
        self.ctx
            .reaction_ledger()
            .abandon(self.intent.post_id, self.intent.sequence);
    }
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle `kind` on a post and reconcile with the backend
    ///
    /// Never fails: every failure is rolled back and reported through the notifier.
    #[instrument(skip(self))]
    pub async fn apply_reaction(&self, post_id: EntityId, kind: ReactionKind) -> ReactionOutcome {
        match self.begin(post_id, kind) {
            Ok(pending) => pending.settle().await,
            Err(outcome) => outcome,
        }
    }

    /// Apply the optimistic toggle now; the returned handle sends the request
    ///
    /// Returns the final outcome instead when the toggle is not allowed.
    pub fn begin(
        &self,
        post_id: EntityId,
        kind: ReactionKind,
    ) -> Result<PendingReaction, ReactionOutcome> {
        let ledger = self.ctx.reaction_ledger();

        let decision = self.ctx.store().transact(|state| {
            let Some(user_id) = state.auth.user_id().filter(|_| state.auth.is_authenticated)
            else {
                return (None, Err(ReactionOutcome::LoginRequired));
            };
            let Some(post) = state.posts.find(post_id) else {
                return (None, Err(ReactionOutcome::PostNotFound));
            };
            if post.is_authored_by(user_id) {
                return (None, Err(ReactionOutcome::SelfReactionRejected));
            }
            let Some(snapshot) = ReactionSnapshot::capture(&state.posts, post_id) else {
                return (None, Err(ReactionOutcome::PostNotFound));
            };

            let intent = ReactionIntent {
                post_id,
                user_id,
                kind,
                previous: post.reactions,
                sequence: ledger.register(post_id, snapshot),
            };

            (Some(Action::ApplyReaction { post_id, kind }), Ok(intent))
        });

        let intent = decision.inspect_err(|outcome| {
            debug!(post_id = %post_id, outcome = ?outcome, "Reaction not applied");
        })?;

        debug!(
            post_id = %post_id,
            kind = %kind,
            sequence = intent.sequence,
            call = ?intent.call(),
            "Optimistic reaction applied"
        );

        Ok(PendingReaction {
            ctx: self.ctx.clone(),
            intent,
        })
    }

    /// Whether a reaction request for `post_id` is in flight
    pub fn is_reconciling(&self, post_id: EntityId) -> bool {
        self.ctx.reaction_ledger().is_reconciling(post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{harness, jane, FakeBackend, Notes, JANE_ID};
    use blog_core::{Post, PostReactions};
    use std::sync::Arc;

    const POST: EntityId = EntityId::new(10);

    fn post(likes: u32, dislikes: u32, mine: Option<ReactionKind>) -> Post {
        Post::new(POST, "Getting Started", "Body")
            .with_author(EntityId::new(99), "john")
            .with_reactions(PostReactions::new(likes, dislikes).with_mine(mine))
    }

    fn reactions(ctx: &ServiceContext) -> PostReactions {
        ctx.store()
            .select(|s| s.posts.find(POST).map(|p| p.reactions))
            .unwrap()
    }

    fn logged_in_with(post: Post) -> (ServiceContext, Arc<FakeBackend>, Notes) {
        let (ctx, backend, notes) = harness();
        ctx.store().dispatch(Action::LoginSuccess(Some(jane())));
        ctx.store().dispatch(Action::FetchPostsSuccess(vec![post]));
        (ctx, backend, notes)
    }

    #[tokio::test]
    async fn test_like_applies_before_request_resolves() {
        let (ctx, backend, _) = logged_in_with(post(5, 2, None));
        let service = ReactionService::new(&ctx);

        let pending = service.begin(POST, ReactionKind::Like).unwrap();
        let after = reactions(&ctx);
        assert_eq!(after.likes, 6);
        assert!(after.is_liked());
        assert!(service.is_reconciling(POST));
        assert!(backend.reaction_calls().is_empty());

        assert_eq!(pending.settle().await, ReactionOutcome::Confirmed);
        assert!(!service.is_reconciling(POST));
        assert_eq!(
            backend.reaction_calls(),
            vec![(POST, JANE_ID, ReactionCall::React(ReactionKind::Like))]
        );
    }

    #[tokio::test]
    async fn test_like_again_toggles_off_with_remove() {
        let (ctx, backend, _) = logged_in_with(post(6, 2, Some(ReactionKind::Like)));

        let outcome = ReactionService::new(&ctx)
            .apply_reaction(POST, ReactionKind::Like)
            .await;

        assert_eq!(outcome, ReactionOutcome::Confirmed);
        let after = reactions(&ctx);
        assert_eq!(after.likes, 5);
        assert!(!after.is_liked());
        assert_eq!(backend.reaction_calls(), vec![(POST, JANE_ID, ReactionCall::Remove)]);
    }

    #[tokio::test]
    async fn test_switch_from_dislike_is_one_update() {
        let (ctx, _, _) = logged_in_with(post(4, 3, Some(ReactionKind::Dislike)));
        let mut revisions = ctx.store().subscribe();
        revisions.mark_unchanged();

        let pending = ReactionService::new(&ctx)
            .begin(POST, ReactionKind::Like)
            .unwrap();

        let after = reactions(&ctx);
        assert_eq!((after.likes, after.dislikes), (5, 2));
        assert!(after.is_liked() && !after.is_disliked());
        assert_eq!(*revisions.borrow_and_update(), 3);
        drop(pending);
    }

    #[tokio::test]
    async fn test_failure_restores_exact_snapshot() {
        let (ctx, backend, notes) = logged_in_with(post(4, 3, Some(ReactionKind::Dislike)));
        let opened = post(4, 3, Some(ReactionKind::Dislike));
        ctx.store().dispatch(Action::SetCurrentPost(Some(opened)));
        let before = ctx.store().snapshot();
        backend.fail_reactions("Failed to react to post");

        let outcome = ReactionService::new(&ctx)
            .apply_reaction(POST, ReactionKind::Like)
            .await;

        assert_eq!(outcome, ReactionOutcome::RolledBack);
        assert_eq!(ctx.store().snapshot().posts, before.posts);
        let after = reactions(&ctx);
        assert!(after.is_disliked() && !after.is_liked());
        assert_eq!((after.likes, after.dislikes), (4, 3));
        assert_eq!(notes.errors(), vec!["Failed to react to post".to_string()]);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_roll_back_newer_toggle() {
        let (ctx, backend, notes) = logged_in_with(post(5, 2, None));
        let service = ReactionService::new(&ctx);

        let first = service.begin(POST, ReactionKind::Like).unwrap();
        let second = service.begin(POST, ReactionKind::Dislike).unwrap();
        assert_eq!(second.intent().sequence, first.intent().sequence + 1);
        let displayed = reactions(&ctx);
        assert!(displayed.is_disliked());

        backend.fail_reactions("Failed to react to post");
        assert_eq!(first.settle().await, ReactionOutcome::Superseded);
        assert_eq!(reactions(&ctx), displayed);
        assert_eq!(notes.errors().len(), 1);
        assert!(service.is_reconciling(POST));

        backend.succeed_reactions();
        assert_eq!(second.settle().await, ReactionOutcome::Confirmed);
        assert!(!service.is_reconciling(POST));
    }

    #[tokio::test]
    async fn test_latest_failure_rolls_back_to_its_own_snapshot() {
        let (ctx, backend, _) = logged_in_with(post(5, 2, None));
        let service = ReactionService::new(&ctx);

        let first = service.begin(POST, ReactionKind::Like).unwrap();
        assert_eq!(first.settle().await, ReactionOutcome::Confirmed);
        let liked = reactions(&ctx);

        backend.fail_reactions("Failed to remove reaction");
        let outcome = service.apply_reaction(POST, ReactionKind::Like).await;
        assert_eq!(outcome, ReactionOutcome::RolledBack);
        assert_eq!(reactions(&ctx), liked);
    }

    #[tokio::test]
    async fn test_login_required() {
        let (ctx, backend, notes) = harness();
        ctx.store().dispatch(Action::FetchPostsSuccess(vec![post(5, 2, None)]));

        let outcome = ReactionService::new(&ctx)
            .apply_reaction(POST, ReactionKind::Like)
            .await;

        assert_eq!(outcome, ReactionOutcome::LoginRequired);
        assert_eq!(reactions(&ctx), PostReactions::new(5, 2));
        assert!(backend.reaction_calls().is_empty());
        assert!(notes.errors().is_empty());
    }

    #[tokio::test]
    async fn test_self_reaction_rejected() {
        let own = Post::new(POST, "Mine", "Body").with_author(JANE_ID, "jane");
        let (ctx, backend, _) = logged_in_with(own);

        let outcome = ReactionService::new(&ctx)
            .apply_reaction(POST, ReactionKind::Dislike)
            .await;

        assert_eq!(outcome, ReactionOutcome::SelfReactionRejected);
        assert_eq!(reactions(&ctx), PostReactions::default());
        assert!(backend.reaction_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_post() {
        let (ctx, _, _) = logged_in_with(post(0, 0, None));
        let outcome = ReactionService::new(&ctx)
            .apply_reaction(EntityId::new(404), ReactionKind::Like)
            .await;
        assert_eq!(outcome, ReactionOutcome::PostNotFound);
    }

    #[tokio::test]
    async fn test_flags_exclusive_across_failures() {
        let (ctx, backend, _) = logged_in_with(post(3, 3, None));
        let service = ReactionService::new(&ctx);
        let kinds = [
            ReactionKind::Like,
            ReactionKind::Dislike,
            ReactionKind::Dislike,
            ReactionKind::Like,
            ReactionKind::Like,
            ReactionKind::Dislike,
        ];

        for (i, kind) in kinds.into_iter().enumerate() {
            if i % 2 == 0 {
                backend.fail_reactions("Failed to react to post");
            } else {
                backend.succeed_reactions();
            }
            let outcome = service.apply_reaction(POST, kind).await;
            assert!(matches!(
                outcome,
                ReactionOutcome::Confirmed | ReactionOutcome::RolledBack
            ));
            let state = reactions(&ctx);
            assert!(!(state.is_liked() && state.is_disliked()));
        }
    }

    #[tokio::test]
    async fn test_overlapping_failures_newest_first_restore_original() {
        let (ctx, backend, notes) = logged_in_with(post(5, 2, None));
        let service = ReactionService::new(&ctx);

        let like = service.begin(POST, ReactionKind::Like).unwrap();
        let dislike = service.begin(POST, ReactionKind::Dislike).unwrap();
        backend.fail_reactions("Failed to react to post");

        assert_eq!(dislike.settle().await, ReactionOutcome::RolledBack);
        assert!(reactions(&ctx).is_liked());
        assert!(service.is_reconciling(POST));

        assert_eq!(like.settle().await, ReactionOutcome::RolledBack);
        assert_eq!(reactions(&ctx), PostReactions::new(5, 2));
        assert!(!service.is_reconciling(POST));
        assert_eq!(notes.errors().len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_failures_oldest_first_restore_original() {
        let (ctx, backend, _) = logged_in_with(post(5, 2, None));
        let service = ReactionService::new(&ctx);

        let like = service.begin(POST, ReactionKind::Like).unwrap();
        let dislike = service.begin(POST, ReactionKind::Dislike).unwrap();
        backend.fail_reactions("Failed to react to post");

        assert_eq!(like.settle().await, ReactionOutcome::Superseded);
        assert!(reactions(&ctx).is_disliked());

        assert_eq!(dislike.settle().await, ReactionOutcome::RolledBack);
        assert_eq!(reactions(&ctx), PostReactions::new(5, 2));
        assert!(!service.is_reconciling(POST));
    }

    #[tokio::test]
    async fn test_failure_behind_confirmed_toggle_keeps_state() {
        let (ctx, backend, _) = logged_in_with(post(5, 2, None));
        let service = ReactionService::new(&ctx);

        let like = service.begin(POST, ReactionKind::Like).unwrap();
        let dislike = service.begin(POST, ReactionKind::Dislike).unwrap();
        assert_eq!(dislike.settle().await, ReactionOutcome::Confirmed);
        let displayed = reactions(&ctx);

        backend.fail_reactions("Failed to react to post");
        assert_eq!(like.settle().await, ReactionOutcome::Superseded);
        assert_eq!(reactions(&ctx), displayed);
        assert!(displayed.is_disliked());
    }

    #[test]
    fn test_ledger_sequences_and_handover() {
        let ledger = ReactionLedger::default();
        let original = ReactionSnapshot {
            listed: Some(PostReactions::new(5, 2)),
            current: None,
        };
        let liked = ReactionSnapshot {
            listed: Some(PostReactions::new(6, 2).with_mine(Some(ReactionKind::Like))),
            current: None,
        };
        assert_eq!(ledger.latest_sequence(POST), 0);

        assert_eq!(ledger.register(POST, original), 1);
        assert_eq!(ledger.register(POST, liked), 2);
        assert_eq!(ledger.latest_sequence(POST), 2);
        assert!(ledger.is_reconciling(POST));

        assert_eq!(ledger.fail(POST, 1), None);
        assert_eq!(ledger.fail(POST, 2), Some(original));
        assert!(!ledger.is_reconciling(POST));
        assert_eq!(ledger.fail(POST, 2), None);

        let third = ledger.register(POST, original);
        ledger.abandon(POST, third);
        assert!(!ledger.is_reconciling(POST));
    }
}
