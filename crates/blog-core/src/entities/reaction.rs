//! Reaction entities - like/dislike state of a post for the current user
//!
//! The current user's reaction is stored as a single `Option<ReactionKind>`,
//! so a post can never be liked and disliked at the same time. On the wire
//! the backend still uses the `isLiked` / `isDisliked` boolean pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::EntityId;

/// Kind of reaction a user can leave on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// The reaction that excludes this one
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// Wire representation (`LIKE` / `DISLIKE`)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Dislike => "DISLIKE",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction counters of a post plus the current user's own reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ReactionWire", into = "ReactionWire")]
pub struct PostReactions {
    pub likes: u32,
    pub dislikes: u32,
    mine: Option<ReactionKind>,
}

impl PostReactions {
    /// Create counters with no reaction from the current user
    pub const fn new(likes: u32, dislikes: u32) -> Self {
        Self {
            likes,
            dislikes,
            mine: None,
        }
    }

    /// Set the current user's reaction without touching the counters
    pub fn with_mine(mut self, mine: Option<ReactionKind>) -> Self {
        self.mine = mine;
        self
    }

    /// The current user's reaction, if any
    #[inline]
    pub const fn mine(&self) -> Option<ReactionKind> {
        self.mine
    }

    #[inline]
    pub fn is_liked(&self) -> bool {
        self.mine == Some(ReactionKind::Like)
    }

    #[inline]
    pub fn is_disliked(&self) -> bool {
        self.mine == Some(ReactionKind::Dislike)
    }

    /// Check whether the current user holds the given reaction
    #[inline]
    pub fn has(&self, kind: ReactionKind) -> bool {
        self.mine == Some(kind)
    }

    /// Counter for the given reaction kind
    pub const fn count(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Like => self.likes,
            ReactionKind::Dislike => self.dislikes,
        }
    }

    /// Toggle `kind` for the current user.
    ///
    /// - holding `kind`: removes it
    /// - holding the opposite: clears the opposite and sets `kind`
    /// - holding nothing: sets `kind`
    #[must_use]
    pub fn toggled(self, kind: ReactionKind) -> Self {
        match self.mine {
            Some(current) if current == kind => self.decremented(kind).with_mine(None),
            Some(other) => self
                .decremented(other)
                .incremented(kind)
                .with_mine(Some(kind)),
            None => self.incremented(kind).with_mine(Some(kind)),
        }
    }

    fn incremented(mut self, kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => self.likes = self.likes.saturating_add(1),
            ReactionKind::Dislike => self.dislikes = self.dislikes.saturating_add(1),
        }
        self
    }

    fn decremented(mut self, kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => self.likes = self.likes.saturating_sub(1),
            ReactionKind::Dislike => self.dislikes = self.dislikes.saturating_sub(1),
        }
        self
    }
}

/// Backend representation with the boolean pair
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReactionWire {
    #[serde(default)]
    likes: u32,
    #[serde(default)]
    dislikes: u32,
    #[serde(default)]
    is_liked: bool,
    #[serde(default)]
    is_disliked: bool,
}

impl From<ReactionWire> for PostReactions {
    // A like wins if the backend ever reports both flags
    fn from(wire: ReactionWire) -> Self {
        let mine = if wire.is_liked {
            Some(ReactionKind::Like)
        } else if wire.is_disliked {
            Some(ReactionKind::Dislike)
        } else {
            None
        };
        Self::new(wire.likes, wire.dislikes).with_mine(mine)
    }
}

impl From<PostReactions> for ReactionWire {
    fn from(reactions: PostReactions) -> Self {
        Self {
            likes: reactions.likes,
            dislikes: reactions.dislikes,
            is_liked: reactions.is_liked(),
            is_disliked: reactions.is_disliked(),
        }
    }
}

/// Remote call that reconciles a toggle with the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionCall {
    /// Set (or switch to) the given reaction
    React(ReactionKind),
    /// Remove the user's reaction
    Remove,
}

impl ReactionCall {
    /// Pick the call for toggling `kind` on a post whose state before the toggle was `previous`
    pub fn for_toggle(previous: &PostReactions, kind: ReactionKind) -> Self {
        if previous.has(kind) {
            Self::Remove
        } else {
            Self::React(kind)
        }
    }
}

/// A single user reaction action, kept until the backend answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionIntent {
    pub post_id: EntityId,
    pub user_id: EntityId,
    pub kind: ReactionKind,
    /// Reaction state of the post before the optimistic toggle
    pub previous: PostReactions,
    /// Per-post monotonic request number
    pub sequence: u64,
}

impl ReactionIntent {
    /// Remote call implied by this intent
    pub fn call(&self) -> ReactionCall {
        ReactionCall::for_toggle(&self.previous, self.kind)
    }
}
