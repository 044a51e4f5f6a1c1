//! Application state container
//!
//! Wraps `AppState` behind a lock. The lock is only held while a reducer runs,
//! never across an await. Observers watch a revision counter.

use std::sync::Arc;

use blog_core::{Action, AppState};
use parking_lot::RwLock;
use tokio::sync::watch;

/// Shared, observable application state
#[derive(Clone)]
pub struct AppStore {
    state: Arc<RwLock<AppState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("revision", &*self.revision.borrow())
            .finish_non_exhaustive()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl AppStore {
    pub fn new(initial: AppState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(RwLock::new(initial)),
            revision: Arc::new(revision),
        }
    }

    /// Run an action through the reducers
    pub fn dispatch(&self, action: Action) {
        {
            let mut state = self.state.write();
            let current = std::mem::take(&mut *state);
            *state = current.reduce(&action);
        }
        self.bump(&action);
    }

    /// Read the state and decide on an action under one write lock
    ///
    /// No other dispatch can interleave between the read and the apply.
    pub fn transact<R>(&self, f: impl FnOnce(&AppState) -> (Option<Action>, R)) -> R {
        let (action, result) = {
            let mut state = self.state.write();
            let (action, result) = f(&state);
            if let Some(action) = &action {
                let current = std::mem::take(&mut *state);
                *state = current.reduce(action);
            }
            (action, result)
        };
        if let Some(action) = &action {
            self.bump(action);
        }
        result
    }

    /// Project part of the state
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.read())
    }

    /// Clone of the whole state
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    /// Receiver that changes after every dispatched action
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self, action: &Action) {
        self.revision.send_modify(|revision| *revision += 1);
        tracing::trace!(action = action.name(), "Action dispatched");
    }
}
