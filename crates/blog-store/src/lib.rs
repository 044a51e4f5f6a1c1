//! # blog-store
//!
//! Local persistence for the blog client.
//!
//! ## Features
//!
//! - **Backends**: a JSON file store for real runs and an in-memory store for tests
//! - **Session**: the logged-in user record, kept under the `"user"` key
//!
//! ## Example
//!
//! ```ignore
//! use blog_store::{FileStore, SessionStore};
//!
//! let backend = FileStore::from_config(&config.storage);
//! let sessions = SessionStore::new(Arc::new(backend));
//!
//! if let Some(session) = sessions.load().await {
//!     tracing::info!(user = %session.username, "restored session");
//! }
//! ```

pub mod backend;
pub mod session;

// Re-export backend types
pub use backend::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};

// Re-export session types
pub use session::{SessionStore, SESSION_KEY};
