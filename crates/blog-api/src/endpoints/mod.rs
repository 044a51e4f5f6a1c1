//! Gateway trait implementations, one module per backend resource

mod auth;
mod health;
mod media;
mod posts;
mod reactions;

pub use health::HEALTH_UNAVAILABLE;
pub use media::{display_url, NO_FILES_PROVIDED};
