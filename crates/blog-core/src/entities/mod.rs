//! Domain entities - core business objects

mod media;
mod post;
mod reaction;
mod user;

pub use media::{MediaFile, MediaType, UploadedMedia};
pub use post::{NewPost, Post, PostUpdate};
pub use reaction::{PostReactions, ReactionCall, ReactionIntent, ReactionKind};
pub use user::{Credentials, Registration, Session};
