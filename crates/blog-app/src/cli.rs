//! Command-line arguments

use std::path::PathBuf;

use blog_core::{EntityId, MediaType};
use clap::{Args, Parser, Subcommand};

/// Blog client
///
/// Every command waits for the backend to become reachable first.
#[derive(Debug, Parser)]
#[command(name = "blog", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all posts
    Posts,

    /// Show a single post
    Show { id: EntityId },

    /// Toggle a like on a post
    Like { id: EntityId },

    /// Toggle a dislike on a post
    Dislike { id: EntityId },

    /// Log in and remember the session
    Login {
        username: String,
        #[command(flatten)]
        password: PasswordArg,
    },

    /// Create an account
    Register {
        username: String,
        email: String,
        #[command(flatten)]
        password: PasswordArg,
    },

    /// Forget the remembered session
    Logout,

    /// Write a new post
    Create(PostArgs),

    /// Edit one of your posts
    Edit {
        id: EntityId,
        #[command(flatten)]
        post: PostArgs,
    },

    /// Delete one of your posts
    Delete { id: EntityId },
}

#[derive(Args)]
pub struct PasswordArg {
    /// Account password
    #[arg(long = "password", env = "BLOG_PASSWORD", hide_env_values = true)]
    pub value: String,
}

impl std::fmt::Debug for PasswordArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

#[derive(Debug, Args)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// TEXT, IMAGE, AUDIO or VIDEO
    #[arg(long, default_value = "TEXT", value_parser = parse_media_type)]
    pub media_type: MediaType,

    /// Files to upload and attach; may be repeated
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

fn parse_media_type(raw: &str) -> Result<MediaType, String> {
    MediaType::from_label(raw).ok_or_else(|| format!("unknown media type: {raw}"))
}
