//! Command execution

use std::path::Path;

use anyhow::{bail, Context};
use blog_core::{EntityId, MediaFile, Post, ReactionKind};
use blog_service::{
    AuthService, LoginForm, MediaService, PostForm, PostService, ReactionOutcome,
    ReactionService, RegistrationForm, ServiceContext,
};
use tracing::debug;

use crate::cli::{Command, PostArgs};

const SUMMARY_CHARS: usize = 80;

/// Run one command against a ready backend
pub async fn execute(ctx: &ServiceContext, command: Command) -> anyhow::Result<()> {
    debug!(command = ?command, "Executing command");

    match command {
        Command::Posts => list_posts(ctx).await,
        Command::Show { id } => {
            let post = load_post(ctx, id).await?;
            print_post(&post);
            Ok(())
        }
        Command::Like { id } => react(ctx, id, ReactionKind::Like).await,
        Command::Dislike { id } => react(ctx, id, ReactionKind::Dislike).await,
        Command::Login { username, password } => {
            let session = AuthService::new(ctx)
                .login(LoginForm::new(username, password.value))
                .await?;
            println!("Logged in as {} (id {})", session.username, session.id);
            Ok(())
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let form = RegistrationForm::new(username, email, password.value.clone(), password.value);
            AuthService::new(ctx).register(form).await?;
            println!("Account created, you can now log in");
            Ok(())
        }
        Command::Logout => {
            AuthService::new(ctx).logout().await;
            println!("Logged out");
            Ok(())
        }
        Command::Create(args) => {
            let form = post_form(ctx, args).await?;
            match PostService::new(ctx).create_post(form).await? {
                Some(post) => println!("Created post #{}", post.id),
                None => println!("Post created"),
            }
            Ok(())
        }
        Command::Edit { id, post } => {
            let form = post_form(ctx, post).await?;
            let updated = PostService::new(ctx).update_post(id, form).await?;
            println!("Updated post #{}", updated.id);
            Ok(())
        }
        Command::Delete { id } => {
            PostService::new(ctx).delete_post(id).await?;
            println!("Deleted post #{id}");
            Ok(())
        }
    }
}

async fn list_posts(ctx: &ServiceContext) -> anyhow::Result<()> {
    let posts = PostService::new(ctx).refresh_posts().await?;
    if posts.is_empty() {
        println!("No posts yet");
    }
    for post in &posts {
        println!(
            "#{:<5} {}  by {}  [+{} / -{}]",
            post.id,
            post.title,
            post.author.as_deref().unwrap_or("unknown"),
            post.reactions.likes,
            post.reactions.dislikes
        );
        println!("       {}", post.summary(SUMMARY_CHARS));
    }
    Ok(())
}

/// Load a post into the store; with the viewer's flags when logged in
async fn load_post(ctx: &ServiceContext, id: EntityId) -> anyhow::Result<Post> {
    let service = PostService::new(ctx);
    if AuthService::new(ctx).current_user().is_some() {
        return Ok(service.open_post(id).await?);
    }

    let posts = service.refresh_posts().await?;
    posts
        .into_iter()
        .find(|post| post.id == id)
        .with_context(|| format!("post #{id} not found"))
}

async fn react(ctx: &ServiceContext, id: EntityId, kind: ReactionKind) -> anyhow::Result<()> {
    if AuthService::new(ctx).current_user().is_some() {
        load_post(ctx, id).await?;
    }

    match ReactionService::new(ctx).apply_reaction(id, kind).await {
        ReactionOutcome::Confirmed => {
            let post = ctx
                .store()
                .select(|s| s.posts.find(id).cloned())
                .with_context(|| format!("post #{id} not found"))?;
            println!(
                "#{}: {} likes, {} dislikes{}",
                post.id,
                post.reactions.likes,
                post.reactions.dislikes,
                match post.reactions.mine() {
                    Some(mine) => format!(" (you: {mine})"),
                    None => String::new(),
                }
            );
            Ok(())
        }
        ReactionOutcome::RolledBack | ReactionOutcome::Superseded => {
            bail!("reaction was not saved")
        }
        ReactionOutcome::LoginRequired => bail!("log in to react to posts: blog login <username>"),
        ReactionOutcome::SelfReactionRejected => bail!("you cannot react to your own post"),
        ReactionOutcome::PostNotFound => bail!("post #{id} not found"),
    }
}

async fn post_form(ctx: &ServiceContext, args: PostArgs) -> anyhow::Result<PostForm> {
    let form = PostForm::new(args.title, args.content);
    if args.files.is_empty() {
        return Ok(form.with_media(args.media_type, Vec::new()));
    }

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(read_media_file(path).await?);
    }

    let uploaded = MediaService::new(ctx).upload(args.media_type, &files).await?;
    for url in &uploaded.display_urls {
        println!("Uploaded {url}");
    }
    Ok(form.with_media(args.media_type, uploaded.media_urls))
}

async fn read_media_file(path: &Path) -> anyhow::Result<MediaFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());

    let file = MediaFile::new(file_name, bytes);
    Ok(match guess_content_type(path) {
        Some(content_type) => file.with_content_type(content_type),
        None => file,
    })
}

fn guess_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => return None,
    };
    Some(content_type)
}

fn print_post(post: &Post) {
    println!("#{} {}", post.id, post.title);
    println!(
        "by {}{}",
        post.author.as_deref().unwrap_or("unknown"),
        post.date
            .as_deref()
            .map(|date| format!(" on {date}"))
            .unwrap_or_default()
    );
    println!();
    println!("{}", post.content);
    if !post.media_urls.is_empty() {
        println!();
        println!("{} attachment(s):", post.media_type);
        for url in &post.media_urls {
            println!("  {url}");
        }
    }
    println!();
    println!(
        "{} likes, {} dislikes{}",
        post.reactions.likes,
        post.reactions.dislikes,
        post.reactions
            .mine()
            .map(|mine| format!(" (you: {mine})"))
            .unwrap_or_default()
    );
}
