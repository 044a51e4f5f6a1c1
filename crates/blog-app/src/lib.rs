//! # blog-app
//!
//! Command-line front end: waits for the backend through the readiness gate,
//! then runs one command.

pub mod bootstrap;
pub mod cli;
pub mod commands;

use blog_common::AppConfig;
use blog_service::ServiceContext;
use tracing::info;

pub use cli::{Cli, Command};

/// Run a parsed command line to completion
pub async fn run(config: AppConfig, cli: Cli) -> anyhow::Result<()> {
    let (ctx, printer) = bootstrap::build_context(&config)?;
    let result = run_when_ready(&ctx, &config, cli.command).await;
    bootstrap::shutdown(ctx, printer).await;
    result
}

async fn run_when_ready(
    ctx: &ServiceContext,
    config: &AppConfig,
    command: Command,
) -> anyhow::Result<()> {
    let session = bootstrap::wait_until_ready(ctx, &config.readiness).await?;
    if let Some(session) = &session {
        info!(user_id = %session.id, username = %session.username, "Using saved session");
    }

    commands::execute(ctx, command).await
}
