//! Blog client entry point
//!
//! Run with:
//! ```bash
//! BLOG_API_BASE_URL=http://localhost:8080/api cargo run -p blog-app -- posts
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use blog_app::{run, Cli};
use blog_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::from_env();

    // Initialize tracing
    let env = config.as_ref().map(|c| c.app.env).unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(config, cli).await {
        error!(error = %e, "Command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
