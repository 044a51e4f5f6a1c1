//! Wiring: builds the service context and runs the readiness gate

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use blog_api::ApiClient;
use blog_common::{AppConfig, ReadinessConfig};
use blog_core::{ReadinessPhase, ReadinessState, Session};
use blog_service::{
    AppStore, ChannelNotifier, GateOutcome, Notification, NotificationLevel, ReadinessGate,
    ServiceContext,
};
use blog_store::{FileStore, SessionStore};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Build the service context backed by the HTTP client and the session file
///
/// Also starts the task that prints notifications; it ends once every clone
/// of the context is dropped.
pub fn build_context(config: &AppConfig) -> anyhow::Result<(ServiceContext, JoinHandle<()>)> {
    let sessions = SessionStore::new(Arc::new(FileStore::from_config(&config.storage)));
    let client = ApiClient::new(config.api.clone(), sessions).context("failed to build HTTP client")?;
    let (notifier, notifications) = ChannelNotifier::new();

    let ctx = ServiceContext::from_client(client, AppStore::default(), Arc::new(notifier));
    let printer = tokio::spawn(print_notifications(notifications));

    info!(
        base_url = %config.api.base_url,
        session_file = %config.storage.session_file.display(),
        "Service context ready"
    );
    Ok((ctx, printer))
}

/// Drop the context and wait until every queued notification is printed
pub async fn shutdown(ctx: ServiceContext, printer: JoinHandle<()>) {
    drop(ctx);
    if let Err(e) = printer.await {
        warn!(error = %e, "Notification printer stopped abnormally");
    }
}

async fn print_notifications(mut notifications: mpsc::UnboundedReceiver<Notification>) {
    while let Some(notification) = notifications.recv().await {
        match notification.level {
            NotificationLevel::Success => eprintln!("✓ {}", notification.message),
            NotificationLevel::Error => eprintln!("✗ {}", notification.message),
        }
    }
}

/// Block until the backend answers, printing progress
///
/// Returns the restored session, or an error when interrupted.
pub async fn wait_until_ready(
    ctx: &ServiceContext,
    readiness: &ReadinessConfig,
) -> anyhow::Result<Option<Session>> {
    let handle = ReadinessGate::new(ctx.clone(), readiness).spawn();
    let progress = tokio::spawn(print_progress(handle.subscribe()));

    let outcome = tokio::select! {
        outcome = handle.wait() => outcome,
        () = interrupted(tokio::signal::ctrl_c()) => {
            debug!("Interrupted while waiting for backend");
            GateOutcome::Cancelled
        }
    };
    progress.abort();

    match outcome {
        GateOutcome::Ready { session } => Ok(session),
        GateOutcome::Cancelled => anyhow::bail!("interrupted before the backend became available"),
    }
}

/// Resolve once `signal` fires; never resolve if the handler could not be installed
async fn interrupted<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

async fn print_progress(mut states: watch::Receiver<ReadinessState>) {
    let mut last = *states.borrow_and_update();
    eprintln!("Connecting to backend...");

    while states.changed().await.is_ok() {
        let state = *states.borrow_and_update();
        if let Some(line) = progress_line(&last, &state) {
            eprintln!("{line}");
        }
        last = state;
    }
}

fn progress_line(last: &ReadinessState, state: &ReadinessState) -> Option<String> {
    let new_cycle = state.countdown_seconds == state.countdown_duration
        && last.countdown_seconds != state.countdown_duration;

    match state.phase {
        ReadinessPhase::Connected if !last.is_connected() => Some("Connected".to_string()),
        ReadinessPhase::Retrying if last.phase != state.phase || new_cycle => Some(format!(
            "Backend still starting, retrying for another {}s ({} checks so far)",
            state.countdown_duration, state.attempts
        )),
        _ => None,
    }
}
