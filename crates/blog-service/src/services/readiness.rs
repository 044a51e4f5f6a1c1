//! Readiness gate
//!
//! Polls the backend health endpoint until it answers, while a one-second
//! countdown cycles for display. Once connected the timers are dropped, the
//! gate waits for the display delay, restores the persisted session and
//! reports ready.
//!
//! The transition rules live in [`ReadinessState`]; this module owns the
//! timers and the in-flight health checks.

use std::time::Duration;

use blog_common::ReadinessConfig;
use blog_core::{Action, ReadinessState, Session};
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, instrument, trace, warn};

use super::auth::AuthService;
use super::context::ServiceContext;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// How the gate finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Backend reachable; `session` is the restored login, if any
    Ready { session: Option<Session> },
    /// Shut down before becoming ready
    Cancelled,
}

/// Startup barrier that waits for the backend
#[derive(Debug)]
pub struct ReadinessGate {
    ctx: ServiceContext,
    health_interval: Duration,
    display_delay: Duration,
    countdown_secs: u32,
}

impl ReadinessGate {
    pub fn new(ctx: ServiceContext, config: &ReadinessConfig) -> Self {
        Self {
            ctx,
            health_interval: config.health_interval(),
            display_delay: config.ready_delay(),
            countdown_secs: config.countdown_secs,
        }
    }

    /// Run the gate on a background task
    pub fn spawn(self) -> GateHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(ReadinessState::new(self.countdown_secs));
        let task = tokio::spawn(self.run(shutdown_rx, state_tx));

        GateHandle {
            states: state_rx,
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }

    /// Run the gate until ready or until `shutdown` turns `true`
    ///
    /// Dropping the shutdown sender also cancels the gate.
    #[instrument(skip_all, fields(countdown_secs = self.countdown_secs))]
    pub async fn run(
        self,
        mut shutdown: watch::Receiver<bool>,
        states: watch::Sender<ReadinessState>,
    ) -> GateOutcome {
        if !self.poll_until_connected(&mut shutdown, &states).await {
            debug!("Readiness gate cancelled while polling");
            return GateOutcome::Cancelled;
        }

        tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => {
                debug!("Readiness gate cancelled during display delay");
                return GateOutcome::Cancelled;
            }
            () = time::sleep(self.display_delay) => {}
        }

        let session = AuthService::new(&self.ctx).restore_session().await;
        info!(restored = session.is_some(), "Application ready");
        GateOutcome::Ready { session }
    }

    async fn poll_until_connected(
        &self,
        shutdown: &mut watch::Receiver<bool>,
        states: &watch::Sender<ReadinessState>,
    ) -> bool {
        let mut state = ReadinessState::new(self.countdown_secs);
        self.publish(states, state);

        let mut polling = Polling::start(self.health_interval);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => return false,
                Some(joined) = polling.checks.join_next(), if !polling.checks.is_empty() => {
                    let healthy = matches!(joined, Ok(true));
                    if state.on_health_result(healthy) {
                        info!(attempts = state.attempts, "Backend connected");
                        self.publish(states, state);
                        return true;
                    }
                }
                _ = polling.countdown.tick() => {
                    if state.tick_countdown() {
                        debug!(attempts = state.attempts, "Countdown elapsed, still waiting for backend");
                    }
                    self.publish(states, state);
                }
                _ = polling.health.tick() => {
                    state.record_attempt();
                    self.publish(states, state);

                    let probe = self.ctx.health();
                    let attempt = state.attempts;
                    polling.checks.spawn(async move {
                        match probe.health_check().await {
                            Ok(()) => true,
                            Err(e) => {
                                debug!(attempt, error = %e, "Health check failed");
                                false
                            }
                        }
                    });
                }
            }
        }
    }

    fn publish(&self, states: &watch::Sender<ReadinessState>, state: ReadinessState) {
        states.send_replace(state);
        self.ctx.store().dispatch(Action::ReadinessChanged(state));
    }
}

/// Timers and in-flight checks of one polling phase
///
/// Everything is torn down in `Drop`, whichever way polling ends.
struct Polling {
    health: Interval,
    countdown: Interval,
    checks: JoinSet<bool>,
}

impl Polling {
    fn start(health_interval: Duration) -> Self {
        // First health tick completes immediately
        let mut health = time::interval(health_interval);
        health.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut countdown = time::interval_at(Instant::now() + COUNTDOWN_TICK, COUNTDOWN_TICK);
        countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            health,
            countdown,
            checks: JoinSet::new(),
        }
    }
}

impl Drop for Polling {
    fn drop(&mut self) {
        let in_flight = self.checks.len();
        self.checks.abort_all();
        trace!(in_flight, "Readiness timers disposed");
    }
}

/// Handle to a spawned [`ReadinessGate`]
///
/// Dropping the handle aborts the gate.
#[derive(Debug)]
pub struct GateHandle {
    states: watch::Receiver<ReadinessState>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<GateOutcome>>,
}

impl GateHandle {
    /// Receiver of every published readiness state
    pub fn subscribe(&self) -> watch::Receiver<ReadinessState> {
        self.states.clone()
    }

    /// Latest readiness state
    pub fn state(&self) -> ReadinessState {
        *self.states.borrow()
    }

    /// Ask the gate to stop
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    /// Wait for the gate to finish
    pub async fn wait(mut self) -> GateOutcome {
        let Some(task) = self.task.take() else {
            return GateOutcome::Cancelled;
        };
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Readiness gate task failed");
                GateOutcome::Cancelled
            }
        }
    }
}

impl Drop for GateHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
