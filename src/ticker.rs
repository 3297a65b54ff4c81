//! Countdown ticker
//!
//! Re-derives a competition's phase on a fixed interval and reports each
//! tick over a channel. The task stops on cancellation, when the receiver
//! goes away, or once the competition completes (unless told to keep
//! running).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cookoff_core::{CompetitionWindow, PhaseStatus, PhaseTracker, PhaseTransition};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::observability::metrics;

/// One observation of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Clock reading for this tick.
    pub at: DateTime<Utc>,
    /// Derived phase and remaining seconds.
    pub status: PhaseStatus,
    /// Set when the phase differs from the previous tick.
    pub transition: Option<PhaseTransition>,
}

/// Why the ticker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The competition reached its terminal phase.
    Completed,
    /// Cancelled by the caller or the tick receiver was dropped.
    Cancelled,
}

impl StopReason {
    /// Lowercase name used in events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Outcome of a finished ticker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSummary {
    /// Why the loop ended.
    pub reason: StopReason,
    /// Ticks delivered.
    pub ticks: u64,
}

/// Periodic phase derivation for one competition.
pub struct PhaseTicker {
    competition: String,
    window: CompetitionWindow,
    clock: Arc<dyn Clock>,
    interval: Duration,
    keep_running: bool,
    cancel: CancellationToken,
}

impl std::fmt::Debug for PhaseTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseTicker")
            .field("competition", &self.competition)
            .field("interval", &self.interval)
            .field("keep_running", &self.keep_running)
            .finish_non_exhaustive()
    }
}

impl PhaseTicker {
    /// Creates a ticker; nothing runs until [`spawn`](Self::spawn).
    ///
    /// A zero interval is raised to one millisecond.
    #[must_use]
    pub fn new(
        competition: impl Into<String>,
        window: CompetitionWindow,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            competition: competition.into(),
            window,
            clock,
            interval: interval.max(Duration::from_millis(1)),
            keep_running: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Keeps ticking after the competition completes.
    #[must_use]
    pub const fn keep_running(mut self, keep_running: bool) -> Self {
        self.keep_running = keep_running;
        self
    }

    /// Uses `token` to stop the task instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops the task when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Starts the ticker task. The first tick fires immediately.
    #[must_use]
    pub fn spawn(self) -> (JoinHandle<TickerSummary>, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.run(tx));
        (handle, rx)
    }

    async fn run(self, tx: mpsc::UnboundedSender<Tick>) -> TickerSummary {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut tracker = PhaseTracker::new();
        let mut ticks = 0_u64;

        let reason = loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!(competition = %self.competition, "ticker cancelled");
                    break StopReason::Cancelled;
                }
                _ = interval.tick() => {
                    let at = self.clock.now();
                    let status = self.window.status_at(at);
                    let transition = tracker.observe(&status, at);
                    ticks += 1;

                    metrics::record_tick(&self.competition);
                    if ticks == 1 || transition.is_some() {
                        metrics::set_current_phase(&self.competition, status.phase);
                    }
                    if let Some(t) = &transition {
                        info!(competition = %self.competition, from = %t.from, to = %t.to, "phase changed");
                        metrics::record_transition(&self.competition, t.from, t.to);
                    }

                    if tx.send(Tick { at, status, transition }).is_err() {
                        debug!(competition = %self.competition, "tick receiver dropped");
                        break StopReason::Cancelled;
                    }

                    if status.phase.is_terminal() && !self.keep_running {
                        break StopReason::Completed;
                    }
                }
            }
        };

        TickerSummary { reason, ticks }
    }
}
