//! Time sources
//!
//! Derivation and ranking take `now` as a parameter; this is where the
//! CLI gets it from.

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Starts at a chosen instant and advances with the tokio clock.
///
/// Under a paused tokio runtime it only moves with `tokio::time::advance`,
/// which makes countdowns testable without waiting.
#[derive(Debug, Clone, Copy)]
pub struct AnchoredClock {
    start: DateTime<Utc>,
    origin: Instant,
}

impl AnchoredClock {
    /// Creates a clock reading `start` right now.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            origin: Instant::now(),
        }
    }
}

impl Clock for AnchoredClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed())
            .unwrap_or(chrono::Duration::MAX);
        self.start
            .checked_add_signed(elapsed)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
