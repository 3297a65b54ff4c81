//! Competition phases
//!
//! A competition moves through four phases purely as a function of the
//! current time and its stored window:
//!
//! - [`CompetitionWindow`]: validated, ordered boundary timestamps
//! - [`derive_phase`]: `(window, now)` → [`PhaseStatus`]
//! - [`PhaseTracker`]: caller-side change detection between ticks

pub mod clock;
pub mod tracker;
pub mod window;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::format::format_remaining;

pub use clock::derive_phase;
pub use tracker::{PhaseTracker, PhaseTransition, TransitionCue};
pub use window::{CompetitionWindow, DeadlineWindow, RawWindow, WindowShape};

/// One of the four mutually exclusive competition phases, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Entrants can sign up; cooking has not started.
    Registration,
    /// Entrants are cooking and submitting.
    Competing,
    /// Submissions are closed and being voted on.
    Voting,
    /// Voting has closed; results are final.
    Completed,
}

impl Phase {
    /// All phases in chronological order.
    pub const ALL: [Self; 4] = [
        Self::Registration,
        Self::Competing,
        Self::Voting,
        Self::Completed,
    ];

    /// Stable machine name, as stored by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Competing => "competing",
            Self::Voting => "voting",
            Self::Completed => "completed",
        }
    }

    /// Display label for timers and banners.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Registration => "Registration Open",
            Self::Competing => "Cook-off Live",
            Self::Voting => "Voting Open",
            Self::Completed => "Completed",
        }
    }

    /// The phase that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Registration => Some(Self::Competing),
            Self::Competing => Some(Self::Voting),
            Self::Voting => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Whether no further transition can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownPhase {
                value: s.to_string(),
            })
    }
}

/// The derived phase at an instant plus whole seconds until it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseStatus {
    /// Active phase.
    pub phase: Phase,
    /// Seconds until the next boundary; 0 once completed.
    pub seconds_remaining: u64,
}

impl PhaseStatus {
    /// Countdown text for the remaining time.
    #[must_use]
    pub fn formatted(&self) -> String {
        format_remaining(i64::try_from(self.seconds_remaining).unwrap_or(i64::MAX))
    }
}
