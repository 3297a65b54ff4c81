//! Phase derivation
//!
//! Phases are never stored: they are recomputed from the window on every
//! tick by ordered boundary comparison.

use chrono::{DateTime, Utc};

use super::{CompetitionWindow, Phase, PhaseStatus};

/// Derives the active phase and the whole seconds left in it.
///
/// - `now < competition_start` → `Registration`
/// - `competition_start <= now < competition_end` → `Competing`
/// - `competition_end <= now < voting_end` → `Voting`
/// - `now >= voting_end` → `Completed`, 0 seconds
///
/// Each boundary belongs to the phase it starts. Remaining time is
/// truncated to whole seconds.
#[must_use]
pub fn derive_phase(window: &CompetitionWindow, now: DateTime<Utc>) -> PhaseStatus {
    let phase = if now < window.competition_start() {
        Phase::Registration
    } else if now < window.competition_end() {
        Phase::Competing
    } else if now < window.voting_end() {
        Phase::Voting
    } else {
        Phase::Completed
    };

    let seconds_remaining = window
        .boundary_after(phase)
        .map_or(0, |boundary| whole_seconds_until(boundary, now));

    PhaseStatus {
        phase,
        seconds_remaining,
    }
}

impl CompetitionWindow {
    /// Shorthand for [`derive_phase`] on this window.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> PhaseStatus {
        derive_phase(self, now)
    }
}

fn whole_seconds_until(boundary: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((boundary - now).num_seconds()).unwrap_or(0)
}
