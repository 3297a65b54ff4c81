//! Phase change detection
//!
//! Derivation is stateless, but the screens that poll it need to react
//! once when a phase ends (open voting, show results). The tracker keeps
//! the last observed phase so a caller can tell a fresh transition from a
//! repeated tick.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Phase, PhaseStatus};

/// Follow-up the caller is expected to perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCue {
    /// Submissions closed: switch to the voting view.
    OpenVoting,
    /// Voting closed: switch to the results view.
    ShowResults,
}

/// A phase change observed between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTransition {
    /// Phase seen on the previous tick
    pub from: Phase,
    /// Phase seen on this tick
    pub to: Phase,
    /// Instant of the tick that observed the change
    pub at: DateTime<Utc>,
}

impl PhaseTransition {
    /// Follow-up for the phase just entered.
    ///
    /// Keyed on the destination so that a tick skipping a phase entirely
    /// (e.g. after the device slept) still lands on the right screen.
    #[must_use]
    pub const fn cue(&self) -> Option<TransitionCue> {
        match self.to {
            Phase::Voting => Some(TransitionCue::OpenVoting),
            Phase::Completed => Some(TransitionCue::ShowResults),
            Phase::Registration | Phase::Competing => None,
        }
    }
}

/// Remembers the last observed phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTracker {
    last: Option<Phase>,
}

impl PhaseTracker {
    /// Creates a tracker that has observed nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// The most recently observed phase.
    #[must_use]
    pub const fn current(&self) -> Option<Phase> {
        self.last
    }

    /// Records a tick and reports a transition if the phase changed.
    ///
    /// The first observation only establishes the starting phase.
    pub fn observe(&mut self, status: &PhaseStatus, at: DateTime<Utc>) -> Option<PhaseTransition> {
        let previous = self.last.replace(status.phase)?;
        (previous != status.phase).then_some(PhaseTransition {
            from: previous,
            to: status.phase,
            at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn status(phase: Phase) -> PhaseStatus {
        PhaseStatus {
            phase,
            seconds_remaining: 10,
        }
    }

    #[test]
    fn test_first_observation_is_not_a_transition() {
        let mut tracker = PhaseTracker::new();
        assert!(tracker.observe(&status(Phase::Competing), at()).is_none());
        assert_eq!(tracker.current(), Some(Phase::Competing));
    }

    #[test]
    fn test_repeated_phase_is_quiet() {
        let mut tracker = PhaseTracker::new();
        tracker.observe(&status(Phase::Competing), at());
        assert!(tracker.observe(&status(Phase::Competing), at()).is_none());
    }

    #[test]
    fn test_change_reports_transition_once() {
        let mut tracker = PhaseTracker::new();
        tracker.observe(&status(Phase::Competing), at());
        let transition = tracker.observe(&status(Phase::Voting), at()).unwrap();
        assert_eq!(transition.from, Phase::Competing);
        assert_eq!(transition.to, Phase::Voting);
        assert_eq!(transition.cue(), Some(TransitionCue::OpenVoting));
        assert!(tracker.observe(&status(Phase::Voting), at()).is_none());
    }

    #[test]
    fn test_skipped_phase_still_cues_results() {
        let mut tracker = PhaseTracker::new();
        tracker.observe(&status(Phase::Competing), at());
        let transition = tracker.observe(&status(Phase::Completed), at()).unwrap();
        assert_eq!(transition.cue(), Some(TransitionCue::ShowResults));
    }

    #[test]
    fn test_registration_to_competing_has_no_cue() {
        let transition = PhaseTransition {
            from: Phase::Registration,
            to: Phase::Competing,
            at: at(),
        };
        assert_eq!(transition.cue(), None);
    }
}
