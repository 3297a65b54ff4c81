//! Competition windows
//!
//! Two stored shapes exist for a competition's schedule: the full
//! five-timestamp window and an older deadline-only form. Both normalize
//! into a [`CompetitionWindow`], which can only be built if its
//! timestamps are in chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::Phase;

/// A validated competition schedule.
///
/// Invariant: `registration_start <= competition_start <= competition_end
/// <= voting_start <= voting_end`.
///
/// `registration_start` and `voting_start` are carried for completeness
/// but are not phase boundaries: registration ends at `competition_start`
/// and voting is measured from `competition_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct CompetitionWindow {
    registration_start: DateTime<Utc>,
    competition_start: DateTime<Utc>,
    competition_end: DateTime<Utc>,
    voting_start: DateTime<Utc>,
    voting_end: DateTime<Utc>,
}

impl CompetitionWindow {
    /// Builds a window, checking chronological order.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::WindowOutOfOrder` naming the first pair of
    /// timestamps found out of order.
    pub fn new(
        registration_start: DateTime<Utc>,
        competition_start: DateTime<Utc>,
        competition_end: DateTime<Utc>,
        voting_start: DateTime<Utc>,
        voting_end: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let ordered = [
            ("registration_start", registration_start),
            ("competition_start", competition_start),
            ("competition_end", competition_end),
            ("voting_start", voting_start),
            ("voting_end", voting_end),
        ];

        for pair in ordered.windows(2) {
            let (earlier, earlier_at) = pair[0];
            let (later, later_at) = pair[1];
            if earlier_at > later_at {
                return Err(ValidationError::WindowOutOfOrder {
                    earlier,
                    earlier_at,
                    later,
                    later_at,
                });
            }
        }

        Ok(Self {
            registration_start,
            competition_start,
            competition_end,
            voting_start,
            voting_end,
        })
    }

    /// Builds a window whose voting starts when the competition ends.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::WindowOutOfOrder` if the timestamps are not
    /// chronological.
    pub fn with_contiguous_voting(
        registration_start: DateTime<Utc>,
        competition_start: DateTime<Utc>,
        competition_end: DateTime<Utc>,
        voting_end: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            registration_start,
            competition_start,
            competition_end,
            competition_end,
            voting_end,
        )
    }

    /// When sign-ups opened.
    #[must_use]
    pub const fn registration_start(&self) -> DateTime<Utc> {
        self.registration_start
    }

    /// When cooking starts.
    #[must_use]
    pub const fn competition_start(&self) -> DateTime<Utc> {
        self.competition_start
    }

    /// When submissions close.
    #[must_use]
    pub const fn competition_end(&self) -> DateTime<Utc> {
        self.competition_end
    }

    /// Stored voting start; normally equal to `competition_end`.
    #[must_use]
    pub const fn voting_start(&self) -> DateTime<Utc> {
        self.voting_start
    }

    /// When voting closes.
    #[must_use]
    pub const fn voting_end(&self) -> DateTime<Utc> {
        self.voting_end
    }

    /// The instant at which `phase` ends, or `None` for `Completed`.
    #[must_use]
    pub const fn boundary_after(&self, phase: Phase) -> Option<DateTime<Utc>> {
        match phase {
            Phase::Registration => Some(self.competition_start),
            Phase::Competing => Some(self.competition_end),
            Phase::Voting => Some(self.voting_end),
            Phase::Completed => None,
        }
    }
}

/// Unvalidated five-timestamp window as stored by the backend.
///
/// A missing `voting_start` defaults to `competition_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWindow {
    /// When sign-ups opened.
    pub registration_start: DateTime<Utc>,
    /// When cooking starts.
    pub competition_start: DateTime<Utc>,
    /// When submissions close.
    pub competition_end: DateTime<Utc>,
    /// When voting opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_start: Option<DateTime<Utc>>,
    /// When voting closes.
    pub voting_end: DateTime<Utc>,
}

impl TryFrom<RawWindow> for CompetitionWindow {
    type Error = ValidationError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(
            raw.registration_start,
            raw.competition_start,
            raw.competition_end,
            raw.voting_start.unwrap_or(raw.competition_end),
            raw.voting_end,
        )
    }
}

impl From<CompetitionWindow> for RawWindow {
    fn from(window: CompetitionWindow) -> Self {
        Self {
            registration_start: window.registration_start,
            competition_start: window.competition_start,
            competition_end: window.competition_end,
            voting_start: Some(window.voting_start),
            voting_end: window.voting_end,
        }
    }
}

/// Deadline-only schedule: submissions close, then voting closes.
///
/// There is no registration phase in this form. When `starts_at` is
/// absent the competition is considered open since the beginning of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineWindow {
    /// When the competition opened.
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    /// When submissions close.
    pub submission_deadline: DateTime<Utc>,
    /// When voting closes.
    pub voting_deadline: DateTime<Utc>,
}

impl TryFrom<DeadlineWindow> for CompetitionWindow {
    type Error = ValidationError;

    fn try_from(raw: DeadlineWindow) -> Result<Self, Self::Error> {
        let start = raw.starts_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::with_contiguous_voting(start, start, raw.submission_deadline, raw.voting_deadline)
    }
}

/// Either stored window shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindowShape {
    /// Five-timestamp window.
    Full(RawWindow),
    /// Submission and voting deadlines only.
    Deadlines(DeadlineWindow),
}

impl TryFrom<WindowShape> for CompetitionWindow {
    type Error = ValidationError;

    fn try_from(shape: WindowShape) -> Result<Self, Self::Error> {
        match shape {
            WindowShape::Full(raw) => raw.try_into(),
            WindowShape::Deadlines(raw) => raw.try_into(),
        }
    }
}
