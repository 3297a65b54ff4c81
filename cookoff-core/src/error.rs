//! Core error types for `Cookoff`
//!
//! Data and configuration validation errors shared across the workspace.

use chrono::{DateTime, Utc};
use thiserror::Error;

// ============================================================================
// Data Validation Errors
// ============================================================================

/// Malformed input rejected before scoring or phase derivation.
///
/// The computations themselves are total; these errors exist so that
/// callers can refuse bad backend data instead of ranking it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// An item was created further in the future than the skew tolerance allows.
    #[error(
        "item '{id}' is dated {created_at}, more than {tolerance_secs}s after {now}"
    )]
    FutureTimestamp {
        /// Identifier of the offending item
        id: String,
        /// Creation timestamp reported by the backend
        created_at: DateTime<Utc>,
        /// Reference instant used for validation
        now: DateTime<Utc>,
        /// Allowed clock skew in seconds
        tolerance_secs: i64,
    },

    /// Two competition window timestamps are out of order.
    #[error("competition window out of order: {earlier} ({earlier_at}) is after {later} ({later_at})")]
    WindowOutOfOrder {
        /// Field that must come first
        earlier: &'static str,
        /// Value of the field that must come first
        earlier_at: DateTime<Utc>,
        /// Field that must come second
        later: &'static str,
        /// Value of the field that must come second
        later_at: DateTime<Utc>,
    },

    /// A scoring weight is unusable (not finite, or non-positive where it divides).
    #[error("invalid weight '{field}': {value} ({reason})")]
    InvalidWeight {
        /// Name of the weight
        field: &'static str,
        /// Rejected value
        value: f64,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// A stored phase name is not one of the four known phases.
    #[error("unknown phase '{value}' (expected registration, competing, voting or completed)")]
    UnknownPhase {
        /// The rejected name
        value: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found while checking configuration.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "ranking.weights.decay_base")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prevents the configuration from being used
    Error,
    /// Suspicious but usable
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue {
            path: "ranking.weights.decay_base".to_string(),
            message: "must be greater than 1".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: must be greater than 1 at ranking.weights.decay_base"
        );
    }

    #[test]
    fn test_window_error_names_fields() {
        let t = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let err = ValidationError::WindowOutOfOrder {
            earlier: "competition_start",
            earlier_at: t,
            later: "competition_end",
            later_at: t - chrono::Duration::hours(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("competition_start"));
        assert!(msg.contains("competition_end"));
    }

    #[test]
    fn test_future_timestamp_display() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let err = ValidationError::FutureTimestamp {
            id: "post-1".to_string(),
            created_at: now + chrono::Duration::hours(2),
            now,
            tolerance_secs: 300,
        };
        assert!(err.to_string().contains("post-1"));
        assert!(err.to_string().contains("300s"));
    }
}
