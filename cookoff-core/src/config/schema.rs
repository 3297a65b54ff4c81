//! Configuration schema types
//!
//! Deserialized from the YAML configuration file. Every section is
//! optional; missing values fall back to the production defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Severity, ValidationIssue};
use crate::ranking::TrendingWeights;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CookoffConfig {
    /// Feed ranking settings
    pub ranking: RankingConfig,

    /// Phase clock settings
    pub clock: ClockConfig,
}

impl CookoffConfig {
    /// Checks the configuration, collecting every issue found.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if let Err(err) = self.ranking.weights.validate() {
            issues.push(ValidationIssue {
                path: "ranking.weights".to_string(),
                message: err.to_string(),
                severity: Severity::Error,
            });
        }

        if self.ranking.clock_skew_tolerance > Duration::from_secs(3600) {
            issues.push(ValidationIssue {
                path: "ranking.clock_skew_tolerance".to_string(),
                message: "tolerance above one hour lets future-dated items through".to_string(),
                severity: Severity::Warning,
            });
        }

        if self.clock.tick_interval.is_zero() {
            issues.push(ValidationIssue {
                path: "clock.tick_interval".to_string(),
                message: "tick interval must be greater than zero".to_string(),
                severity: Severity::Error,
            });
        } else if self.clock.tick_interval > Duration::from_secs(60) {
            issues.push(ValidationIssue {
                path: "clock.tick_interval".to_string(),
                message: "countdowns refresh less than once a minute".to_string(),
                severity: Severity::Warning,
            });
        }

        issues
    }
}

// ============================================================================
// Ranking
// ============================================================================

/// Feed ranking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    /// Score formula constants
    pub weights: TrendingWeights,

    /// How far in the future an item may be dated before strict ranking
    /// rejects it (e.g. `"5m"`)
    #[serde(with = "duration_str")]
    pub clock_skew_tolerance: Duration,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: TrendingWeights::default(),
            clock_skew_tolerance: Duration::from_secs(5 * 60),
        }
    }
}

impl RankingConfig {
    /// Skew tolerance as a signed duration for timestamp arithmetic.
    #[must_use]
    pub fn skew_tolerance(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.clock_skew_tolerance).unwrap_or(chrono::Duration::MAX)
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Phase clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Interval between countdown refreshes (e.g. `"1s"`)
    #[serde(with = "duration_str")]
    pub tick_interval: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Human-readable durations (`"500ms"`, `"1s"`, `"5m"`) via `humantime`.
mod duration_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}
