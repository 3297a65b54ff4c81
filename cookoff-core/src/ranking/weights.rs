//! Trending score constants
//!
//! Every constant of the trending formula lives here so that the feed and
//! the scoring job can never drift apart. The defaults are the tuned
//! production values.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Tunable constants of the trending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendingWeights {
    /// Engagement points per like.
    pub like_weight: f64,
    /// Engagement points per comment.
    pub comment_weight: f64,
    /// Items older than this many hours get `stale_score`.
    pub stale_after_hours: f64,
    /// Fixed score of stale items. Must stay above zero so stale items
    /// sort last instead of being filtered out.
    pub stale_score: f64,
    /// Base of the exponential decay divisor.
    pub decay_base: f64,
    /// Hours per decay step (`decay_base ^ (age / decay_period_hours)`).
    pub decay_period_hours: f64,
    /// Quality multiplier when an item has both likes and comments.
    pub quality_both: f64,
    /// Quality multiplier when an item has only comments.
    pub quality_comments_only: f64,
    /// Quality multiplier when an item has only likes.
    pub quality_likes_only: f64,
    /// Quality multiplier when an item has no engagement.
    pub quality_none: f64,
    /// Scale of the like/comment balance bonus.
    pub distribution_factor: f64,
    /// Multiplier applied to engagement velocity.
    pub velocity_factor: f64,
    /// Upper bound of the velocity bonus.
    pub velocity_cap: f64,
    /// Numerator of the recency bonus `n / (1 + age)`.
    pub recency_numerator: f64,
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self {
            like_weight: 3.0,
            comment_weight: 8.0,
            stale_after_hours: 48.0,
            stale_score: 0.0001,
            decay_base: 1.8,
            decay_period_hours: 12.0,
            quality_both: 2.5,
            quality_comments_only: 2.0,
            quality_likes_only: 1.0,
            quality_none: 0.5,
            distribution_factor: 1.5,
            velocity_factor: 3.0,
            velocity_cap: 100.0,
            recency_numerator: 800.0,
        }
    }
}

impl TrendingWeights {
    /// Named view over every field, in declaration order.
    fn fields(&self) -> [(&'static str, f64); 14] {
        [
            ("like_weight", self.like_weight),
            ("comment_weight", self.comment_weight),
            ("stale_after_hours", self.stale_after_hours),
            ("stale_score", self.stale_score),
            ("decay_base", self.decay_base),
            ("decay_period_hours", self.decay_period_hours),
            ("quality_both", self.quality_both),
            ("quality_comments_only", self.quality_comments_only),
            ("quality_likes_only", self.quality_likes_only),
            ("quality_none", self.quality_none),
            ("distribution_factor", self.distribution_factor),
            ("velocity_factor", self.velocity_factor),
            ("velocity_cap", self.velocity_cap),
            ("recency_numerator", self.recency_numerator),
        ]
    }

    /// Checks that every weight keeps the formula finite and positive.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidWeight` for the first weight that is
    /// not finite, negative, or zero where it is used as a divisor, base or
    /// the stale floor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ValidationError::InvalidWeight {
                    field,
                    value,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(ValidationError::InvalidWeight {
                    field,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        let strictly_positive = [
            ("stale_score", self.stale_score),
            ("decay_base", self.decay_base),
            ("decay_period_hours", self.decay_period_hours),
        ];
        for (field, value) in strictly_positive {
            if value <= 0.0 {
                return Err(ValidationError::InvalidWeight {
                    field,
                    value,
                    reason: "must be greater than zero",
                });
            }
        }

        Ok(())
    }
}
