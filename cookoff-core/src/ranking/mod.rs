//! Trending feed ranking
//!
//! - [`ContentItem`]: rankable feed entry (read-only input)
//! - [`TrendingWeights`]: every constant of the score formula
//! - [`RankingEngine`]: scores, orders and filters a snapshot of items
//! - [`score`]: the formula itself

pub mod engine;
pub mod score;
pub mod weights;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use engine::{RankingEngine, ScoredItem};
pub use weights::TrendingWeights;

/// A feed entry with engagement counters.
///
/// Field aliases accept the column names used by backend query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Backend identifier.
    pub id: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Number of likes.
    #[serde(default, alias = "likes_count")]
    pub likes: u32,
    /// Number of comments.
    #[serde(default, alias = "comments_count", alias = "comment_count")]
    pub comments: u32,
}

impl ContentItem {
    /// Creates a new item.
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, likes: u32, comments: u32) -> Self {
        Self {
            id: id.into(),
            created_at,
            likes,
            comments,
        }
    }

    /// Age of the item in fractional hours at `now`, clamped to zero.
    #[must_use]
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        score::age_hours(self.created_at, now)
    }

    /// Rejects items dated more than `tolerance` after `now`.
    ///
    /// A tolerance reaching past the representable range accepts every item.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::FutureTimestamp` when the item is too far
    /// in the future.
    pub fn validate(&self, now: DateTime<Utc>, tolerance: Duration) -> Result<(), ValidationError> {
        let too_far = now
            .checked_add_signed(tolerance)
            .is_some_and(|limit| self.created_at > limit);
        if too_far {
            return Err(ValidationError::FutureTimestamp {
                id: self.id.clone(),
                created_at: self.created_at,
                now,
                tolerance_secs: tolerance.num_seconds(),
            });
        }
        Ok(())
    }
}
