//! Trending score formula
//!
//! Blends weighted engagement, like/comment balance, engagement velocity
//! and freshness. Items past the staleness cutoff get a fixed floor score.

use chrono::{DateTime, Utc};

use super::weights::TrendingWeights;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Age of an item in fractional hours, clamped to zero.
///
/// Future-dated items (clock skew, bad rows) count as brand new instead of
/// feeding negative ages into the decay and recency terms.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - created_at).num_milliseconds();
    (millis as f64 / MILLIS_PER_HOUR).max(0.0)
}

/// Computes the trending score for the given counters and age.
///
/// `age_hours` is clamped to zero before use.
#[must_use]
pub fn trending_score(weights: &TrendingWeights, likes: u32, comments: u32, age_hours: f64) -> f64 {
    let age = age_hours.max(0.0);

    if age > weights.stale_after_hours {
        return weights.stale_score;
    }

    let likes_f = f64::from(likes);
    let comments_f = f64::from(comments);

    let base = likes_f.mul_add(weights.like_weight, comments_f * weights.comment_weight);
    let velocity = base / age.max(1.0);
    let decay = weights.decay_base.powf(age / weights.decay_period_hours);

    let quality = quality_multiplier(weights, likes, comments);
    let distribution = distribution_bonus(weights, likes_f, comments_f);

    let core = base * quality * distribution / decay;
    let velocity_bonus = (velocity * weights.velocity_factor).min(weights.velocity_cap);
    let recency_bonus = weights.recency_numerator / (1.0 + age);

    core + velocity_bonus + recency_bonus
}

fn quality_multiplier(weights: &TrendingWeights, likes: u32, comments: u32) -> f64 {
    match (likes > 0, comments > 0) {
        (true, true) => weights.quality_both,
        (false, true) => weights.quality_comments_only,
        (true, false) => weights.quality_likes_only,
        (false, false) => weights.quality_none,
    }
}

// Peaks when likes and comments are balanced.
fn distribution_bonus(weights: &TrendingWeights, likes: f64, comments: f64) -> f64 {
    let total = likes + comments;
    if total <= 0.0 {
        return 1.0;
    }
    let like_ratio = likes / total;
    let comment_ratio = comments / total;
    like_ratio.min(comment_ratio).mul_add(weights.distribution_factor, 1.0)
}
