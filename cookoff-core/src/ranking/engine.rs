//! Ranking engine
//!
//! Scores a snapshot of items at a fixed instant, orders them by
//! descending score and drops items whose score is not positive.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::ValidationError;

use super::ContentItem;
use super::score::trending_score;
use super::weights::TrendingWeights;

/// An item paired with the score it was ranked by.
///
/// Serializes flat, with the score under `trending_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    /// The ranked item.
    #[serde(flatten)]
    pub item: ContentItem,
    /// Score at the ranking instant. Meaningless across instants.
    pub trending_score: f64,
}

/// Orders feed items by trending score.
///
/// Stateless apart from its weights: every call recomputes from scratch.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    weights: TrendingWeights,
}

impl RankingEngine {
    /// Creates an engine with the default weights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom weights.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidWeight` if the weights would make
    /// scores non-finite or non-positive.
    pub fn with_weights(weights: TrendingWeights) -> Result<Self, ValidationError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Returns the weights in use.
    #[must_use]
    pub const fn weights(&self) -> &TrendingWeights {
        &self.weights
    }

    /// Scores a single item at `now`.
    #[must_use]
    pub fn score(&self, item: &ContentItem, now: DateTime<Utc>) -> f64 {
        trending_score(&self.weights, item.likes, item.comments, item.age_hours(now))
    }

    /// Scores and orders items, keeping the scores.
    ///
    /// Sorting is stable: items with equal scores keep their input order,
    /// so re-ranking an unchanged list at the same instant is a no-op.
    #[must_use]
    pub fn score_all(&self, items: Vec<ContentItem>, now: DateTime<Utc>) -> Vec<ScoredItem> {
        let mut scored: Vec<ScoredItem> = items
            .into_iter()
            .map(|item| {
                let trending_score = self.score(&item, now);
                ScoredItem {
                    item,
                    trending_score,
                }
            })
            .filter(|s| s.trending_score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.trending_score.total_cmp(&a.trending_score));
        scored
    }

    /// Like [`score_all`](Self::score_all), but refuses snapshots containing
    /// items dated more than `tolerance` after `now`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::FutureTimestamp` for the first offending item.
    pub fn score_all_checked(
        &self,
        items: Vec<ContentItem>,
        now: DateTime<Utc>,
        tolerance: Duration,
    ) -> Result<Vec<ScoredItem>, ValidationError> {
        for item in &items {
            item.validate(now, tolerance)?;
        }
        Ok(self.score_all(items, now))
    }

    /// Returns the items reordered by descending trending score.
    ///
    /// Items scoring zero or less are left out of this view.
    #[must_use]
    pub fn rank(&self, items: Vec<ContentItem>, now: DateTime<Utc>) -> Vec<ContentItem> {
        self.score_all(items, now)
            .into_iter()
            .map(|s| s.item)
            .collect()
    }

    /// Like [`rank`](Self::rank), but refuses snapshots containing items
    /// dated more than `tolerance` after `now`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::FutureTimestamp` for the first offending item.
    pub fn rank_checked(
        &self,
        items: Vec<ContentItem>,
        now: DateTime<Utc>,
        tolerance: Duration,
    ) -> Result<Vec<ContentItem>, ValidationError> {
        Ok(self
            .score_all_checked(items, now, tolerance)?
            .into_iter()
            .map(|s| s.item)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(id: &str, hours_old: i64, likes: u32, comments: u32) -> ContentItem {
        ContentItem::new(id, now() - Duration::hours(hours_old), likes, comments)
    }

    fn ids(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_comments_item_outranks_likes_item() {
        let engine = RankingEngine::new();
        let ranked = engine.rank(vec![item("a", 1, 10, 0), item("b", 1, 0, 5)], now());
        assert_eq!(ids(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn test_stale_items_sort_last_but_stay() {
        let engine = RankingEngine::new();
        let ranked = engine.rank(
            vec![
                item("old-popular", 72, 500, 200),
                item("fresh-quiet", 2, 0, 0),
            ],
            now(),
        );
        assert_eq!(ids(&ranked), vec!["fresh-quiet", "old-popular"]);
    }

    #[test]
    fn test_empty_input() {
        let engine = RankingEngine::new();
        assert!(engine.rank(Vec::new(), now()).is_empty());
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let engine = RankingEngine::new();
        let ranked = engine.rank(
            vec![item("x", 60, 1, 0), item("y", 70, 9, 9), item("z", 80, 0, 3)],
            now(),
        );
        assert_eq!(ids(&ranked), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_score_all_exposes_scores_in_order() {
        let engine = RankingEngine::new();
        let scored = engine.score_all(vec![item("a", 5, 3, 1), item("b", 0, 3, 1)], now());
        assert_eq!(scored[0].item.id, "b");
        assert!(scored[0].trending_score >= scored[1].trending_score);
    }

    #[test]
    fn test_scored_item_serializes_flat() {
        let engine = RankingEngine::new();
        let scored = engine.score_all(vec![item("a", 100, 1, 1)], now());
        let json = serde_json::to_value(&scored[0]).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["trending_score"], 0.0001);
    }

    #[test]
    fn test_rank_checked_rejects_future_items() {
        let engine = RankingEngine::new();
        let future = ContentItem::new("f", now() + Duration::hours(1), 0, 0);
        let result = engine.rank_checked(vec![item("a", 1, 1, 1), future], now(), Duration::minutes(5));
        assert!(matches!(
            result,
            Err(ValidationError::FutureTimestamp { ref id, .. }) if id == "f"
        ));
    }

    #[test]
    fn test_score_all_checked_matches_score_all_within_tolerance() {
        let engine = RankingEngine::new();
        let slightly_ahead = ContentItem::new("s", now() + Duration::minutes(1), 2, 0);
        let items = vec![item("a", 3, 1, 1), slightly_ahead];
        let checked = engine
            .score_all_checked(items.clone(), now(), Duration::minutes(5))
            .unwrap();
        assert_eq!(checked, engine.score_all(items, now()));
    }

    #[test]
    fn test_rank_clamps_future_items() {
        let engine = RankingEngine::new();
        let future = ContentItem::new("f", now() + Duration::hours(1), 0, 0);
        let ranked = engine.rank(vec![future], now());
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_with_weights_rejects_invalid() {
        let weights = TrendingWeights {
            decay_base: 0.0,
            ..TrendingWeights::default()
        };
        assert!(RankingEngine::with_weights(weights).is_err());
    }

    #[test]
    fn test_custom_weights_change_order() {
        let weights = TrendingWeights {
            like_weight: 50.0,
            ..TrendingWeights::default()
        };
        let engine = RankingEngine::with_weights(weights).unwrap();
        let ranked = engine.rank(vec![item("b", 1, 0, 5), item("a", 1, 10, 0)], now());
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    fn arb_item() -> impl Strategy<Value = ContentItem> {
        (0i64..200 * 60, 0u32..5_000, 0u32..5_000).prop_map(|(minutes, likes, comments)| {
            ContentItem::new(
                format!("{minutes}-{likes}-{comments}"),
                now() - Duration::minutes(minutes),
                likes,
                comments,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_stale_score_is_floor(
            minutes in (48 * 60 + 1)..(24 * 60 * 365i64),
            likes in any::<u32>(),
            comments in any::<u32>(),
        ) {
            let engine = RankingEngine::new();
            let it = ContentItem::new("s", now() - Duration::minutes(minutes), likes, comments);
            prop_assert_eq!(engine.score(&it, now()), 0.0001);
        }

        #[test]
        fn prop_engagement_beats_none_at_equal_age(
            minutes in 0i64..=(48 * 60),
            likes in 0u32..10_000,
            comments in 0u32..10_000,
        ) {
            prop_assume!(likes > 0 || comments > 0);
            let engine = RankingEngine::new();
            let created = now() - Duration::minutes(minutes);
            let quiet = ContentItem::new("q", created, 0, 0);
            let busy = ContentItem::new("b", created, likes, comments);
            prop_assert!(engine.score(&busy, now()) > engine.score(&quiet, now()));
        }

        #[test]
        fn prop_rank_is_idempotent(items in proptest::collection::vec(arb_item(), 0..40)) {
            let engine = RankingEngine::new();
            let once = engine.rank(items, now());
            let twice = engine.rank(once.clone(), now());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_rank_orders_descending(items in proptest::collection::vec(arb_item(), 0..40)) {
            let engine = RankingEngine::new();
            let scored = engine.score_all(items, now());
            for pair in scored.windows(2) {
                prop_assert!(pair[0].trending_score >= pair[1].trending_score);
            }
        }
    }
}
