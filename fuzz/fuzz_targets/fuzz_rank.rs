#![no_main]

use chrono::{DateTime, Utc};
use cookoff_core::{ContentItem, RankingEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(items) = serde_json::from_slice::<Vec<ContentItem>>(data) else {
        return;
    };
    let Some(now) = DateTime::<Utc>::from_timestamp(1_748_779_200, 0) else {
        return;
    };

    let engine = RankingEngine::new();
    let input = items.len();
    let scored = engine.score_all(items, now);

    assert!(scored.len() <= input);
    assert!(scored.iter().all(|s| s.trending_score.is_finite() && s.trending_score > 0.0));
    assert!(
        scored
            .windows(2)
            .all(|w| w[0].trending_score >= w[1].trending_score)
    );
});
