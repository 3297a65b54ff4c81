#![no_main]

use chrono::{DateTime, Duration, Utc};
use cookoff_core::{CompetitionWindow, WindowShape, derive_phase, format_remaining};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(shape) = serde_json::from_slice::<WindowShape>(data) else {
        return;
    };
    let Ok(window) = CompetitionWindow::try_from(shape) else {
        return;
    };

    // Probe every boundary and its neighbours.
    let boundaries = [
        window.registration_start(),
        window.competition_start(),
        window.competition_end(),
        window.voting_end(),
    ];
    for boundary in boundaries {
        for offset in [-1, 0, 1] {
            let Some(now) = boundary.checked_add_signed(Duration::seconds(offset)) else {
                continue;
            };
            let status = derive_phase(&window, now);
            if status.phase.is_terminal() {
                assert_eq!(status.seconds_remaining, 0);
            }
            let _ = format_remaining(i64::try_from(status.seconds_remaining).unwrap_or(i64::MAX));
        }
    }

    let _ = derive_phase(&window, DateTime::<Utc>::MIN_UTC);
    let _ = derive_phase(&window, DateTime::<Utc>::MAX_UTC);
});
