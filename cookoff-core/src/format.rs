//! Countdown formatting for competition timers.

/// Text shown once a countdown has run out.
pub const TIME_UP: &str = "Time's up!";

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats a countdown in the largest two units that matter.
///
/// | Remaining        | Output        |
/// |------------------|---------------|
/// | `<= 0`           | `Time's up!`  |
/// | under a minute   | `45s`         |
/// | under an hour    | `2m 5s`       |
/// | under a day      | `2h 2m`       |
/// | otherwise        | `1d 1h`       |
#[must_use]
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return TIME_UP.to_string();
    }

    if seconds < MINUTE {
        format!("{seconds}s")
    } else if seconds < HOUR {
        format!("{}m {}s", seconds / MINUTE, seconds % MINUTE)
    } else if seconds < DAY {
        format!("{}h {}m", seconds / HOUR, (seconds % HOUR) / MINUTE)
    } else {
        format!("{}d {}h", seconds / DAY, (seconds % DAY) / HOUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds() {
        assert_eq!(format_remaining(45), "45s");
        assert_eq!(format_remaining(1), "1s");
        assert_eq!(format_remaining(59), "59s");
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(format_remaining(60), "1m 0s");
        assert_eq!(format_remaining(125), "2m 5s");
        assert_eq!(format_remaining(299), "4m 59s");
        assert_eq!(format_remaining(300), "5m 0s");
        assert_eq!(format_remaining(3599), "59m 59s");
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(format_remaining(3600), "1h 0m");
        assert_eq!(format_remaining(7325), "2h 2m");
        assert_eq!(format_remaining(86_399), "23h 59m");
    }

    #[test]
    fn test_days_and_hours() {
        assert_eq!(format_remaining(86_400), "1d 0h");
        assert_eq!(format_remaining(90_000), "1d 1h");
        assert_eq!(format_remaining(3 * 86_400 + 5 * 3600 + 59), "3d 5h");
    }

    #[test]
    fn test_time_up() {
        assert_eq!(format_remaining(0), "Time's up!");
        assert_eq!(format_remaining(-5), "Time's up!");
    }
}
