//! Human-readable formatting for CLI output.

use std::time::Duration;

/// Format a duration as milliseconds or seconds, whichever reads better.
#[must_use]
pub fn duration(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1_000.0;
    if ms < 1_000.0 {
        format!("{ms:.0}ms")
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Format a percentage with one decimal place.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_second_durations_use_millis() {
        assert_eq!(duration(Duration::from_millis(42)), "42ms");
        assert_eq!(duration(Duration::from_millis(999)), "999ms");
    }

    #[test]
    fn longer_durations_use_seconds() {
        assert_eq!(duration(Duration::from_millis(1_500)), "1.50s");
        assert_eq!(duration(Duration::from_secs(30)), "30.00s");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(percent(100.0), "100.0%");
        assert_eq!(percent(83.333), "83.3%");
    }
}
