//! Shared formatting utilities for the Wharf views.

use chrono::NaiveDate;

/// Format a user count for axis labels with an appropriate scale suffix.
///
/// - Values >= 1M display as "X.XM"
/// - Values >= 1K display as "X.XK"
/// - Everything else displays as a plain integer
pub fn format_count(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Format a calendar date for chart axis labels.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format an elapsed duration (milliseconds) as a relative time string.
///
/// Returns strings like "just now", "5s ago", "3m ago", "2h ago".
pub fn format_elapsed(diff_ms: i64) -> String {
    if diff_ms < 1000 {
        "just now".to_string()
    } else if diff_ms < 60_000 {
        format!("{}s ago", diff_ms / 1000)
    } else if diff_ms < 3_600_000 {
        format!("{}m ago", diff_ms / 60_000)
    } else {
        format!("{}h ago", diff_ms / 3_600_000)
    }
}

/// Get the current timestamp in milliseconds since Unix epoch.
pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(42.0), "42");
        assert_eq!(format_count(1500.0), "1.5K");
        assert_eq!(format_count(2500000.0), "2.5M");
        assert_eq!(format_count(-1500.0), "-1.5K");
    }

    #[test]
    fn test_format_date() {
        let date: NaiveDate = "2024-03-09".parse().unwrap();
        assert_eq!(format_date(date), "2024-03-09");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(500), "just now");
        assert_eq!(format_elapsed(30_000), "30s ago");
        assert_eq!(format_elapsed(300_000), "5m ago");
        assert_eq!(format_elapsed(7_200_000), "2h ago");
    }
}
