//! Read-only fields derived from stored values at serialization time.

use chrono::NaiveDate;

use crate::pipeline::Priority;

/// Human readable headcount band, e.g. `50-200`, `10+` or `Unknown`.
///
/// A zero bound is treated the same as a missing one.
#[must_use]
pub fn employee_range(min: Option<i32>, max: Option<i32>) -> String {
    match (min.filter(|&n| n != 0), max.filter(|&n| n != 0)) {
        (Some(min), Some(max)) => format!("{min}-{max}"),
        (Some(min), None) => format!("{min}+"),
        _ => "Unknown".to_string(),
    }
}

/// Relative rendering of a past date: `Today`, `3 days ago`, `2 weeks ago`,
/// `1 month ago`, or `Mar 04, 2024` once a year has passed.
///
/// Dates after `today` render as an absolute date.
#[must_use]
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural_ago(days / 7, "week"),
        30..=364 => plural_ago(days / 30, "month"),
        _ => date.format("%b %d, %Y").to_string(),
    }
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s ago")
    } else {
        format!("{count} {unit} ago")
    }
}

/// Brand metric score relative to its industry benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkComparison {
    /// `current - benchmark`.
    pub difference: i32,
    /// Strictly above the benchmark.
    pub is_above: bool,
}

impl BenchmarkComparison {
    /// Compares a current score with its benchmark.
    #[must_use]
    pub const fn new(current: i32, benchmark: i32) -> Self {
        Self {
            difference: current - benchmark,
            is_above: current > benchmark,
        }
    }
}

/// Border color used to render a risk alert.
#[must_use]
pub const fn alert_color(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical | Priority::High => "red",
        Priority::Medium => "yellow",
        Priority::Low => "blue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(50), Some(200), "50-200")]
    #[case(Some(10), None, "10+")]
    #[case(None, Some(200), "Unknown")]
    #[case(None, None, "Unknown")]
    #[case(Some(0), Some(20), "Unknown")]
    #[case(Some(15), Some(0), "15+")]
    fn test_employee_range(
        #[case] min: Option<i32>,
        #[case] max: Option<i32>,
        #[case] expected: &str,
    ) {
        assert_eq!(employee_range(min, max), expected);
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(day(2026, 6, 15), "Today")]
    #[case(day(2026, 6, 14), "Yesterday")]
    #[case(day(2026, 6, 12), "3 days ago")]
    #[case(day(2026, 6, 8), "1 week ago")]
    #[case(day(2026, 6, 1), "2 weeks ago")]
    #[case(day(2026, 5, 16), "1 month ago")]
    #[case(day(2026, 3, 1), "3 months ago")]
    #[case(day(2025, 3, 4), "Mar 04, 2025")]
    #[case(day(2026, 6, 20), "Jun 20, 2026")]
    fn test_relative_date(#[case] date: NaiveDate, #[case] expected: &str) {
        assert_eq!(relative_date(date, day(2026, 6, 15)), expected);
    }

    #[test]
    fn test_benchmark_comparison() {
        let above = BenchmarkComparison::new(78, 70);
        assert_eq!(above.difference, 8);
        assert!(above.is_above);

        let equal = BenchmarkComparison::new(70, 70);
        assert_eq!(equal.difference, 0);
        assert!(!equal.is_above);

        let below = BenchmarkComparison::new(61, 70);
        assert_eq!(below.difference, -9);
    }

    #[test]
    fn test_alert_color() {
        assert_eq!(alert_color(Priority::Critical), "red");
        assert_eq!(alert_color(Priority::High), "red");
        assert_eq!(alert_color(Priority::Medium), "yellow");
        assert_eq!(alert_color(Priority::Low), "blue");
    }
}
