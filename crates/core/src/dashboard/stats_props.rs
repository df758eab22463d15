//! Property-based tests for dashboard statistic derivation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::stats::{DashboardCounts, DashboardStats, round_money, round_one, success_rate};

/// Strategy producing `(successful, total)` with `successful <= total`.
fn lead_outcomes() -> impl Strategy<Value = (u64, u64)> {
    (1u64..100_000).prop_flat_map(|total| (0..=total, Just(total)))
}

/// Strategy producing a score average with arbitrary precision in [0, 100].
fn raw_average() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000i64).prop_map(|micros| Decimal::new(micros, 6))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The success rate is a percentage whenever successes do not exceed leads.
    #[test]
    fn prop_success_rate_is_percentage((successful, total) in lead_outcomes()) {
        let rate = success_rate(successful, total);
        prop_assert!(rate >= Decimal::ZERO);
        prop_assert!(rate <= Decimal::ONE_HUNDRED);
    }

    /// The success rate never carries more than one decimal place.
    #[test]
    fn prop_success_rate_one_decimal((successful, total) in lead_outcomes()) {
        let rate = success_rate(successful, total);
        prop_assert!(rate.scale() <= 1);
    }

    /// With no leads the rate is zero regardless of investments.
    #[test]
    fn prop_no_leads_zero_rate(successful in 0u64..1_000) {
        prop_assert_eq!(success_rate(successful, 0), Decimal::ZERO);
    }

    /// Rounding moves a value by at most half a tenth and is idempotent.
    #[test]
    fn prop_round_one_close_and_stable(value in raw_average()) {
        let rounded = round_one(value);
        prop_assert!((rounded - value).abs() <= Decimal::new(5, 2));
        prop_assert_eq!(round_one(rounded), rounded);
    }

    /// Pipeline amounts always carry exactly two decimals and move by at most half a cent.
    #[test]
    fn prop_round_money_two_decimals(cents in 0i64..1_000_000_000_000, scale in 0u32..6) {
        let value = Decimal::new(cents, scale);
        let rounded = round_money(value);
        prop_assert_eq!(rounded.scale(), 2);
        prop_assert!((rounded - value).abs() <= Decimal::new(5, 3));
    }

    /// Raw counts pass through untouched.
    #[test]
    fn prop_counts_pass_through(
        active in 0u64..10_000,
        completed in 0u64..10_000,
        new_companies in 0u64..10_000,
        hot in 0u64..10_000,
    ) {
        let stats = DashboardStats::from(DashboardCounts {
            active_prospects: active,
            analysis_completed: completed,
            new_companies_this_week: new_companies,
            hot_leads: hot,
            ..DashboardCounts::default()
        });
        prop_assert_eq!(stats.active_prospects, active);
        prop_assert_eq!(stats.analysis_completed, completed);
        prop_assert_eq!(stats.new_companies_this_week, new_companies);
        prop_assert_eq!(stats.hot_leads, hot);
    }
}
