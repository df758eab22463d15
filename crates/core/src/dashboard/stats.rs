//! Headline statistics shown on the dashboard.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw figures as read from storage, before derivation and rounding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    /// Leads whose status is one of `LeadStatus::ACTIVE`.
    pub active_prospects: u64,
    /// Sum of proposed and approved investment amounts; `None` when there are none.
    pub investment_pipeline: Option<Decimal>,
    /// Completed analyses of every kind created this month.
    pub analysis_completed: u64,
    /// All leads.
    pub total_leads: u64,
    /// Completed or exited investments.
    pub successful_investments: u64,
    /// Companies created in the trailing seven days.
    pub new_companies_this_week: u64,
    /// Average of non-null lead match scores.
    pub avg_match_score: Option<Decimal>,
    /// High or critical leads scoring at least `HOT_LEAD_MIN_SCORE`.
    pub hot_leads: u64,
}

/// Dashboard statistics as returned by `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Leads in an active status.
    pub active_prospects: u64,
    /// Pipeline amount.
    pub investment_pipeline: Decimal,
    /// Completed analyses this month.
    pub analysis_completed: u64,
    /// Successful investments per lead, as a percentage with one decimal.
    #[serde(with = "rust_decimal::serde::float")]
    pub success_rate: Decimal,
    /// Companies created this week.
    pub new_companies_this_week: u64,
    /// Average lead match score with one decimal.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_match_score: Decimal,
    /// Hot lead count.
    pub hot_leads: u64,
}

impl From<DashboardCounts> for DashboardStats {
    fn from(counts: DashboardCounts) -> Self {
        Self {
            active_prospects: counts.active_prospects,
            investment_pipeline: round_money(counts.investment_pipeline.unwrap_or(Decimal::ZERO)),
            analysis_completed: counts.analysis_completed,
            success_rate: success_rate(counts.successful_investments, counts.total_leads),
            new_companies_this_week: counts.new_companies_this_week,
            avg_match_score: counts.avg_match_score.map_or(Decimal::ZERO, round_one),
            hot_leads: counts.hot_leads,
        }
    }
}

/// Successful investments over total leads, in percent, rounded to one decimal.
///
/// Returns zero when there are no leads.
#[must_use]
pub fn success_rate(successful: u64, total_leads: u64) -> Decimal {
    if total_leads == 0 {
        return Decimal::ZERO;
    }
    round_one(Decimal::from(successful) * Decimal::ONE_HUNDRED / Decimal::from(total_leads))
}

/// Rounds to cents and fixes the scale at two places, so zero reads `0.00`.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut value = value.round_dp(2);
    value.rescale(2);
    value
}

/// Rounds to one decimal place, ties to even.
#[must_use]
pub fn round_one(value: Decimal) -> Decimal {
    value.round_dp(1)
}

/// Midnight UTC on the first day of `now`'s month.
#[must_use]
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map_or(now, |start| start.and_utc())
}

/// Start of the trailing seven-day window.
#[must_use]
pub fn week_ago(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_success_rate_no_leads() {
        assert_eq!(success_rate(0, 0), Decimal::ZERO);
        assert_eq!(success_rate(3, 0), Decimal::ZERO);
    }

    #[test]
    fn test_success_rate_one_of_two() {
        assert_eq!(success_rate(1, 2), dec!(50.0));
    }

    #[test]
    fn test_success_rate_rounds_to_one_decimal() {
        // 1/3 = 33.333..%
        assert_eq!(success_rate(1, 3), dec!(33.3));
        // 2/3 = 66.666..%
        assert_eq!(success_rate(2, 3), dec!(66.7));
    }

    #[test]
    fn test_round_one_ties_to_even() {
        assert_eq!(round_one(dec!(84.25)), dec!(84.2));
        assert_eq!(round_one(dec!(84.35)), dec!(84.4));
    }

    #[test]
    fn test_stats_from_empty_counts() {
        let stats = DashboardStats::from(DashboardCounts::default());
        assert_eq!(stats.investment_pipeline, Decimal::ZERO);
        assert_eq!(stats.success_rate, Decimal::ZERO);
        assert_eq!(stats.avg_match_score, Decimal::ZERO);
        assert_eq!(stats.hot_leads, 0);
    }

    #[test]
    fn test_stats_from_counts() {
        let stats = DashboardStats::from(DashboardCounts {
            active_prospects: 4,
            investment_pipeline: Some(dec!(2500000.00)),
            analysis_completed: 3,
            total_leads: 8,
            successful_investments: 2,
            new_companies_this_week: 1,
            avg_match_score: Some(dec!(77.6666666)),
            hot_leads: 2,
        });

        assert_eq!(stats.active_prospects, 4);
        assert_eq!(stats.investment_pipeline, dec!(2500000.00));
        assert_eq!(stats.success_rate, dec!(25.0));
        assert_eq!(stats.avg_match_score, dec!(77.7));
    }

    #[test]
    fn test_stats_serialize_rates_as_numbers() {
        let stats = DashboardStats::from(DashboardCounts {
            total_leads: 2,
            successful_investments: 1,
            investment_pipeline: Some(dec!(100.50)),
            ..DashboardCounts::default()
        });
        let value = serde_json::to_value(&stats).unwrap();

        assert!(value["success_rate"].is_number());
        assert!(value["avg_match_score"].is_number());
        assert_eq!(value["investment_pipeline"], "100.50");
    }

    #[test]
    fn test_pipeline_always_has_two_decimals() {
        let empty = serde_json::to_value(DashboardStats::from(DashboardCounts::default())).unwrap();
        assert_eq!(empty["investment_pipeline"], "0.00");

        let stats = DashboardStats::from(DashboardCounts {
            investment_pipeline: Some(dec!(250.5)),
            ..DashboardCounts::default()
        });
        assert_eq!(serde_json::to_value(&stats).unwrap()["investment_pipeline"], "250.50");

        assert_eq!(round_money(dec!(1000)).to_string(), "1000.00");
        assert_eq!(round_money(dec!(12.345)).to_string(), "12.34");
    }

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2026, 3, 17, 15, 42, 9).unwrap();
        assert_eq!(
            month_start(now),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_week_ago() {
        let now = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();
        assert_eq!(
            week_ago(now),
            Utc.with_ymd_and_hms(2026, 2, 24, 12, 0, 0).unwrap()
        );
    }
}
