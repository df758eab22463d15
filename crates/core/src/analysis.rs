//! Analysis kinds and cross-kind summaries.
//!
//! A company carries five independent collections of analyses. This module
//! names them and folds them together for the full-analysis view and the
//! dashboard's recent list.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pipeline::LeadStatus;

/// How many analyses of each kind feed the dashboard's recent list.
pub const RECENT_PER_KIND: u64 = 2;

/// Length of the dashboard's recent list.
pub const RECENT_LIMIT: usize = 5;

/// The five analysis variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Executive summary with findings, risks, opportunities.
    HighLevel,
    /// Public perception and sentiment.
    Perception,
    /// Market sizing, forces and channels.
    Market,
    /// Founders, executives and board.
    KeyIndividuals,
    /// Competitor landscape and SWOT.
    Competitive,
}

impl AnalysisKind {
    /// URL path segment, e.g. `key-individuals`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::HighLevel => "high-level",
            Self::Perception => "perception",
            Self::Market => "market",
            Self::KeyIndividuals => "key-individuals",
            Self::Competitive => "competitive",
        }
    }

    /// Value of the `analysis_type` field in responses.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::HighLevel => "high_level",
            Self::Perception => "perception",
            Self::Market => "market",
            Self::KeyIndividuals => "key_individuals",
            Self::Competitive => "competitive",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// The score fields shared by every analysis kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreSample {
    /// Overall score, if assessed.
    pub overall_score: Option<i32>,
    /// Confidence, if assessed.
    pub confidence_score: Option<f64>,
}

/// Summary block of the company full-analysis view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Analyses across all kinds.
    pub total_analyses: u64,
    /// Mean overall score, missing scores counted as zero.
    pub avg_score: f64,
    /// Mean confidence, missing confidences counted as zero.
    pub avg_confidence: f64,
    /// Sum of investment amounts.
    pub total_investment: Decimal,
    /// Lead count per status; statuses with no leads are omitted.
    pub lead_status_breakdown: BTreeMap<String, u64>,
}

impl MetricsSummary {
    /// Folds scores, investment amounts and lead statuses into a summary.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(
        samples: &[ScoreSample],
        investment_amounts: impl IntoIterator<Item = Decimal>,
        lead_statuses: impl IntoIterator<Item = LeadStatus>,
    ) -> Self {
        let total = samples.len();
        let (avg_score, avg_confidence) = if total == 0 {
            (0.0, 0.0)
        } else {
            let score_sum: i64 = samples
                .iter()
                .map(|s| i64::from(s.overall_score.unwrap_or(0)))
                .sum();
            let confidence_sum: f64 = samples
                .iter()
                .map(|s| s.confidence_score.unwrap_or(0.0))
                .sum();
            (
                score_sum as f64 / total as f64,
                confidence_sum / total as f64,
            )
        };

        Self {
            total_analyses: total as u64,
            avg_score,
            avg_confidence,
            total_investment: investment_amounts.into_iter().sum(),
            lead_status_breakdown: status_breakdown(lead_statuses),
        }
    }
}

/// Counts leads per status.
#[must_use]
pub fn status_breakdown(statuses: impl IntoIterator<Item = LeadStatus>) -> BTreeMap<String, u64> {
    let mut breakdown = BTreeMap::new();
    for status in statuses {
        *breakdown.entry(status.as_str().to_string()).or_insert(0) += 1;
    }
    breakdown
}

/// Anything that can be placed on the recent-analyses timeline.
pub trait Timestamped {
    /// Creation time used for ordering.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Merges per-kind recent lists into one list, newest first, truncated to `limit`.
///
/// Ties keep the order in which the lists were supplied.
#[must_use]
pub fn merge_recent<T: Timestamped>(lists: impl IntoIterator<Item = Vec<T>>, limit: usize) -> Vec<T> {
    let mut merged: Vec<T> = lists.into_iter().flatten().collect();
    merged.sort_by_key(|item| std::cmp::Reverse(item.created_at()));
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(AnalysisKind::HighLevel, "high-level", "high_level")]
    #[case(AnalysisKind::Perception, "perception", "perception")]
    #[case(AnalysisKind::KeyIndividuals, "key-individuals", "key_individuals")]
    #[case(AnalysisKind::Competitive, "competitive", "competitive")]
    fn test_kind_names(#[case] kind: AnalysisKind, #[case] slug: &str, #[case] type_name: &str) {
        assert_eq!(kind.slug(), slug);
        assert_eq!(kind.type_name(), type_name);
        assert_eq!(kind.to_string(), type_name);
    }

    #[test]
    fn test_summary_empty() {
        let summary = MetricsSummary::compute(&[], [Decimal::ZERO; 0], [LeadStatus::New; 0]);
        assert_eq!(summary.total_analyses, 0);
        assert!(summary.avg_score.abs() < f64::EPSILON);
        assert!(summary.avg_confidence.abs() < f64::EPSILON);
        assert_eq!(summary.total_investment, Decimal::ZERO);
        assert!(summary.lead_status_breakdown.is_empty());
    }

    #[test]
    fn test_summary_counts_missing_scores_as_zero() {
        let samples = [
            ScoreSample {
                overall_score: Some(80),
                confidence_score: Some(0.9),
            },
            ScoreSample {
                overall_score: None,
                confidence_score: None,
            },
        ];
        let summary = MetricsSummary::compute(
            &samples,
            [dec!(1000000.00), dec!(250000.50)],
            [LeadStatus::New, LeadStatus::New, LeadStatus::Qualified],
        );

        assert_eq!(summary.total_analyses, 2);
        assert!((summary.avg_score - 40.0).abs() < 1e-9);
        assert!((summary.avg_confidence - 0.45).abs() < 1e-9);
        assert_eq!(summary.total_investment, dec!(1250000.50));
        assert_eq!(summary.lead_status_breakdown.get("new"), Some(&2));
        assert_eq!(summary.lead_status_breakdown.get("qualified"), Some(&1));
        assert_eq!(summary.lead_status_breakdown.get("passed"), None);
    }

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, DateTime<Utc>);

    impl Timestamped for Item {
        fn created_at(&self) -> DateTime<Utc> {
            self.1
        }
    }

    #[test]
    fn test_merge_recent_orders_and_truncates() {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let at = |hours| base + Duration::hours(hours);

        let merged = merge_recent(
            vec![
                vec![Item("hl-1", at(10)), Item("hl-2", at(1))],
                vec![Item("p-1", at(9)), Item("p-2", at(8))],
                vec![Item("m-1", at(7))],
                vec![],
                vec![Item("c-1", at(11)), Item("c-2", at(2))],
            ],
            RECENT_LIMIT,
        );

        let names: Vec<_> = merged.iter().map(|item| item.0).collect();
        assert_eq!(names, vec!["c-1", "hl-1", "p-1", "p-2", "m-1"]);
    }

    #[test]
    fn test_merge_recent_fewer_than_limit() {
        let now = Utc::now();
        let merged = merge_recent(vec![vec![Item("only", now)]], RECENT_LIMIT);
        assert_eq!(merged.len(), 1);
    }
}
