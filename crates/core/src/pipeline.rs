//! Deal pipeline vocabulary: lead status, priority, investment status.
//!
//! These are the domain-side enums; the database layer maps its Postgres enum
//! types onto them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum `ai_match_score` for a high/critical lead to count as hot.
pub const HOT_LEAD_MIN_SCORE: i32 = 80;

/// A string did not name any variant of a pipeline enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseChoiceError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma separated list of accepted values.
    pub expected: String,
}

impl ParseChoiceError {
    fn new(kind: &'static str, value: &str, choices: &[&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: choices.join(", "),
        }
    }
}

/// Qualification stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Not yet contacted.
    New,
    /// First contact made.
    Contacted,
    /// Passed initial screening.
    Qualified,
    /// Under investment committee review.
    UnderReview,
    /// Recommended for investment.
    Recommended,
    /// Declined.
    Passed,
    /// Investment made.
    Invested,
}

impl LeadStatus {
    /// Every status, in pipeline order.
    pub const ALL: [Self; 7] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::UnderReview,
        Self::Recommended,
        Self::Passed,
        Self::Invested,
    ];

    /// Statuses counted as active prospects.
    pub const ACTIVE: [Self; 4] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::UnderReview,
    ];

    /// Statuses that produce a follow-up task.
    pub const NEEDS_FOLLOW_UP: [Self; 2] = [Self::New, Self::Contacted];

    /// Wire/database name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::UnderReview => "under_review",
            Self::Recommended => "recommended",
            Self::Passed => "passed",
            Self::Invested => "invested",
        }
    }

    /// Returns true if the lead counts as an active prospect.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            Self::New | Self::Contacted | Self::Qualified | Self::UnderReview
        )
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ParseChoiceError::new("status", s, &Self::ALL.map(Self::as_str))
            })
    }
}

/// Priority of a lead, risk alert or recommendation.
///
/// Variants are declared in ascending order so `Ord` sorts by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low.
    Low,
    /// Medium (default for new leads).
    Medium,
    /// High.
    High,
    /// Critical.
    Critical,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Priorities that qualify a lead as hot.
    pub const HOT: [Self; 2] = [Self::High, Self::Critical];

    /// Wire/database name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Capitalized label used in task lists.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    /// Proposed to the committee.
    Proposed,
    /// Approved, not yet closed.
    Approved,
    /// Closed.
    Completed,
    /// Position exited.
    Exited,
}

impl InvestmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Proposed,
        Self::Approved,
        Self::Completed,
        Self::Exited,
    ];

    /// Statuses whose amounts make up the pipeline total.
    pub const PIPELINE: [Self; 2] = [Self::Proposed, Self::Approved];

    /// Statuses counted as successful for the success rate.
    pub const SUCCESSFUL: [Self; 2] = [Self::Completed, Self::Exited];

    /// Wire/database name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Exited => "exited",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_status_round_trip() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_lead_status_rejects_unknown() {
        let err = "archived".parse::<LeadStatus>().unwrap_err();
        assert_eq!(err.value, "archived");
        assert!(err.expected.contains("under_review"));
        assert!(err.to_string().starts_with("invalid status 'archived'"));
    }

    #[test]
    fn test_active_statuses() {
        let active: Vec<_> = LeadStatus::ALL.into_iter().filter(|s| s.is_active()).collect();
        assert_eq!(active, LeadStatus::ACTIVE.to_vec());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&LeadStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let json = serde_json::to_string(&InvestmentStatus::Exited).unwrap();
        assert_eq!(json, "\"exited\"");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_priority_title() {
        assert_eq!(Priority::Critical.title(), "Critical");
        assert_eq!(Priority::Low.title(), "Low");
    }
}
