//! Postgres enum types mapped by `SeaORM`.
//!
//! Serde names match the database labels so request and response bodies can
//! use these types directly.

use dealscope_core::{InvestmentStatus as CoreInvestmentStatus, LeadStatus as CoreLeadStatus, Priority};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Funding stage of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "company_stage")]
#[serde(rename_all = "kebab-case")]
pub enum CompanyStage {
    #[sea_orm(string_value = "pre-seed")]
    PreSeed,
    #[sea_orm(string_value = "seed")]
    Seed,
    #[sea_orm(string_value = "series-a")]
    SeriesA,
    #[sea_orm(string_value = "series-b")]
    SeriesB,
    #[sea_orm(string_value = "series-c")]
    SeriesC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lead_status")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "contacted")]
    Contacted,
    #[sea_orm(string_value = "qualified")]
    Qualified,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "recommended")]
    Recommended,
    #[sea_orm(string_value = "passed")]
    Passed,
    #[sea_orm(string_value = "invested")]
    Invested,
}

/// Shared by leads, risk alerts and strategic recommendations.
///
/// Declared in ascending order, so `ORDER BY priority DESC` puts critical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "priority_level")]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "investment_status")]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    #[sea_orm(string_value = "proposed")]
    Proposed,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "exited")]
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "profile_role")]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    #[sea_orm(string_value = "analyst")]
    Analyst,
    #[sea_orm(string_value = "portfolio_manager")]
    PortfolioManager,
    #[sea_orm(string_value = "partner")]
    Partner,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl ProfileRole {
    /// Database label, also used as the JWT role claim.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyst => "analyst",
            Self::PortfolioManager => "portfolio_manager",
            Self::Partner => "partner",
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "trend_direction")]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    #[sea_orm(string_value = "up")]
    Up,
    #[sea_orm(string_value = "down")]
    Down,
    #[sea_orm(string_value = "stable")]
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "engagement_level")]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "very_high")]
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reliability_level")]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "verified")]
    Verified,
}

/// Intensity of a market force or impact of an industry trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "impact_level")]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

impl From<CoreLeadStatus> for LeadStatus {
    fn from(status: CoreLeadStatus) -> Self {
        match status {
            CoreLeadStatus::New => Self::New,
            CoreLeadStatus::Contacted => Self::Contacted,
            CoreLeadStatus::Qualified => Self::Qualified,
            CoreLeadStatus::UnderReview => Self::UnderReview,
            CoreLeadStatus::Recommended => Self::Recommended,
            CoreLeadStatus::Passed => Self::Passed,
            CoreLeadStatus::Invested => Self::Invested,
        }
    }
}

impl From<LeadStatus> for CoreLeadStatus {
    fn from(status: LeadStatus) -> Self {
        match status {
            LeadStatus::New => Self::New,
            LeadStatus::Contacted => Self::Contacted,
            LeadStatus::Qualified => Self::Qualified,
            LeadStatus::UnderReview => Self::UnderReview,
            LeadStatus::Recommended => Self::Recommended,
            LeadStatus::Passed => Self::Passed,
            LeadStatus::Invested => Self::Invested,
        }
    }
}

impl From<Priority> for PriorityLevel {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => Self::Low,
            Priority::Medium => Self::Medium,
            Priority::High => Self::High,
            Priority::Critical => Self::Critical,
        }
    }
}

impl From<PriorityLevel> for Priority {
    fn from(priority: PriorityLevel) -> Self {
        match priority {
            PriorityLevel::Low => Self::Low,
            PriorityLevel::Medium => Self::Medium,
            PriorityLevel::High => Self::High,
            PriorityLevel::Critical => Self::Critical,
        }
    }
}

impl From<CoreInvestmentStatus> for InvestmentStatus {
    fn from(status: CoreInvestmentStatus) -> Self {
        match status {
            CoreInvestmentStatus::Proposed => Self::Proposed,
            CoreInvestmentStatus::Approved => Self::Approved,
            CoreInvestmentStatus::Completed => Self::Completed,
            CoreInvestmentStatus::Exited => Self::Exited,
        }
    }
}

impl From<InvestmentStatus> for CoreInvestmentStatus {
    fn from(status: InvestmentStatus) -> Self {
        match status {
            InvestmentStatus::Proposed => Self::Proposed,
            InvestmentStatus::Approved => Self::Approved,
            InvestmentStatus::Completed => Self::Completed,
            InvestmentStatus::Exited => Self::Exited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_status_round_trip_through_core() {
        for status in CoreLeadStatus::ALL {
            let db: LeadStatus = status.into();
            assert_eq!(CoreLeadStatus::from(db), status);
            assert_eq!(serde_json::to_value(db).unwrap(), status.as_str());
        }
    }

    #[test]
    fn test_priority_round_trip_through_core() {
        for priority in Priority::ALL {
            let db: PriorityLevel = priority.into();
            assert_eq!(Priority::from(db), priority);
        }
    }

    #[test]
    fn test_investment_status_round_trip_through_core() {
        for status in CoreInvestmentStatus::ALL {
            let db: InvestmentStatus = status.into();
            assert_eq!(CoreInvestmentStatus::from(db), status);
        }
    }

    #[test]
    fn test_stage_serde_uses_hyphens() {
        assert_eq!(serde_json::to_value(CompanyStage::PreSeed).unwrap(), "pre-seed");
        assert_eq!(
            serde_json::from_value::<CompanyStage>(serde_json::json!("series-b")).unwrap(),
            CompanyStage::SeriesB
        );
    }

    #[test]
    fn test_engagement_serde() {
        assert_eq!(
            serde_json::to_value(EngagementLevel::VeryHigh).unwrap(),
            "very_high"
        );
    }
}
