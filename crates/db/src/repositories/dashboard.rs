//! Dashboard repository: headline statistics, recent analyses and the
//! caller's follow-up tasks.
//!
//! Everything is computed per request from the live tables.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, Func, SimpleExpr},
};
use uuid::Uuid;

use dealscope_core::analysis::{RECENT_LIMIT, RECENT_PER_KIND, merge_recent};
use dealscope_core::dashboard::{
    DashboardCounts, DashboardStats, FOLLOW_UP_TASK_LIMIT, UpcomingTask, month_start, week_ago,
};
use dealscope_core::pipeline::HOT_LEAD_MIN_SCORE;
use dealscope_core::{InvestmentStatus as CoreInvestmentStatus, LeadStatus as CoreLeadStatus, Priority};

use super::analysis::{AnalysisSummary, count_completed_since, recent};
use super::error::RepoResult;
use super::names;
use crate::entities::{
    companies, competitive_analyses, high_level_analyses, investments, key_individuals_analyses,
    leads, market_analyses, perception_analyses,
    sea_orm_active_enums::{InvestmentStatus, LeadStatus, PriorityLevel},
};

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Headline statistics as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the aggregate queries fail.
    pub async fn stats(&self, now: DateTime<Utc>) -> RepoResult<DashboardStats> {
        let counts = DashboardCounts {
            active_prospects: self.count_leads_with_status(&CoreLeadStatus::ACTIVE).await?,
            investment_pipeline: self.pipeline_total().await?,
            analysis_completed: self.completed_analyses_since(month_start(now)).await?,
            total_leads: leads::Entity::find().count(&self.db).await?,
            successful_investments: investments::Entity::find()
                .filter(investments::Column::Status.is_in(db_statuses(&CoreInvestmentStatus::SUCCESSFUL)))
                .count(&self.db)
                .await?,
            new_companies_this_week: companies::Entity::find()
                .filter(companies::Column::CreatedAt.gte(week_ago(now)))
                .count(&self.db)
                .await?,
            avg_match_score: self.avg_match_score().await?,
            hot_leads: leads::Entity::find()
                .filter(leads::Column::Priority.is_in(Priority::HOT.map(PriorityLevel::from)))
                .filter(leads::Column::AiMatchScore.gte(HOT_LEAD_MIN_SCORE))
                .count(&self.db)
                .await?,
        };

        Ok(DashboardStats::from(counts))
    }

    /// The newest analyses across every variant.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the per-variant queries fail.
    pub async fn recent_analyses(&self) -> RepoResult<Vec<AnalysisSummary>> {
        let lists = vec![
            recent::<high_level_analyses::Entity, _>(&self.db, RECENT_PER_KIND).await?,
            recent::<perception_analyses::Entity, _>(&self.db, RECENT_PER_KIND).await?,
            recent::<market_analyses::Entity, _>(&self.db, RECENT_PER_KIND).await?,
            recent::<key_individuals_analyses::Entity, _>(&self.db, RECENT_PER_KIND).await?,
            recent::<competitive_analyses::Entity, _>(&self.db, RECENT_PER_KIND).await?,
        ];
        Ok(merge_recent(lists, RECENT_LIMIT))
    }

    /// Follow-up tasks for leads assigned to `user_id`, oldest lead first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn upcoming_tasks(&self, user_id: Uuid, now: DateTime<Utc>) -> RepoResult<Vec<UpcomingTask>> {
        let rows = leads::Entity::find()
            .filter(leads::Column::AssignedTo.eq(user_id))
            .filter(leads::Column::Status.is_in(CoreLeadStatus::NEEDS_FOLLOW_UP.map(LeadStatus::from)))
            .order_by_asc(leads::Column::CreatedAt)
            .order_by_asc(leads::Column::Id)
            .limit(FOLLOW_UP_TASK_LIMIT)
            .all(&self.db)
            .await?;

        let company_names = names::company_names(&self.db, rows.iter().map(|l| l.company_id)).await?;
        let today = now.date_naive();

        Ok(rows
            .into_iter()
            .map(|lead| {
                let company = company_names.get(&lead.company_id).map_or("", String::as_str);
                UpcomingTask::follow_up(
                    lead.id,
                    company,
                    lead.priority.into(),
                    lead.created_at.with_timezone(&Utc),
                    today,
                )
            })
            .collect())
    }

    async fn count_leads_with_status(&self, statuses: &[CoreLeadStatus]) -> Result<u64, DbErr> {
        leads::Entity::find()
            .filter(leads::Column::Status.is_in(statuses.iter().copied().map(LeadStatus::from)))
            .count(&self.db)
            .await
    }

    async fn pipeline_total(&self) -> Result<Option<Decimal>, DbErr> {
        let total: Option<Option<Decimal>> = investments::Entity::find()
            .select_only()
            .column_as(investments::Column::Amount.sum(), "total")
            .filter(investments::Column::Status.is_in(db_statuses(&CoreInvestmentStatus::PIPELINE)))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten())
    }

    async fn avg_match_score(&self) -> Result<Option<Decimal>, DbErr> {
        let avg: Option<Option<Decimal>> = leads::Entity::find()
            .select_only()
            .column_as(SimpleExpr::from(Func::avg(Expr::col(leads::Column::AiMatchScore))), "avg")
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(avg.flatten())
    }

    async fn completed_analyses_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        Ok(count_completed_since::<high_level_analyses::Entity, _>(&self.db, since).await?
            + count_completed_since::<perception_analyses::Entity, _>(&self.db, since).await?
            + count_completed_since::<market_analyses::Entity, _>(&self.db, since).await?
            + count_completed_since::<key_individuals_analyses::Entity, _>(&self.db, since).await?
            + count_completed_since::<competitive_analyses::Entity, _>(&self.db, since).await?)
    }
}

fn db_statuses(statuses: &[CoreInvestmentStatus]) -> Vec<InvestmentStatus> {
    statuses.iter().copied().map(InvestmentStatus::from).collect()
}
