//! Competitive analyses: competitor landscape, SWOT and strategic advice.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait, prelude::DateTimeWithTimeZone,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::{
    AnalysisCommonView, AnalysisFields, AnalysisFieldsPatch, AnalysisRepository,
    apply_common_patch, common_view, find_row, insert_children, json_array, map_rows,
    replace_children,
};
use crate::entities::{
    companies, competitive_analyses, competitive_competitors, competitive_strategic_recommendations,
    sea_orm_active_enums::{PriorityLevel, TrendDirection},
};
use crate::repositories::ensure_exists;
use crate::repositories::error::RepoResult;

/// Placeholder logo for competitors without one.
pub const DEFAULT_LOGO: &str = "📊";

fn default_logo() -> String {
    DEFAULT_LOGO.to_string()
}

const fn default_trend() -> TrendDirection {
    TrendDirection::Stable
}

const fn default_priority() -> PriorityLevel {
    PriorityLevel::Medium
}

/// A competitor profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompetitorInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub position: String,
    #[serde(default = "default_logo")]
    #[validate(length(max = 10))]
    pub logo: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub employees: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub headquarters: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub founded: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub funding: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub market_share: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub revenue: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub score: i32,
    #[serde(default = "default_trend")]
    pub trend: TrendDirection,
    #[serde(default)]
    pub strengths: Vec<Value>,
    #[serde(default)]
    pub weaknesses: Vec<Value>,
    #[serde(default)]
    pub display_order: i32,
}

impl CompetitorInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> competitive_competitors::ActiveModel {
        competitive_competitors::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            name: Set(self.name),
            position: Set(self.position),
            logo: Set(self.logo),
            employees: Set(self.employees),
            headquarters: Set(self.headquarters),
            founded: Set(self.founded),
            funding: Set(self.funding),
            market_share: Set(self.market_share),
            revenue: Set(self.revenue),
            score: Set(self.score),
            trend: Set(self.trend),
            strengths: Set(json_array(self.strengths)),
            weaknesses: Set(json_array(self.weaknesses)),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A group of strategic recommendations.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StrategicRecommendationInput {
    #[validate(length(min = 1, max = 255))]
    pub category: String,
    #[serde(default = "default_priority")]
    pub priority: PriorityLevel,
    #[serde(default)]
    pub recommendations: Vec<Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
}

impl StrategicRecommendationInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> competitive_strategic_recommendations::ActiveModel {
        competitive_strategic_recommendations::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            category: Set(self.category),
            priority: Set(self.priority),
            recommendations: Set(json_array(self.recommendations)),
            description: Set(self.description),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Create body for a competitive analysis.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompetitiveInput {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFields,
    /// E.g. `Challenger`.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub competitive_position: String,
    #[serde(default)]
    pub competitor_analysis: Vec<Value>,
    #[serde(default)]
    pub swot_strengths: Vec<Value>,
    #[serde(default)]
    pub swot_weaknesses: Vec<Value>,
    #[serde(default)]
    pub swot_opportunities: Vec<Value>,
    #[serde(default)]
    pub swot_threats: Vec<Value>,
    #[serde(default)]
    pub competitive_advantages: Vec<Value>,
    #[serde(default)]
    pub competitive_threats: Vec<Value>,
    #[serde(default)]
    pub differentiation_factors: Vec<Value>,
    /// Free-form list stored on the analysis row.
    #[serde(default)]
    pub strategic_recommendations: Vec<Value>,
    #[serde(default)]
    #[validate(nested)]
    pub competitors: Vec<CompetitorInput>,
    /// Structured recommendation groups.
    #[serde(default)]
    #[validate(nested)]
    pub recommendation_groups: Vec<StrategicRecommendationInput>,
}

/// Update body for a competitive analysis.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCompetitiveInput {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFieldsPatch,
    #[validate(length(max = 100))]
    pub competitive_position: Option<String>,
    pub competitor_analysis: Option<Vec<Value>>,
    pub swot_strengths: Option<Vec<Value>>,
    pub swot_weaknesses: Option<Vec<Value>>,
    pub swot_opportunities: Option<Vec<Value>>,
    pub swot_threats: Option<Vec<Value>>,
    pub competitive_advantages: Option<Vec<Value>>,
    pub competitive_threats: Option<Vec<Value>>,
    pub differentiation_factors: Option<Vec<Value>>,
    pub strategic_recommendations: Option<Vec<Value>>,
    #[validate(nested)]
    pub competitors: Option<Vec<CompetitorInput>>,
    #[validate(nested)]
    pub recommendation_groups: Option<Vec<StrategicRecommendationInput>>,
}

/// Competitive analysis detail.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitiveDetail {
    #[serde(flatten)]
    pub common: AnalysisCommonView,
    pub competitive_position: String,
    pub competitor_analysis: Value,
    pub swot_strengths: Value,
    pub swot_weaknesses: Value,
    pub swot_opportunities: Value,
    pub swot_threats: Value,
    pub competitive_advantages: Value,
    pub competitive_threats: Value,
    pub differentiation_factors: Value,
    pub strategic_recommendations: Value,
    pub competitors: Vec<competitive_competitors::Model>,
    pub recommendation_groups: Vec<competitive_strategic_recommendations::Model>,
}

/// Repository for competitive analyses.
#[derive(Debug, Clone)]
pub struct CompetitiveRepository {
    db: DatabaseConnection,
}

impl CompetitiveRepository {
    async fn detail(&self, model: competitive_analyses::Model) -> RepoResult<CompetitiveDetail> {
        use competitive_competitors as competitors;
        use competitive_strategic_recommendations as groups;

        let common = common_view::<competitive_analyses::Entity, _>(&self.db, &model).await?;

        let competitors = competitors::Entity::find()
            .filter(competitors::Column::AnalysisId.eq(model.id))
            .order_by_asc(competitors::Column::DisplayOrder)
            .order_by_desc(competitors::Column::Score)
            .order_by_asc(competitors::Column::Name)
            .all(&self.db)
            .await?;

        let recommendation_groups = groups::Entity::find()
            .filter(groups::Column::AnalysisId.eq(model.id))
            .order_by_asc(groups::Column::DisplayOrder)
            .order_by_desc(groups::Column::Priority)
            .order_by_asc(groups::Column::Category)
            .all(&self.db)
            .await?;

        Ok(CompetitiveDetail {
            common,
            competitive_position: model.competitive_position,
            competitor_analysis: model.competitor_analysis,
            swot_strengths: model.swot_strengths,
            swot_weaknesses: model.swot_weaknesses,
            swot_opportunities: model.swot_opportunities,
            swot_threats: model.swot_threats,
            competitive_advantages: model.competitive_advantages,
            competitive_threats: model.competitive_threats,
            differentiation_factors: model.differentiation_factors,
            strategic_recommendations: model.strategic_recommendations,
            competitors,
            recommendation_groups,
        })
    }
}

#[async_trait]
impl AnalysisRepository for CompetitiveRepository {
    type Entity = competitive_analyses::Entity;
    type Create = CreateCompetitiveInput;
    type Update = UpdateCompetitiveInput;
    type Detail = CompetitiveDetail;

    fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn create(&self, input: CreateCompetitiveInput, analyst_id: Uuid) -> RepoResult<CompetitiveDetail> {
        ensure_exists::<companies::Entity>(&self.db, input.common.company, "Company").await?;

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let id = Uuid::new_v4();

        let model = competitive_analyses::ActiveModel {
            id: Set(id),
            company_id: Set(input.common.company),
            title: Set(input.common.title),
            summary: Set(input.common.summary),
            overall_score: Set(input.common.overall_score),
            confidence_score: Set(input.common.confidence_score),
            analyst_id: Set(Some(analyst_id)),
            is_completed: Set(input.common.is_completed),
            competitive_position: Set(input.competitive_position),
            competitor_analysis: Set(json_array(input.competitor_analysis)),
            swot_strengths: Set(json_array(input.swot_strengths)),
            swot_weaknesses: Set(json_array(input.swot_weaknesses)),
            swot_opportunities: Set(json_array(input.swot_opportunities)),
            swot_threats: Set(json_array(input.swot_threats)),
            competitive_advantages: Set(json_array(input.competitive_advantages)),
            competitive_threats: Set(json_array(input.competitive_threats)),
            differentiation_factors: Set(json_array(input.differentiation_factors)),
            strategic_recommendations: Set(json_array(input.strategic_recommendations)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        insert_children(&txn, map_rows(input.competitors, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.recommendation_groups, |r| r.into_active(id, now))).await?;
        txn.commit().await?;

        self.detail(model).await
    }

    async fn find(&self, id: Uuid) -> RepoResult<CompetitiveDetail> {
        let model = find_row::<competitive_analyses::Entity, _>(&self.db, id).await?;
        self.detail(model).await
    }

    async fn update(&self, id: Uuid, input: UpdateCompetitiveInput) -> RepoResult<CompetitiveDetail> {
        let model = find_row::<competitive_analyses::Entity, _>(&self.db, id).await?;
        if let Some(company_id) = input.common.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut active = model.into_active_model();
        apply_common_patch!(active, input.common);
        if let Some(position) = input.competitive_position {
            active.competitive_position = Set(position);
        }
        let arrays = [
            (&mut active.competitor_analysis, input.competitor_analysis),
            (&mut active.swot_strengths, input.swot_strengths),
            (&mut active.swot_weaknesses, input.swot_weaknesses),
            (&mut active.swot_opportunities, input.swot_opportunities),
            (&mut active.swot_threats, input.swot_threats),
            (&mut active.competitive_advantages, input.competitive_advantages),
            (&mut active.competitive_threats, input.competitive_threats),
            (&mut active.differentiation_factors, input.differentiation_factors),
            (&mut active.strategic_recommendations, input.strategic_recommendations),
        ];
        for (column, items) in arrays {
            if let Some(items) = items {
                *column = Set(json_array(items));
            }
        }
        let model = active.update(&txn).await?;

        if let Some(rows) = input.competitors {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, competitive_competitors::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.recommendation_groups {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, competitive_strategic_recommendations::Column::AnalysisId, id, rows)
                .await?;
        }
        txn.commit().await?;

        self.detail(model).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_defaults() {
        let input: CompetitorInput =
            serde_json::from_value(serde_json::json!({ "name": "Globex" })).unwrap();

        assert_eq!(input.logo, DEFAULT_LOGO);
        assert_eq!(input.score, 0);
        assert_eq!(input.trend, TrendDirection::Stable);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_competitor_score_out_of_range() {
        let input: CompetitorInput =
            serde_json::from_value(serde_json::json!({ "name": "Globex", "score": -5 })).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_body_keeps_both_recommendation_shapes() {
        let input: CreateCompetitiveInput = serde_json::from_value(serde_json::json!({
            "company": Uuid::nil(),
            "title": "Landscape",
            "strategic_recommendations": ["Expand to EU"],
            "recommendation_groups": [
                { "category": "Go-to-market", "priority": "high", "recommendations": ["Hire AE"] }
            ]
        }))
        .unwrap();

        assert_eq!(input.strategic_recommendations.len(), 1);
        assert_eq!(input.recommendation_groups[0].priority, PriorityLevel::High);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_recommendation_group_into_active() {
        let input: StrategicRecommendationInput =
            serde_json::from_value(serde_json::json!({ "category": "Product" })).unwrap();
        let active = input.into_active(Uuid::nil(), Utc::now().into());
        assert_eq!(active.priority, Set(PriorityLevel::Medium));
        assert_eq!(active.recommendations, Set(serde_json::json!([])));
    }
}
