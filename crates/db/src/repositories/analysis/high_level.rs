//! High-level analyses: executive summary with findings, risks and recommendations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::{
    AnalysisCommonView, AnalysisFields, AnalysisFieldsPatch, AnalysisRepository,
    apply_common_patch, common_view, find_row, json_array,
};
use crate::entities::{companies, high_level_analyses};
use crate::repositories::ensure_exists;
use crate::repositories::error::RepoResult;

/// Create body for a high-level analysis.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHighLevelInput {
    /// Shared analysis fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFields,
    /// Key findings.
    #[serde(default)]
    pub key_findings: Vec<Value>,
    /// Risk factors.
    #[serde(default)]
    pub risk_factors: Vec<Value>,
    /// Opportunities.
    #[serde(default)]
    pub opportunities: Vec<Value>,
    /// Recommendations.
    #[serde(default)]
    pub recommendations: Vec<Value>,
}

/// Update body for a high-level analysis.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHighLevelInput {
    /// Shared analysis fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFieldsPatch,
    /// Key findings.
    pub key_findings: Option<Vec<Value>>,
    /// Risk factors.
    pub risk_factors: Option<Vec<Value>>,
    /// Opportunities.
    pub opportunities: Option<Vec<Value>>,
    /// Recommendations.
    pub recommendations: Option<Vec<Value>>,
}

/// High-level analysis detail.
#[derive(Debug, Clone, Serialize)]
pub struct HighLevelDetail {
    /// Shared analysis fields.
    #[serde(flatten)]
    pub common: AnalysisCommonView,
    /// Key findings.
    pub key_findings: Value,
    /// Risk factors.
    pub risk_factors: Value,
    /// Opportunities.
    pub opportunities: Value,
    /// Recommendations.
    pub recommendations: Value,
}

/// Repository for high-level analyses.
#[derive(Debug, Clone)]
pub struct HighLevelRepository {
    db: DatabaseConnection,
}

impl HighLevelRepository {
    async fn detail(&self, model: high_level_analyses::Model) -> RepoResult<HighLevelDetail> {
        let common = common_view::<high_level_analyses::Entity, _>(&self.db, &model).await?;
        Ok(HighLevelDetail {
            common,
            key_findings: model.key_findings,
            risk_factors: model.risk_factors,
            opportunities: model.opportunities,
            recommendations: model.recommendations,
        })
    }
}

#[async_trait]
impl AnalysisRepository for HighLevelRepository {
    type Entity = high_level_analyses::Entity;
    type Create = CreateHighLevelInput;
    type Update = UpdateHighLevelInput;
    type Detail = HighLevelDetail;

    fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn create(&self, input: CreateHighLevelInput, analyst_id: Uuid) -> RepoResult<HighLevelDetail> {
        ensure_exists::<companies::Entity>(&self.db, input.common.company, "Company").await?;

        let now = Utc::now().into();
        let model = high_level_analyses::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.common.company),
            title: Set(input.common.title),
            summary: Set(input.common.summary),
            overall_score: Set(input.common.overall_score),
            confidence_score: Set(input.common.confidence_score),
            analyst_id: Set(Some(analyst_id)),
            is_completed: Set(input.common.is_completed),
            key_findings: Set(json_array(input.key_findings)),
            risk_factors: Set(json_array(input.risk_factors)),
            opportunities: Set(json_array(input.opportunities)),
            recommendations: Set(json_array(input.recommendations)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        self.detail(model).await
    }

    async fn find(&self, id: Uuid) -> RepoResult<HighLevelDetail> {
        let model = find_row::<high_level_analyses::Entity, _>(&self.db, id).await?;
        self.detail(model).await
    }

    async fn update(&self, id: Uuid, input: UpdateHighLevelInput) -> RepoResult<HighLevelDetail> {
        let model = find_row::<high_level_analyses::Entity, _>(&self.db, id).await?;
        if let Some(company_id) = input.common.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }

        let mut active = model.into_active_model();
        apply_common_patch!(active, input.common);
        if let Some(items) = input.key_findings {
            active.key_findings = Set(json_array(items));
        }
        if let Some(items) = input.risk_factors {
            active.risk_factors = Set(json_array(items));
        }
        if let Some(items) = input.opportunities {
            active.opportunities = Set(json_array(items));
        }
        if let Some(items) = input.recommendations {
            active.recommendations = Set(json_array(items));
        }

        let model = active.update(&self.db).await?;
        self.detail(model).await
    }
}
