//! Market analyses: sizing, revenue evidence, competitive forces and channels.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait, prelude::DateTimeWithTimeZone,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use dealscope_core::presentation::relative_date;

use super::{
    AnalysisCommonView, AnalysisFields, AnalysisFieldsPatch, AnalysisRepository,
    apply_common_patch, common_view, find_row, insert_children, json_array, map_rows,
    replace_children, today,
};
use crate::entities::{
    companies, market_analyses, market_forces, market_industry_trends, market_revenue_information,
    market_sales_channels,
    sea_orm_active_enums::{ImpactLevel, ReliabilityLevel},
};
use crate::repositories::error::RepoResult;
use crate::repositories::{ensure_exists, nullable};

const fn default_reliability() -> ReliabilityLevel {
    ReliabilityLevel::Medium
}

const fn default_impact() -> ImpactLevel {
    ImpactLevel::Medium
}

/// A piece of revenue evidence.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RevenueInformationInput {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub source: String,
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub url: String,
    /// Free-form figure, e.g. `$4.2M ARR`.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub revenue_figure: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_reliability")]
    pub reliability: ReliabilityLevel,
    /// Free-form growth, e.g. `+120% YoY`.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub growth_rate: String,
    #[serde(default)]
    pub display_order: i32,
}

impl RevenueInformationInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> market_revenue_information::ActiveModel {
        market_revenue_information::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            title: Set(self.title),
            source: Set(self.source),
            date: Set(self.date),
            url: Set(self.url),
            revenue_figure: Set(self.revenue_figure),
            description: Set(self.description),
            reliability: Set(self.reliability),
            growth_rate: Set(self.growth_rate),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// One of the competitive forces acting on the market.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarketForceInput {
    #[validate(length(min = 1, max = 255))]
    pub force_name: String,
    #[serde(default = "default_impact")]
    pub intensity: ImpactLevel,
    #[validate(range(min = 0, max = 100))]
    pub score: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub factors: Vec<Value>,
    #[serde(default)]
    pub display_order: i32,
}

impl MarketForceInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> market_forces::ActiveModel {
        market_forces::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            force_name: Set(self.force_name),
            intensity: Set(self.intensity),
            score: Set(self.score),
            description: Set(self.description),
            factors: Set(json_array(self.factors)),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A distribution platform and its traction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SalesChannelInput {
    #[validate(length(min = 1, max = 255))]
    pub platform_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub url: String,
    /// Unit of `installs_count`, e.g. `downloads`.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub count_unit: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub installs_count: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub revenue_amount: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    pub reviews_count: Option<i32>,
    pub change_percentage: Option<f64>,
    #[serde(default)]
    pub display_order: i32,
}

impl SalesChannelInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> market_sales_channels::ActiveModel {
        market_sales_channels::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            platform_name: Set(self.platform_name),
            url: Set(self.url),
            count_unit: Set(self.count_unit),
            installs_count: Set(self.installs_count),
            revenue_amount: Set(self.revenue_amount),
            rating: Set(self.rating),
            reviews_count: Set(self.reviews_count),
            change_percentage: Set(self.change_percentage),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// An industry trend relevant to the company.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IndustryTrendInput {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[serde(default = "default_impact")]
    pub impact: ImpactLevel,
    #[validate(range(min = 0, max = 100))]
    pub relevance: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
}

impl IndustryTrendInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> market_industry_trends::ActiveModel {
        market_industry_trends::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            title: Set(self.title),
            impact: Set(self.impact),
            relevance: Set(self.relevance),
            description: Set(self.description),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Create body for a market analysis.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMarketInput {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFields,
    /// Free-form size, e.g. `$12B`.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub market_size: String,
    /// Annual growth in percent.
    pub market_growth_rate: Option<f64>,
    #[serde(default)]
    pub revenue_note: String,
    #[serde(default)]
    #[validate(nested)]
    pub revenue_information: Vec<RevenueInformationInput>,
    #[serde(default)]
    #[validate(nested)]
    pub market_forces: Vec<MarketForceInput>,
    #[serde(default)]
    #[validate(nested)]
    pub sales_channels: Vec<SalesChannelInput>,
    #[serde(default)]
    #[validate(nested)]
    pub industry_trends: Vec<IndustryTrendInput>,
}

/// Update body for a market analysis.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMarketInput {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFieldsPatch,
    #[validate(length(max = 100))]
    pub market_size: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub market_growth_rate: Option<Option<f64>>,
    pub revenue_note: Option<String>,
    #[validate(nested)]
    pub revenue_information: Option<Vec<RevenueInformationInput>>,
    #[validate(nested)]
    pub market_forces: Option<Vec<MarketForceInput>>,
    #[validate(nested)]
    pub sales_channels: Option<Vec<SalesChannelInput>>,
    #[validate(nested)]
    pub industry_trends: Option<Vec<IndustryTrendInput>>,
}

/// Revenue evidence with its relative date.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueInformationView {
    #[serde(flatten)]
    pub revenue: market_revenue_information::Model,
    pub date_display: String,
}

/// Market analysis detail.
#[derive(Debug, Clone, Serialize)]
pub struct MarketDetail {
    #[serde(flatten)]
    pub common: AnalysisCommonView,
    pub market_size: String,
    pub market_growth_rate: Option<f64>,
    pub revenue_note: String,
    pub revenue_information: Vec<RevenueInformationView>,
    pub market_forces: Vec<market_forces::Model>,
    pub sales_channels: Vec<market_sales_channels::Model>,
    pub industry_trends: Vec<market_industry_trends::Model>,
}

/// Repository for market analyses.
#[derive(Debug, Clone)]
pub struct MarketRepository {
    db: DatabaseConnection,
}

impl MarketRepository {
    async fn detail(&self, model: market_analyses::Model) -> RepoResult<MarketDetail> {
        let common = common_view::<market_analyses::Entity, _>(&self.db, &model).await?;
        let id = model.id;

        let today = today();
        let revenue_information = market_revenue_information::Entity::find()
            .filter(market_revenue_information::Column::AnalysisId.eq(id))
            .order_by_asc(market_revenue_information::Column::DisplayOrder)
            .order_by_desc(market_revenue_information::Column::Date)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|revenue| RevenueInformationView {
                date_display: relative_date(revenue.date, today),
                revenue,
            })
            .collect();

        let market_forces = market_forces::Entity::find()
            .filter(market_forces::Column::AnalysisId.eq(id))
            .order_by_asc(market_forces::Column::DisplayOrder)
            .order_by_desc(market_forces::Column::Score)
            .order_by_asc(market_forces::Column::ForceName)
            .all(&self.db)
            .await?;

        let sales_channels = market_sales_channels::Entity::find()
            .filter(market_sales_channels::Column::AnalysisId.eq(id))
            .order_by_asc(market_sales_channels::Column::DisplayOrder)
            .order_by_desc(market_sales_channels::Column::UpdatedAt)
            .order_by_asc(market_sales_channels::Column::PlatformName)
            .all(&self.db)
            .await?;

        let industry_trends = market_industry_trends::Entity::find()
            .filter(market_industry_trends::Column::AnalysisId.eq(id))
            .order_by_asc(market_industry_trends::Column::DisplayOrder)
            .order_by_desc(market_industry_trends::Column::Relevance)
            .order_by_asc(market_industry_trends::Column::Title)
            .all(&self.db)
            .await?;

        Ok(MarketDetail {
            common,
            market_size: model.market_size,
            market_growth_rate: model.market_growth_rate,
            revenue_note: model.revenue_note,
            revenue_information,
            market_forces,
            sales_channels,
            industry_trends,
        })
    }
}

#[async_trait]
impl AnalysisRepository for MarketRepository {
    type Entity = market_analyses::Entity;
    type Create = CreateMarketInput;
    type Update = UpdateMarketInput;
    type Detail = MarketDetail;

    fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn create(&self, input: CreateMarketInput, analyst_id: Uuid) -> RepoResult<MarketDetail> {
        ensure_exists::<companies::Entity>(&self.db, input.common.company, "Company").await?;

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let id = Uuid::new_v4();

        let model = market_analyses::ActiveModel {
            id: Set(id),
            company_id: Set(input.common.company),
            title: Set(input.common.title),
            summary: Set(input.common.summary),
            overall_score: Set(input.common.overall_score),
            confidence_score: Set(input.common.confidence_score),
            analyst_id: Set(Some(analyst_id)),
            is_completed: Set(input.common.is_completed),
            market_size: Set(input.market_size),
            market_growth_rate: Set(input.market_growth_rate),
            revenue_note: Set(input.revenue_note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        insert_children(&txn, map_rows(input.revenue_information, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.market_forces, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.sales_channels, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.industry_trends, |r| r.into_active(id, now))).await?;
        txn.commit().await?;

        self.detail(model).await
    }

    async fn find(&self, id: Uuid) -> RepoResult<MarketDetail> {
        let model = find_row::<market_analyses::Entity, _>(&self.db, id).await?;
        self.detail(model).await
    }

    async fn update(&self, id: Uuid, input: UpdateMarketInput) -> RepoResult<MarketDetail> {
        let model = find_row::<market_analyses::Entity, _>(&self.db, id).await?;
        if let Some(company_id) = input.common.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut active = model.into_active_model();
        apply_common_patch!(active, input.common);
        if let Some(size) = input.market_size {
            active.market_size = Set(size);
        }
        if let Some(rate) = input.market_growth_rate {
            active.market_growth_rate = Set(rate);
        }
        if let Some(note) = input.revenue_note {
            active.revenue_note = Set(note);
        }
        let model = active.update(&txn).await?;

        if let Some(rows) = input.revenue_information {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, market_revenue_information::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.market_forces {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, market_forces::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.sales_channels {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, market_sales_channels::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.industry_trends {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, market_industry_trends::Column::AnalysisId, id, rows).await?;
        }
        txn.commit().await?;

        self.detail(model).await
    }
}
