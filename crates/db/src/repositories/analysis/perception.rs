//! Perception analyses: public sentiment, media coverage and brand health.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
    prelude::DateTimeWithTimeZone,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dealscope_core::presentation::{BenchmarkComparison, alert_color, relative_date};

use super::{
    AnalysisCommonView, AnalysisFields, AnalysisFieldsPatch, AnalysisRepository,
    apply_common_patch, common_view, find_row, insert_children, map_rows, replace_children, today,
};
use crate::entities::{
    companies, perception_analyses, perception_brand_metrics, perception_competitor_sentiments,
    perception_key_topics, perception_recent_mentions, perception_risk_alerts,
    perception_sentiment_sources,
    sea_orm_active_enums::{EngagementLevel, PriorityLevel, TrendDirection},
};
use crate::repositories::ensure_exists;
use crate::repositories::error::RepoResult;

const fn default_engagement() -> EngagementLevel {
    EngagementLevel::Medium
}

const fn default_trend() -> TrendDirection {
    TrendDirection::Stable
}

const fn default_priority() -> PriorityLevel {
    PriorityLevel::Medium
}

/// Sentiment share on one channel.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SentimentSourceInput {
    /// Channel name, e.g. `Twitter/X`.
    #[validate(length(min = 1, max = 255))]
    pub source_name: String,
    /// Share of positive mentions.
    #[validate(range(min = 0, max = 100))]
    pub positive_percentage: i32,
    /// Number of mentions.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub mentions_count: i32,
    /// Label such as `Positive`.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub sentiment_label: String,
    /// Change against the previous period, e.g. `+5%`.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub change_vs_previous: String,
    /// Position in the list.
    #[serde(default)]
    pub display_order: i32,
}

impl SentimentSourceInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> perception_sentiment_sources::ActiveModel {
        perception_sentiment_sources::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            source_name: Set(self.source_name),
            positive_percentage: Set(self.positive_percentage),
            mentions_count: Set(self.mentions_count),
            sentiment_label: Set(self.sentiment_label),
            change_vs_previous: Set(self.change_vs_previous),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Sentiment of a peer company, for comparison.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompetitorSentimentInput {
    /// Peer name.
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,
    /// Share of positive mentions.
    #[validate(range(min = 0, max = 100))]
    pub positive_percentage: i32,
    /// Number of mentions.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub mentions_count: i32,
    /// Marks the analysed company itself.
    #[serde(default)]
    pub is_current_company: bool,
    /// Position in the list.
    #[serde(default)]
    pub display_order: i32,
}

impl CompetitorSentimentInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> perception_competitor_sentiments::ActiveModel {
        perception_competitor_sentiments::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            company_name: Set(self.company_name),
            positive_percentage: Set(self.positive_percentage),
            mentions_count: Set(self.mentions_count),
            is_current_company: Set(self.is_current_company),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A press or social mention.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecentMentionInput {
    /// Headline.
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    /// Publication.
    #[validate(length(min = 1, max = 255))]
    pub source: String,
    /// Publication date.
    pub date: NaiveDate,
    /// Link.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub url: String,
    /// Quoted excerpt.
    #[serde(default)]
    pub excerpt: String,
    /// Audience size, e.g. `2.1M`.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub reach: String,
    /// Engagement.
    #[serde(default = "default_engagement")]
    pub engagement_level: EngagementLevel,
    /// Label such as `Positive`.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub sentiment_label: String,
    /// Sentiment, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub sentiment_score: i32,
    /// Position in the list.
    #[serde(default)]
    pub display_order: i32,
}

impl RecentMentionInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> perception_recent_mentions::ActiveModel {
        perception_recent_mentions::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            title: Set(self.title),
            source: Set(self.source),
            date: Set(self.date),
            url: Set(self.url),
            excerpt: Set(self.excerpt),
            reach: Set(self.reach),
            engagement_level: Set(self.engagement_level),
            sentiment_label: Set(self.sentiment_label),
            sentiment_score: Set(self.sentiment_score),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A discussion topic and its sentiment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KeyTopicInput {
    /// Topic.
    #[validate(length(min = 1, max = 255))]
    pub topic_name: String,
    /// Sentiment, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub sentiment_score: i32,
    /// Number of mentions.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub mentions_count: i32,
    /// Direction of travel.
    #[serde(default = "default_trend")]
    pub trend: TrendDirection,
    /// Notes.
    #[serde(default)]
    pub description: String,
    /// Position in the list.
    #[serde(default)]
    pub display_order: i32,
}

impl KeyTopicInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> perception_key_topics::ActiveModel {
        perception_key_topics::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            topic_name: Set(self.topic_name),
            sentiment_score: Set(self.sentiment_score),
            mentions_count: Set(self.mentions_count),
            trend: Set(self.trend),
            description: Set(self.description),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A brand health metric against its industry benchmark.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrandMetricInput {
    /// Metric name.
    #[validate(length(min = 1, max = 255))]
    pub metric_name: String,
    /// Current score, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub current_score: i32,
    /// Industry benchmark, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub industry_benchmark: i32,
    /// Direction of travel.
    #[serde(default = "default_trend")]
    pub trend: TrendDirection,
    /// Notes.
    #[serde(default)]
    pub description: String,
    /// Position in the list.
    #[serde(default)]
    pub display_order: i32,
}

impl BrandMetricInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> perception_brand_metrics::ActiveModel {
        perception_brand_metrics::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            metric_name: Set(self.metric_name),
            current_score: Set(self.current_score),
            industry_benchmark: Set(self.industry_benchmark),
            trend: Set(self.trend),
            description: Set(self.description),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A reputational risk needing attention.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RiskAlertInput {
    /// Headline.
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    /// Urgency.
    #[serde(default = "default_priority")]
    pub priority: PriorityLevel,
    /// What is happening.
    #[serde(default)]
    pub description: String,
    /// Expected effect.
    #[serde(default)]
    pub impact: String,
    /// Suggested response.
    #[serde(default)]
    pub recommendation: String,
    /// Position in the list.
    #[serde(default)]
    pub display_order: i32,
}

impl RiskAlertInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> perception_risk_alerts::ActiveModel {
        perception_risk_alerts::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            title: Set(self.title),
            priority: Set(self.priority),
            description: Set(self.description),
            impact: Set(self.impact),
            recommendation: Set(self.recommendation),
            display_order: Set(self.display_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Create body for a perception analysis.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerceptionInput {
    /// Shared analysis fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFields,
    /// Aggregate sentiment, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub sentiment_score: Option<i32>,
    /// Per-channel sentiment.
    #[serde(default)]
    #[validate(nested)]
    pub sentiment_sources: Vec<SentimentSourceInput>,
    /// Peer sentiment.
    #[serde(default)]
    #[validate(nested)]
    pub competitor_sentiments: Vec<CompetitorSentimentInput>,
    /// Press and social mentions.
    #[serde(default)]
    #[validate(nested)]
    pub recent_mentions: Vec<RecentMentionInput>,
    /// Discussion topics.
    #[serde(default)]
    #[validate(nested)]
    pub key_topics: Vec<KeyTopicInput>,
    /// Brand health metrics.
    #[serde(default)]
    #[validate(nested)]
    pub brand_metrics: Vec<BrandMetricInput>,
    /// Reputational risks.
    #[serde(default)]
    #[validate(nested)]
    pub risk_alerts: Vec<RiskAlertInput>,
}

/// Update body for a perception analysis.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePerceptionInput {
    /// Shared analysis fields.
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFieldsPatch,
    /// Aggregate sentiment, `null` clears it.
    #[serde(default, deserialize_with = "crate::repositories::nullable::deserialize")]
    #[validate(range(min = 0, max = 100))]
    pub sentiment_score: Option<Option<i32>>,
    /// Replacement per-channel sentiment.
    #[validate(nested)]
    pub sentiment_sources: Option<Vec<SentimentSourceInput>>,
    /// Replacement peer sentiment.
    #[validate(nested)]
    pub competitor_sentiments: Option<Vec<CompetitorSentimentInput>>,
    /// Replacement mentions.
    #[validate(nested)]
    pub recent_mentions: Option<Vec<RecentMentionInput>>,
    /// Replacement topics.
    #[validate(nested)]
    pub key_topics: Option<Vec<KeyTopicInput>>,
    /// Replacement brand metrics.
    #[validate(nested)]
    pub brand_metrics: Option<Vec<BrandMetricInput>>,
    /// Replacement risk alerts.
    #[validate(nested)]
    pub risk_alerts: Option<Vec<RiskAlertInput>>,
}

/// Mention with its relative date.
#[derive(Debug, Clone, Serialize)]
pub struct RecentMentionView {
    /// Stored columns.
    #[serde(flatten)]
    pub mention: perception_recent_mentions::Model,
    /// `Today`, `3 days ago`, ...
    pub date_display: String,
}

/// Brand metric with its benchmark comparison.
#[derive(Debug, Clone, Serialize)]
pub struct BrandMetricView {
    /// Stored columns.
    #[serde(flatten)]
    pub metric: perception_brand_metrics::Model,
    /// `current_score - industry_benchmark`.
    pub benchmark_difference: i32,
    /// Strictly above the benchmark.
    pub is_above_benchmark: bool,
}

/// Risk alert with its display color.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAlertView {
    /// Stored columns.
    #[serde(flatten)]
    pub alert: perception_risk_alerts::Model,
    /// `red`, `yellow` or `blue`.
    pub border_color: &'static str,
}

/// Perception analysis detail.
#[derive(Debug, Clone, Serialize)]
pub struct PerceptionDetail {
    /// Shared analysis fields.
    #[serde(flatten)]
    pub common: AnalysisCommonView,
    /// Aggregate sentiment.
    pub sentiment_score: Option<i32>,
    /// Per-channel sentiment.
    pub sentiment_sources: Vec<perception_sentiment_sources::Model>,
    /// Peer sentiment.
    pub competitor_sentiments: Vec<perception_competitor_sentiments::Model>,
    /// Press and social mentions.
    pub recent_mentions: Vec<RecentMentionView>,
    /// Discussion topics.
    pub key_topics: Vec<perception_key_topics::Model>,
    /// Brand health metrics.
    pub brand_metrics: Vec<BrandMetricView>,
    /// Reputational risks.
    pub risk_alerts: Vec<RiskAlertView>,
}

/// Repository for perception analyses.
#[derive(Debug, Clone)]
pub struct PerceptionRepository {
    db: DatabaseConnection,
}

impl PerceptionRepository {
    async fn detail(&self, model: perception_analyses::Model) -> RepoResult<PerceptionDetail> {
        use perception_brand_metrics as metrics;
        use perception_competitor_sentiments as peers;
        use perception_key_topics as topics;
        use perception_recent_mentions as mentions;
        use perception_risk_alerts as alerts;
        use perception_sentiment_sources as sources;

        let common = common_view::<perception_analyses::Entity, _>(&self.db, &model).await?;
        let id = model.id;

        let sentiment_sources = sources::Entity::find()
            .filter(sources::Column::AnalysisId.eq(id))
            .order_by_asc(sources::Column::DisplayOrder)
            .order_by_desc(sources::Column::PositivePercentage)
            .order_by_asc(sources::Column::SourceName)
            .all(&self.db)
            .await?;

        let competitor_sentiments = peers::Entity::find()
            .filter(peers::Column::AnalysisId.eq(id))
            .order_by_asc(peers::Column::DisplayOrder)
            .order_by_desc(peers::Column::PositivePercentage)
            .order_by_asc(peers::Column::CompanyName)
            .all(&self.db)
            .await?;

        let today = today();
        let recent_mentions = mentions::Entity::find()
            .filter(mentions::Column::AnalysisId.eq(id))
            .order_by_asc(mentions::Column::DisplayOrder)
            .order_by_desc(mentions::Column::Date)
            .order_by_desc(mentions::Column::SentimentScore)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|mention| RecentMentionView {
                date_display: relative_date(mention.date, today),
                mention,
            })
            .collect();

        let key_topics = topics::Entity::find()
            .filter(topics::Column::AnalysisId.eq(id))
            .order_by_asc(topics::Column::DisplayOrder)
            .order_by_desc(topics::Column::SentimentScore)
            .order_by_asc(topics::Column::TopicName)
            .all(&self.db)
            .await?;

        let brand_metrics = metrics::Entity::find()
            .filter(metrics::Column::AnalysisId.eq(id))
            .order_by_asc(metrics::Column::DisplayOrder)
            .order_by_desc(metrics::Column::CurrentScore)
            .order_by_asc(metrics::Column::MetricName)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|metric| {
                let comparison = BenchmarkComparison::new(metric.current_score, metric.industry_benchmark);
                BrandMetricView {
                    benchmark_difference: comparison.difference,
                    is_above_benchmark: comparison.is_above,
                    metric,
                }
            })
            .collect();

        let risk_alerts = alerts::Entity::find()
            .filter(alerts::Column::AnalysisId.eq(id))
            .order_by_asc(alerts::Column::DisplayOrder)
            .order_by_desc(alerts::Column::Priority)
            .order_by_asc(alerts::Column::Title)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|alert| RiskAlertView {
                border_color: alert_color(alert.priority.into()),
                alert,
            })
            .collect();

        Ok(PerceptionDetail {
            common,
            sentiment_score: model.sentiment_score,
            sentiment_sources,
            competitor_sentiments,
            recent_mentions,
            key_topics,
            brand_metrics,
            risk_alerts,
        })
    }
}

#[async_trait]
impl AnalysisRepository for PerceptionRepository {
    type Entity = perception_analyses::Entity;
    type Create = CreatePerceptionInput;
    type Update = UpdatePerceptionInput;
    type Detail = PerceptionDetail;

    fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn create(&self, input: CreatePerceptionInput, analyst_id: Uuid) -> RepoResult<PerceptionDetail> {
        ensure_exists::<companies::Entity>(&self.db, input.common.company, "Company").await?;

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let id = Uuid::new_v4();

        let model = perception_analyses::ActiveModel {
            id: Set(id),
            company_id: Set(input.common.company),
            title: Set(input.common.title),
            summary: Set(input.common.summary),
            overall_score: Set(input.common.overall_score),
            confidence_score: Set(input.common.confidence_score),
            analyst_id: Set(Some(analyst_id)),
            is_completed: Set(input.common.is_completed),
            sentiment_score: Set(input.sentiment_score),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        insert_children(&txn, map_rows(input.sentiment_sources, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.competitor_sentiments, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.recent_mentions, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.key_topics, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.brand_metrics, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.risk_alerts, |r| r.into_active(id, now))).await?;
        txn.commit().await?;

        self.detail(model).await
    }

    async fn find(&self, id: Uuid) -> RepoResult<PerceptionDetail> {
        let model = find_row::<perception_analyses::Entity, _>(&self.db, id).await?;
        self.detail(model).await
    }

    async fn update(&self, id: Uuid, input: UpdatePerceptionInput) -> RepoResult<PerceptionDetail> {
        let model = find_row::<perception_analyses::Entity, _>(&self.db, id).await?;
        if let Some(company_id) = input.common.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut active = model.into_active_model();
        apply_common_patch!(active, input.common);
        if let Some(score) = input.sentiment_score {
            active.sentiment_score = Set(score);
        }
        let model = active.update(&txn).await?;

        if let Some(rows) = input.sentiment_sources {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, perception_sentiment_sources::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.competitor_sentiments {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, perception_competitor_sentiments::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.recent_mentions {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, perception_recent_mentions::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.key_topics {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, perception_key_topics::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.brand_metrics {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, perception_brand_metrics::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.risk_alerts {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, perception_risk_alerts::Column::AnalysisId, id, rows).await?;
        }
        txn.commit().await?;

        self.detail(model).await
    }
}
