//! `SeaORM` Entity for perception_analyses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "perception_analyses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub overall_score: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub confidence_score: Option<f64>,
    pub analyst_id: Option<Uuid>,
    pub is_completed: bool,
    pub sentiment_score: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Companies,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AnalystId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
    #[sea_orm(has_many = "super::perception_sentiment_sources::Entity")]
    SentimentSources,
    #[sea_orm(has_many = "super::perception_competitor_sentiments::Entity")]
    CompetitorSentiments,
    #[sea_orm(has_many = "super::perception_recent_mentions::Entity")]
    RecentMentions,
    #[sea_orm(has_many = "super::perception_key_topics::Entity")]
    KeyTopics,
    #[sea_orm(has_many = "super::perception_brand_metrics::Entity")]
    BrandMetrics,
    #[sea_orm(has_many = "super::perception_risk_alerts::Entity")]
    RiskAlerts,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::perception_sentiment_sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SentimentSources.def()
    }
}

impl Related<super::perception_competitor_sentiments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitorSentiments.def()
    }
}

impl Related<super::perception_recent_mentions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecentMentions.def()
    }
}

impl Related<super::perception_key_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeyTopics.def()
    }
}

impl Related<super::perception_brand_metrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BrandMetrics.def()
    }
}

impl Related<super::perception_risk_alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RiskAlerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
