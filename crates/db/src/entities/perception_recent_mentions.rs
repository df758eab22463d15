//! `SeaORM` Entity for perception_recent_mentions table.

use super::sea_orm_active_enums::EngagementLevel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "perception_recent_mentions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub title: String,
    pub source: String,
    pub date: Date,
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    pub reach: String,
    pub engagement_level: EngagementLevel,
    pub sentiment_label: String,
    pub sentiment_score: i32,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::perception_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::perception_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PerceptionAnalyses,
}

impl Related<super::perception_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerceptionAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
