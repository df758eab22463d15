//! `SeaORM` Entity for perception_brand_metrics table.

use super::sea_orm_active_enums::TrendDirection;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "perception_brand_metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub metric_name: String,
    pub current_score: i32,
    pub industry_benchmark: i32,
    pub trend: TrendDirection,
    #[sea_orm(column_type = "Text")]
    pub description: String,
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
