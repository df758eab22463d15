//! `SeaORM` Entity for competitive_strategic_recommendations table.

use super::sea_orm_active_enums::PriorityLevel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "competitive_strategic_recommendations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub category: String,
    pub priority: PriorityLevel,
    #[sea_orm(column_type = "JsonBinary")]
    pub recommendations: Json,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::competitive_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::competitive_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CompetitiveAnalyses,
}

impl Related<super::competitive_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitiveAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
