//! `SeaORM` Entity for market_forces table.

use super::sea_orm_active_enums::ImpactLevel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "market_forces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub force_name: String,
    pub intensity: ImpactLevel,
    pub score: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub factors: Json,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::market_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::market_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MarketAnalyses,
}

impl Related<super::market_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarketAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
