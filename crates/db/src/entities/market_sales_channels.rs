//! `SeaORM` Entity for market_sales_channels table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "market_sales_channels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub platform_name: String,
    pub url: String,
    pub count_unit: String,
    pub installs_count: String,
    pub revenue_amount: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub rating: Option<f64>,
    pub reviews_count: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub change_percentage: Option<f64>,
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
