//! `SeaORM` Entity for market_analyses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "market_analyses")]
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
    pub market_size: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub market_growth_rate: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub revenue_note: String,
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
    #[sea_orm(has_many = "super::market_revenue_information::Entity")]
    RevenueInformation,
    #[sea_orm(has_many = "super::market_forces::Entity")]
    MarketForces,
    #[sea_orm(has_many = "super::market_sales_channels::Entity")]
    SalesChannels,
    #[sea_orm(has_many = "super::market_industry_trends::Entity")]
    IndustryTrends,
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

impl Related<super::market_revenue_information::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RevenueInformation.def()
    }
}

impl Related<super::market_forces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarketForces.def()
    }
}

impl Related<super::market_sales_channels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesChannels.def()
    }
}

impl Related<super::market_industry_trends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IndustryTrends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
