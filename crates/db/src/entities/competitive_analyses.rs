//! `SeaORM` Entity for competitive_analyses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "competitive_analyses")]
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
    pub competitive_position: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub competitor_analysis: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub swot_strengths: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub swot_weaknesses: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub swot_opportunities: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub swot_threats: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub competitive_advantages: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub competitive_threats: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub differentiation_factors: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub strategic_recommendations: Json,
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
    #[sea_orm(has_many = "super::competitive_competitors::Entity")]
    Competitors,
    #[sea_orm(has_many = "super::competitive_strategic_recommendations::Entity")]
    StrategicRecommendations,
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

impl Related<super::competitive_competitors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competitors.def()
    }
}

impl Related<super::competitive_strategic_recommendations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StrategicRecommendations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
