//! `SeaORM` Entity for companies table.

use super::sea_orm_active_enums::CompanyStage;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub industry: String,
    pub stage: CompanyStage,
    pub founded_year: i32,
    pub headquarters: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub employees_min: Option<i32>,
    pub employees_max: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub funding_raised: Option<Decimal>,
    pub funding_currency: String,
    pub ai_score: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub ai_confidence: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_tags::Entity")]
    CompanyTags,
    #[sea_orm(has_many = "super::leads::Entity")]
    Leads,
    #[sea_orm(has_many = "super::investments::Entity")]
    Investments,
    #[sea_orm(has_many = "super::high_level_analyses::Entity")]
    HighLevelAnalyses,
    #[sea_orm(has_many = "super::perception_analyses::Entity")]
    PerceptionAnalyses,
    #[sea_orm(has_many = "super::market_analyses::Entity")]
    MarketAnalyses,
    #[sea_orm(has_many = "super::key_individuals_analyses::Entity")]
    KeyIndividualsAnalyses,
    #[sea_orm(has_many = "super::competitive_analyses::Entity")]
    CompetitiveAnalyses,
}

impl Related<super::company_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyTags.def()
    }
}

impl Related<super::leads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leads.def()
    }
}

impl Related<super::investments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investments.def()
    }
}

impl Related<super::high_level_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HighLevelAnalyses.def()
    }
}

impl Related<super::perception_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerceptionAnalyses.def()
    }
}

impl Related<super::market_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarketAnalyses.def()
    }
}

impl Related<super::key_individuals_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeyIndividualsAnalyses.def()
    }
}

impl Related<super::competitive_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitiveAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
