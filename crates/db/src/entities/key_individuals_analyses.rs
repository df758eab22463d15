//! `SeaORM` Entity for key_individuals_analyses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "key_individuals_analyses")]
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
    pub team_strength_score: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub leadership_assessment: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub team_strengths: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub team_risks: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub team_recommendations: Json,
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
    #[sea_orm(has_many = "super::key_individuals::Entity")]
    KeyIndividuals,
    #[sea_orm(has_many = "super::key_individual_risks::Entity")]
    IndividualRisks,
    #[sea_orm(has_many = "super::key_individual_public_mentions::Entity")]
    PublicMentions,
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

impl Related<super::key_individuals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeyIndividuals.def()
    }
}

impl Related<super::key_individual_risks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IndividualRisks.def()
    }
}

impl Related<super::key_individual_public_mentions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PublicMentions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
