//! `SeaORM` Entity for key_individual_public_mentions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "key_individual_public_mentions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub title: String,
    pub person: String,
    pub source: String,
    pub date: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub sentiment: String,
    pub url: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::key_individuals_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::key_individuals_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    KeyIndividualsAnalyses,
}

impl Related<super::key_individuals_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeyIndividualsAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
