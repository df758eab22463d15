//! `SeaORM` Entity for key_individuals table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "key_individuals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub is_board_member: bool,
    pub name: String,
    pub role: String,
    pub experience: String,
    pub education: String,
    pub credibility_score: Option<i32>,
    pub public_perception: Option<i32>,
    #[sea_orm(column_type = "JsonBinary")]
    pub previous_companies: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub strengths: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub achievements: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub social_media: Json,
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
