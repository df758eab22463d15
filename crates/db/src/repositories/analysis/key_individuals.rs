//! Key-individuals analyses: founders, executives and the board.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
    prelude::DateTimeWithTimeZone,
    sea_query::{NullOrdering, Order},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use super::{
    AnalysisCommonView, AnalysisFields, AnalysisFieldsPatch, AnalysisRepository,
    apply_common_patch, common_view, find_row, insert_children, json_array, map_rows,
    replace_children,
};
use crate::entities::{
    companies, key_individual_public_mentions, key_individual_risks, key_individuals,
    key_individuals_analyses,
};
use crate::repositories::error::RepoResult;
use crate::repositories::{ensure_exists, nullable};

/// A founder, executive or board member.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IndividualInput {
    #[serde(default)]
    pub is_board_member: bool,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub role: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub experience: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub education: String,
    #[validate(range(min = 0, max = 100))]
    pub credibility_score: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub public_perception: Option<i32>,
    #[serde(default)]
    pub previous_companies: Vec<Value>,
    #[serde(default)]
    pub strengths: Vec<Value>,
    #[serde(default)]
    pub achievements: Vec<Value>,
    /// Profile links keyed by network.
    #[serde(default)]
    pub social_media: Map<String, Value>,
}

impl IndividualInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> key_individuals::ActiveModel {
        key_individuals::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            is_board_member: Set(self.is_board_member),
            name: Set(self.name),
            role: Set(self.role),
            experience: Set(self.experience),
            education: Set(self.education),
            credibility_score: Set(self.credibility_score),
            public_perception: Set(self.public_perception),
            previous_companies: Set(json_array(self.previous_companies)),
            strengths: Set(json_array(self.strengths)),
            achievements: Set(json_array(self.achievements)),
            social_media: Set(Value::Object(self.social_media)),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// A risk tied to the team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IndividualRiskInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl IndividualRiskInput {
    fn into_active(self, analysis_id: Uuid, now: DateTimeWithTimeZone) -> key_individual_risks::ActiveModel {
        key_individual_risks::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            title: Set(self.title),
            description: Set(self.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Press coverage of a team member.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PublicMentionInput {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub person: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub source: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub sentiment: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub url: String,
}

impl PublicMentionInput {
    fn into_active(
        self,
        analysis_id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> key_individual_public_mentions::ActiveModel {
        key_individual_public_mentions::ActiveModel {
            id: Set(Uuid::new_v4()),
            analysis_id: Set(analysis_id),
            title: Set(self.title),
            person: Set(self.person),
            source: Set(self.source),
            date: Set(self.date),
            summary: Set(self.summary),
            sentiment: Set(self.sentiment),
            url: Set(self.url),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Create body for a key-individuals analysis.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateKeyIndividualsInput {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFields,
    #[validate(range(min = 0, max = 100))]
    pub team_strength_score: Option<i32>,
    #[serde(default)]
    pub leadership_assessment: String,
    #[serde(default)]
    pub team_strengths: Vec<Value>,
    #[serde(default)]
    pub team_risks: Vec<Value>,
    #[serde(default)]
    pub team_recommendations: Vec<Value>,
    #[serde(default)]
    #[validate(nested)]
    pub individuals: Vec<IndividualInput>,
    #[serde(default)]
    #[validate(nested)]
    pub individual_risks: Vec<IndividualRiskInput>,
    #[serde(default)]
    #[validate(nested)]
    pub public_mentions: Vec<PublicMentionInput>,
}

/// Update body for a key-individuals analysis.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateKeyIndividualsInput {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: AnalysisFieldsPatch,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0, max = 100))]
    pub team_strength_score: Option<Option<i32>>,
    pub leadership_assessment: Option<String>,
    pub team_strengths: Option<Vec<Value>>,
    pub team_risks: Option<Vec<Value>>,
    pub team_recommendations: Option<Vec<Value>>,
    #[validate(nested)]
    pub individuals: Option<Vec<IndividualInput>>,
    #[validate(nested)]
    pub individual_risks: Option<Vec<IndividualRiskInput>>,
    #[validate(nested)]
    pub public_mentions: Option<Vec<PublicMentionInput>>,
}

/// Key-individuals analysis detail.
#[derive(Debug, Clone, Serialize)]
pub struct KeyIndividualsDetail {
    #[serde(flatten)]
    pub common: AnalysisCommonView,
    pub team_strength_score: Option<i32>,
    pub leadership_assessment: String,
    pub team_strengths: Value,
    pub team_risks: Value,
    pub team_recommendations: Value,
    /// Executives first, then board members, each by name.
    pub individuals: Vec<key_individuals::Model>,
    pub individual_risks: Vec<key_individual_risks::Model>,
    /// Newest first; undated mentions last.
    pub public_mentions: Vec<key_individual_public_mentions::Model>,
}

/// Repository for key-individuals analyses.
#[derive(Debug, Clone)]
pub struct KeyIndividualsRepository {
    db: DatabaseConnection,
}

impl KeyIndividualsRepository {
    async fn detail(&self, model: key_individuals_analyses::Model) -> RepoResult<KeyIndividualsDetail> {
        let common = common_view::<key_individuals_analyses::Entity, _>(&self.db, &model).await?;
        let id = model.id;

        let individuals = key_individuals::Entity::find()
            .filter(key_individuals::Column::AnalysisId.eq(id))
            .order_by_asc(key_individuals::Column::IsBoardMember)
            .order_by_asc(key_individuals::Column::Name)
            .all(&self.db)
            .await?;

        let individual_risks = key_individual_risks::Entity::find()
            .filter(key_individual_risks::Column::AnalysisId.eq(id))
            .order_by_asc(key_individual_risks::Column::Title)
            .all(&self.db)
            .await?;

        let public_mentions = key_individual_public_mentions::Entity::find()
            .filter(key_individual_public_mentions::Column::AnalysisId.eq(id))
            .order_by_with_nulls(
                key_individual_public_mentions::Column::Date,
                Order::Desc,
                NullOrdering::Last,
            )
            .order_by_asc(key_individual_public_mentions::Column::Title)
            .all(&self.db)
            .await?;

        Ok(KeyIndividualsDetail {
            common,
            team_strength_score: model.team_strength_score,
            leadership_assessment: model.leadership_assessment,
            team_strengths: model.team_strengths,
            team_risks: model.team_risks,
            team_recommendations: model.team_recommendations,
            individuals,
            individual_risks,
            public_mentions,
        })
    }
}

#[async_trait]
impl AnalysisRepository for KeyIndividualsRepository {
    type Entity = key_individuals_analyses::Entity;
    type Create = CreateKeyIndividualsInput;
    type Update = UpdateKeyIndividualsInput;
    type Detail = KeyIndividualsDetail;

    fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn create(
        &self,
        input: CreateKeyIndividualsInput,
        analyst_id: Uuid,
    ) -> RepoResult<KeyIndividualsDetail> {
        ensure_exists::<companies::Entity>(&self.db, input.common.company, "Company").await?;

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let id = Uuid::new_v4();

        let model = key_individuals_analyses::ActiveModel {
            id: Set(id),
            company_id: Set(input.common.company),
            title: Set(input.common.title),
            summary: Set(input.common.summary),
            overall_score: Set(input.common.overall_score),
            confidence_score: Set(input.common.confidence_score),
            analyst_id: Set(Some(analyst_id)),
            is_completed: Set(input.common.is_completed),
            team_strength_score: Set(input.team_strength_score),
            leadership_assessment: Set(input.leadership_assessment),
            team_strengths: Set(json_array(input.team_strengths)),
            team_risks: Set(json_array(input.team_risks)),
            team_recommendations: Set(json_array(input.team_recommendations)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        insert_children(&txn, map_rows(input.individuals, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.individual_risks, |r| r.into_active(id, now))).await?;
        insert_children(&txn, map_rows(input.public_mentions, |r| r.into_active(id, now))).await?;
        txn.commit().await?;

        self.detail(model).await
    }

    async fn find(&self, id: Uuid) -> RepoResult<KeyIndividualsDetail> {
        let model = find_row::<key_individuals_analyses::Entity, _>(&self.db, id).await?;
        self.detail(model).await
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateKeyIndividualsInput,
    ) -> RepoResult<KeyIndividualsDetail> {
        let model = find_row::<key_individuals_analyses::Entity, _>(&self.db, id).await?;
        if let Some(company_id) = input.common.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }

        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut active = model.into_active_model();
        apply_common_patch!(active, input.common);
        if let Some(score) = input.team_strength_score {
            active.team_strength_score = Set(score);
        }
        if let Some(text) = input.leadership_assessment {
            active.leadership_assessment = Set(text);
        }
        if let Some(items) = input.team_strengths {
            active.team_strengths = Set(json_array(items));
        }
        if let Some(items) = input.team_risks {
            active.team_risks = Set(json_array(items));
        }
        if let Some(items) = input.team_recommendations {
            active.team_recommendations = Set(json_array(items));
        }
        let model = active.update(&txn).await?;

        if let Some(rows) = input.individuals {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, key_individuals::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.individual_risks {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, key_individual_risks::Column::AnalysisId, id, rows).await?;
        }
        if let Some(rows) = input.public_mentions {
            let rows = map_rows(rows, |r| r.into_active(id, now));
            replace_children(&txn, key_individual_public_mentions::Column::AnalysisId, id, rows).await?;
        }
        txn.commit().await?;

        self.detail(model).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_defaults() {
        let input: CreateKeyIndividualsInput = serde_json::from_value(serde_json::json!({
            "company": Uuid::nil(),
            "title": "Founding team",
            "individuals": [{
                "name": "Ada Lovelace",
                "role": "CEO",
                "social_media": { "linkedin": "https://linkedin.com/in/ada" }
            }],
            "public_mentions": [{ "title": "Founder profile" }]
        }))
        .unwrap();

        assert!(input.validate().is_ok());
        let ada = &input.individuals[0];
        assert!(!ada.is_board_member);
        assert_eq!(ada.social_media["linkedin"], "https://linkedin.com/in/ada");
        assert!(input.public_mentions[0].date.is_none());
    }

    #[test]
    fn test_social_media_must_be_object() {
        let result = serde_json::from_value::<IndividualInput>(serde_json::json!({
            "name": "Ada Lovelace",
            "social_media": ["linkedin"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_credibility_out_of_range() {
        let input: IndividualInput = serde_json::from_value(serde_json::json!({
            "name": "Ada Lovelace",
            "credibility_score": 120
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_into_active_wraps_json_columns() {
        let input: IndividualInput = serde_json::from_value(serde_json::json!({
            "name": "Grace Hopper",
            "is_board_member": true,
            "previous_companies": ["Navy"]
        }))
        .unwrap();

        let active = input.into_active(Uuid::nil(), Utc::now().into());
        assert_eq!(active.previous_companies, Set(serde_json::json!(["Navy"])));
        assert_eq!(active.social_media, Set(serde_json::json!({})));
        assert_eq!(active.is_board_member, Set(true));
    }
}
