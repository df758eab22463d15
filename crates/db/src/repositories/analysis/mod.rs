//! Analysis repositories, one per variant.
//!
//! The five analysis tables share a common header (company, title, scores,
//! analyst, completion flag). [`AnalysisTable`] exposes those columns so list,
//! recent, count and delete operations are written once; each variant module
//! adds its own fields and owned sub-collections behind [`AnalysisRepository`].

pub mod competitive;
pub mod high_level;
pub mod key_individuals;
pub mod market;
pub mod perception;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;
use validator::Validate;

use dealscope_core::analysis::Timestamped;
use dealscope_core::AnalysisKind;
use dealscope_shared::types::{PageRequest, PageResponse};

use super::company::{escape_like, ilike};
use super::error::{RepoResult, RepositoryError};
use super::{names, nullable, ordering, paginate};

/// Columns and header fields shared by every analysis table.
pub trait AnalysisTable: EntityTrait<Model: Sync> {
    /// Variant stored in this table.
    const KIND: AnalysisKind;
    /// Primary key.
    const ID: Self::Column;
    /// Owning company.
    const COMPANY_ID: Self::Column;
    /// Title.
    const TITLE: Self::Column;
    /// Summary text.
    const SUMMARY: Self::Column;
    /// Overall score.
    const OVERALL_SCORE: Self::Column;
    /// Completion flag.
    const IS_COMPLETED: Self::Column;
    /// Creation time.
    const CREATED_AT: Self::Column;
    /// Last update time.
    const UPDATED_AT: Self::Column;

    /// Copies the shared fields out of a row.
    fn header(model: &Self::Model) -> AnalysisHeader;
}

/// Shared fields of one analysis row.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisHeader {
    /// Analysis ID.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Title.
    pub title: String,
    /// Summary text.
    pub summary: String,
    /// Overall score, 0-100.
    pub overall_score: Option<i32>,
    /// Confidence, 0-1.
    pub confidence_score: Option<f64>,
    /// Author.
    pub analyst_id: Option<Uuid>,
    /// Completion flag.
    pub is_completed: bool,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Last update time.
    pub updated_at: DateTime<FixedOffset>,
}

macro_rules! analysis_table {
    ($module:ident, $kind:expr) => {
        impl AnalysisTable for crate::entities::$module::Entity {
            const KIND: AnalysisKind = $kind;
            const ID: Self::Column = crate::entities::$module::Column::Id;
            const COMPANY_ID: Self::Column = crate::entities::$module::Column::CompanyId;
            const TITLE: Self::Column = crate::entities::$module::Column::Title;
            const SUMMARY: Self::Column = crate::entities::$module::Column::Summary;
            const OVERALL_SCORE: Self::Column = crate::entities::$module::Column::OverallScore;
            const IS_COMPLETED: Self::Column = crate::entities::$module::Column::IsCompleted;
            const CREATED_AT: Self::Column = crate::entities::$module::Column::CreatedAt;
            const UPDATED_AT: Self::Column = crate::entities::$module::Column::UpdatedAt;

            fn header(model: &Self::Model) -> AnalysisHeader {
                AnalysisHeader {
                    id: model.id,
                    company_id: model.company_id,
                    title: model.title.clone(),
                    summary: model.summary.clone(),
                    overall_score: model.overall_score,
                    confidence_score: model.confidence_score,
                    analyst_id: model.analyst_id,
                    is_completed: model.is_completed,
                    created_at: model.created_at,
                    updated_at: model.updated_at,
                }
            }
        }
    };
}

analysis_table!(high_level_analyses, AnalysisKind::HighLevel);
analysis_table!(perception_analyses, AnalysisKind::Perception);
analysis_table!(market_analyses, AnalysisKind::Market);
analysis_table!(key_individuals_analyses, AnalysisKind::KeyIndividuals);
analysis_table!(competitive_analyses, AnalysisKind::Competitive);

/// Sets the shared columns of an analysis active model from a patch.
macro_rules! apply_common_patch {
    ($active:ident, $patch:expr) => {{
        let patch = $patch;
        if let Some(company_id) = patch.company {
            $active.company_id = sea_orm::Set(company_id);
        }
        if let Some(title) = patch.title {
            $active.title = sea_orm::Set(title);
        }
        if let Some(summary) = patch.summary {
            $active.summary = sea_orm::Set(summary);
        }
        if let Some(score) = patch.overall_score {
            $active.overall_score = sea_orm::Set(score);
        }
        if let Some(confidence) = patch.confidence_score {
            $active.confidence_score = sea_orm::Set(confidence);
        }
        if let Some(is_completed) = patch.is_completed {
            $active.is_completed = sea_orm::Set(is_completed);
        }
        $active.updated_at = sea_orm::Set(chrono::Utc::now().into());
    }};
}
pub(crate) use apply_common_patch;

/// Reduced analysis shape shared by every variant's list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Analysis ID.
    pub id: Uuid,
    /// Owning company.
    pub company: Uuid,
    /// Owning company's name.
    pub company_name: Option<String>,
    /// Variant, e.g. `key_individuals`.
    pub analysis_type: &'static str,
    /// Title.
    pub title: String,
    /// Overall score, 0-100.
    pub overall_score: Option<i32>,
    /// Confidence, 0-1.
    pub confidence_score: Option<f64>,
    /// Author.
    pub analyst: Option<Uuid>,
    /// Author's username.
    pub analyst_name: Option<String>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Completion flag.
    pub is_completed: bool,
}

impl Timestamped for AnalysisSummary {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at.with_timezone(&Utc)
    }
}

/// Shared fields of an analysis detail response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisCommonView {
    /// Analysis ID.
    pub id: Uuid,
    /// Owning company.
    pub company: Uuid,
    /// Owning company's name.
    pub company_name: Option<String>,
    /// Variant, e.g. `key_individuals`.
    pub analysis_type: &'static str,
    /// Title.
    pub title: String,
    /// Summary text.
    pub summary: String,
    /// Overall score, 0-100.
    pub overall_score: Option<i32>,
    /// Confidence, 0-1.
    pub confidence_score: Option<f64>,
    /// Author.
    pub analyst: Option<Uuid>,
    /// Author's username.
    pub analyst_name: Option<String>,
    /// Completion flag.
    pub is_completed: bool,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Last update time.
    pub updated_at: DateTime<FixedOffset>,
}

/// Shared fields accepted when creating an analysis.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalysisFields {
    /// Owning company.
    #[serde(alias = "company_id")]
    pub company: Uuid,
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Summary text.
    #[serde(default)]
    pub summary: String,
    /// Overall score, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub overall_score: Option<i32>,
    /// Confidence, 0-1.
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence_score: Option<f64>,
    /// Completion flag.
    #[serde(default)]
    pub is_completed: bool,
}

/// Shared fields accepted when updating an analysis.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AnalysisFieldsPatch {
    /// Owning company.
    #[serde(alias = "company_id")]
    pub company: Option<Uuid>,
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// Summary text.
    pub summary: Option<String>,
    /// Overall score, `null` clears it.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0, max = 100))]
    pub overall_score: Option<Option<i32>>,
    /// Confidence, `null` clears it.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence_score: Option<Option<f64>>,
    /// Completion flag.
    pub is_completed: Option<bool>,
}

/// Filter options for listing analyses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisFilter {
    /// Owning company.
    pub company: Option<Uuid>,
    /// Completion flag.
    pub is_completed: Option<bool>,
    /// Case-insensitive match on title or summary.
    pub search: Option<String>,
    /// `field` or `-field`.
    pub ordering: Option<String>,
}

/// CRUD over one analysis variant and its sub-collections.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Table holding this variant.
    type Entity: AnalysisTable;
    /// Create request body.
    type Create: DeserializeOwned + Validate + Send + 'static;
    /// Update request body.
    type Update: DeserializeOwned + Validate + Send + 'static;
    /// Detail response body.
    type Detail: Serialize + Send + 'static;

    /// Creates the repository.
    fn new(db: DatabaseConnection) -> Self
    where
        Self: Sized;

    /// Connection used by the default methods.
    fn db(&self) -> &DatabaseConnection;

    /// Creates an analysis with its sub-collections, authored by `analyst_id`.
    async fn create(&self, input: Self::Create, analyst_id: Uuid) -> RepoResult<Self::Detail>;

    /// Loads an analysis with its ordered sub-collections.
    async fn find(&self, id: Uuid) -> RepoResult<Self::Detail>;

    /// Applies a partial update; provided sub-collections replace stored ones.
    async fn update(&self, id: Uuid, input: Self::Update) -> RepoResult<Self::Detail>;

    /// Lists analyses of this variant.
    async fn list(
        &self,
        filter: &AnalysisFilter,
        page: &PageRequest,
    ) -> RepoResult<PageResponse<AnalysisSummary>> {
        list_summaries::<Self::Entity>(self.db(), filter, page).await
    }

    /// Deletes an analysis; sub-collections cascade.
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = Self::Entity::delete_many()
            .filter(<Self::Entity as AnalysisTable>::ID.eq(id))
            .exec(self.db())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Analysis", id));
        }
        Ok(())
    }
}

/// Lists analyses of one table as summaries.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_summaries<E: AnalysisTable>(
    db: &DatabaseConnection,
    filter: &AnalysisFilter,
    page: &PageRequest,
) -> RepoResult<PageResponse<AnalysisSummary>> {
    let mut query = E::find();

    if let Some(company_id) = filter.company {
        query = query.filter(E::COMPANY_ID.eq(company_id));
    }
    if let Some(is_completed) = filter.is_completed {
        query = query.filter(E::IS_COMPLETED.eq(is_completed));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        query = query.filter(
            Condition::any()
                .add(ilike(E::TITLE, &pattern))
                .add(ilike(E::SUMMARY, &pattern)),
        );
    }

    let allowed = [
        ("created_at", E::CREATED_AT),
        ("updated_at", E::UPDATED_AT),
        ("overall_score", E::OVERALL_SCORE),
    ];
    let (column, order) = ordering::resolve(
        filter.ordering.as_deref(),
        &allowed,
        (E::CREATED_AT, Order::Desc),
    );
    query = query.order_by(column, order).order_by_asc(E::ID);

    let page = paginate(db, query, page).await?;
    let data = summarize::<E, _>(db, &page.data).await?;
    Ok(PageResponse {
        data,
        meta: page.meta,
    })
}

/// Every analysis of one variant for a company, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn summaries_for_company<R: AnalysisRepository>(
    db: &DatabaseConnection,
    company_id: Uuid,
) -> RepoResult<Vec<AnalysisSummary>> {
    let rows = R::Entity::find()
        .filter(<R::Entity as AnalysisTable>::COMPANY_ID.eq(company_id))
        .order_by_desc(<R::Entity as AnalysisTable>::CREATED_AT)
        .all(db)
        .await?;
    Ok(summarize::<R::Entity, _>(db, &rows).await?)
}

/// The `limit` most recent analyses of one variant.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn recent<E: AnalysisTable, C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<AnalysisSummary>, DbErr> {
    let rows = E::find()
        .order_by_desc(E::CREATED_AT)
        .order_by_asc(E::ID)
        .limit(limit)
        .all(db)
        .await?;
    summarize::<E, _>(db, &rows).await
}

/// Completed analyses of one variant created at or after `since`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn count_completed_since<E: AnalysisTable, C: ConnectionTrait>(
    db: &C,
    since: DateTime<Utc>,
) -> Result<u64, DbErr> {
    E::find()
        .filter(E::IS_COMPLETED.eq(true))
        .filter(E::CREATED_AT.gte(since))
        .count(db)
        .await
}

/// Resolves company and analyst names for a batch of rows.
async fn summarize<E: AnalysisTable, C: ConnectionTrait>(
    db: &C,
    rows: &[E::Model],
) -> Result<Vec<AnalysisSummary>, DbErr> {
    let headers: Vec<AnalysisHeader> = rows.iter().map(E::header).collect();
    let company_names = names::company_names(db, headers.iter().map(|h| h.company_id)).await?;
    let usernames = names::usernames(db, headers.iter().filter_map(|h| h.analyst_id)).await?;

    Ok(headers
        .into_iter()
        .map(|h| AnalysisSummary {
            id: h.id,
            company_name: company_names.get(&h.company_id).cloned(),
            company: h.company_id,
            analysis_type: E::KIND.type_name(),
            title: h.title,
            overall_score: h.overall_score,
            confidence_score: h.confidence_score,
            analyst_name: h.analyst_id.and_then(|id| usernames.get(&id).cloned()),
            analyst: h.analyst_id,
            created_at: h.created_at,
            is_completed: h.is_completed,
        })
        .collect())
}

/// Builds the shared part of a detail response.
pub(crate) async fn common_view<E: AnalysisTable, C: ConnectionTrait>(
    db: &C,
    model: &E::Model,
) -> Result<AnalysisCommonView, DbErr> {
    let h = E::header(model);
    let company_names = names::company_names(db, [h.company_id]).await?;
    let usernames = names::usernames(db, h.analyst_id).await?;

    Ok(AnalysisCommonView {
        id: h.id,
        company_name: company_names.get(&h.company_id).cloned(),
        company: h.company_id,
        analysis_type: E::KIND.type_name(),
        title: h.title,
        summary: h.summary,
        overall_score: h.overall_score,
        confidence_score: h.confidence_score,
        analyst_name: h.analyst_id.and_then(|id| usernames.get(&id).cloned()),
        analyst: h.analyst_id,
        is_completed: h.is_completed,
        created_at: h.created_at,
        updated_at: h.updated_at,
    })
}

/// Loads one row by ID or fails with `NotFound`.
pub(crate) async fn find_row<E: AnalysisTable, C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> RepoResult<E::Model> {
    E::find()
        .filter(E::ID.eq(id))
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Analysis", id))
}

/// Inserts sub-entity rows, skipping the statement when there are none.
pub(crate) async fn insert_children<A, C>(db: &C, rows: Vec<A>) -> Result<(), DbErr>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    if rows.is_empty() {
        return Ok(());
    }
    A::Entity::insert_many(rows).exec_without_returning(db).await?;
    Ok(())
}

/// Replaces every sub-entity row under `parent_id` with `rows`.
pub(crate) async fn replace_children<A, C>(
    db: &C,
    parent_column: <A::Entity as EntityTrait>::Column,
    parent_id: Uuid,
    rows: Vec<A>,
) -> Result<(), DbErr>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    A::Entity::delete_many()
        .filter(parent_column.eq(parent_id))
        .exec(db)
        .await?;
    insert_children(db, rows).await
}

/// Converts request rows into active models.
pub(crate) fn map_rows<I, A>(rows: Vec<I>, f: impl FnMut(I) -> A) -> Vec<A> {
    rows.into_iter().map(f).collect()
}

/// Converts a list of JSON values into a JSON array column value.
pub(crate) fn json_array(items: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::Value::Array(items)
}

/// Today's date for relative date rendering.
pub(crate) fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}
