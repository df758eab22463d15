//! Company repository: CRUD, search, tags and the full-analysis view.

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, Order, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use dealscope_core::presentation::employee_range;
use dealscope_core::{LeadStatus, MetricsSummary, ScoreSample};
use dealscope_shared::types::{PageRequest, PageResponse};

use super::analysis::{
    AnalysisSummary, competitive::CompetitiveRepository, high_level::HighLevelRepository,
    key_individuals::KeyIndividualsRepository, market::MarketRepository,
    perception::PerceptionRepository, summaries_for_company,
};
use super::error::{RepoResult, RepositoryError};
use super::investment::{InvestmentRepository, InvestmentView};
use super::lead::{LeadRepository, LeadView};
use super::{nullable, ordering, paginate};
use crate::entities::{companies, company_tags, sea_orm_active_enums::CompanyStage};

const ORDERING_FIELDS: &[(&str, companies::Column)] = &[
    ("name", companies::Column::Name),
    ("created_at", companies::Column::CreatedAt),
    ("updated_at", companies::Column::UpdatedAt),
    ("ai_score", companies::Column::AiScore),
];

/// Tag as embedded in company responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagView {
    /// Tag ID.
    pub id: Uuid,
    /// Tag label.
    pub name: String,
}

impl From<company_tags::Model> for TagView {
    fn from(tag: company_tags::Model) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Company with derived fields and tags.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    /// Stored columns.
    #[serde(flatten)]
    pub company: companies::Model,
    /// Headcount band.
    pub employee_range: String,
    /// Tags, alphabetical.
    pub tags: Vec<TagView>,
}

impl CompanyDetail {
    fn new(company: companies::Model, tags: Vec<company_tags::Model>) -> Self {
        Self {
            employee_range: employee_range(company.employees_min, company.employees_max),
            tags: tags.into_iter().map(TagView::from).collect(),
            company,
        }
    }
}

/// Reduced company shape for list and search responses.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyListItem {
    /// Company ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Industry.
    pub industry: String,
    /// Funding stage.
    pub stage: CompanyStage,
    /// Founding year.
    pub founded_year: i32,
    /// Headquarters location.
    pub headquarters: String,
    /// Headcount band.
    pub employee_range: String,
    /// Total funding raised.
    pub funding_raised: Option<Decimal>,
    /// AI score.
    pub ai_score: Option<i32>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<companies::Model> for CompanyListItem {
    fn from(company: companies::Model) -> Self {
        Self {
            employee_range: employee_range(company.employees_min, company.employees_max),
            id: company.id,
            name: company.name,
            industry: company.industry,
            stage: company.stage,
            founded_year: company.founded_year,
            headquarters: company.headquarters,
            funding_raised: company.funding_raised,
            ai_score: company.ai_score,
            created_at: company.created_at,
        }
    }
}

/// Everything known about one company.
#[derive(Debug, Clone, Serialize)]
pub struct FullAnalysis {
    /// Company detail.
    pub company: CompanyDetail,
    /// High-level analyses, newest first.
    pub high_level_analyses: Vec<AnalysisSummary>,
    /// Perception analyses, newest first.
    pub perception_analyses: Vec<AnalysisSummary>,
    /// Market analyses, newest first.
    pub market_analyses: Vec<AnalysisSummary>,
    /// Key individuals analyses, newest first.
    pub key_individuals_analyses: Vec<AnalysisSummary>,
    /// Competitive analyses, newest first.
    pub competitive_analyses: Vec<AnalysisSummary>,
    /// Leads, newest first.
    pub leads: Vec<LeadView>,
    /// Investments, latest investment date first.
    pub investments: Vec<InvestmentView>,
    /// Aggregates over the lists above.
    pub metrics_summary: MetricsSummary,
}

/// Filter options for listing companies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyFilter {
    /// Case-insensitive match on name, description or headquarters.
    pub search: Option<String>,
    /// Exact industry.
    pub industry: Option<String>,
    /// Exact stage.
    pub stage: Option<CompanyStage>,
    /// `field` or `-field`.
    pub ordering: Option<String>,
}

/// Parameters of the advanced search endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_score_window"))]
pub struct CompanySearch {
    /// Case-insensitive match on name, description or headquarters.
    #[serde(default)]
    pub q: String,
    /// Exact industry.
    #[serde(default)]
    pub industry: String,
    /// Exact stage.
    pub stage: Option<CompanyStage>,
    /// Lowest AI score, inclusive.
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub min_score: i32,
    /// Highest AI score, inclusive.
    #[serde(default = "default_max_score")]
    #[validate(range(min = 0, max = 100))]
    pub max_score: i32,
}

impl Default for CompanySearch {
    fn default() -> Self {
        Self {
            q: String::new(),
            industry: String::new(),
            stage: None,
            min_score: 0,
            max_score: default_max_score(),
        }
    }
}

const fn default_max_score() -> i32 {
    100
}

fn validate_score_window(search: &CompanySearch) -> Result<(), ValidationError> {
    if search.min_score > search.max_score {
        return Err(ValidationError::new("score_window")
            .with_message("min_score must not exceed max_score".into()));
    }
    Ok(())
}

fn default_currency() -> String {
    "USD".to_string()
}

const fn default_true() -> bool {
    true
}

/// Input for creating a company.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompanyInput {
    /// Name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Free text description.
    #[serde(default)]
    pub description: String,
    /// Industry.
    #[validate(length(min = 1, max = 100))]
    pub industry: String,
    /// Funding stage.
    pub stage: CompanyStage,
    /// Founding year.
    #[validate(range(min = 1800, max = 2100))]
    pub founded_year: i32,
    /// Headquarters location.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub headquarters: String,
    /// Website URL.
    #[validate(url)]
    pub website: Option<String>,
    /// Logo URL.
    #[validate(url)]
    pub logo_url: Option<String>,
    /// Lower headcount bound.
    #[validate(range(min = 0))]
    pub employees_min: Option<i32>,
    /// Upper headcount bound.
    #[validate(range(min = 0))]
    pub employees_max: Option<i32>,
    /// Total funding raised.
    #[validate(custom(function = "non_negative"))]
    pub funding_raised: Option<Decimal>,
    /// ISO currency code of `funding_raised`.
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3))]
    pub funding_currency: String,
    /// AI score, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub ai_score: Option<i32>,
    /// AI confidence, 0-1.
    #[validate(range(min = 0.0, max = 1.0))]
    pub ai_confidence: Option<f64>,
    /// Listed in company lists.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Initial tag names.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial company update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCompanyInput {
    /// Name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// Free text description.
    pub description: Option<String>,
    /// Industry.
    #[validate(length(min = 1, max = 100))]
    pub industry: Option<String>,
    /// Funding stage.
    pub stage: Option<CompanyStage>,
    /// Founding year.
    #[validate(range(min = 1800, max = 2100))]
    pub founded_year: Option<i32>,
    /// Headquarters location.
    #[validate(length(max = 255))]
    pub headquarters: Option<String>,
    /// Website URL, `null` clears it.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(url)]
    pub website: Option<Option<String>>,
    /// Logo URL, `null` clears it.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(url)]
    pub logo_url: Option<Option<String>>,
    /// Lower headcount bound.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0))]
    pub employees_min: Option<Option<i32>>,
    /// Upper headcount bound.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0))]
    pub employees_max: Option<Option<i32>>,
    /// Total funding raised.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(custom(function = "non_negative"))]
    pub funding_raised: Option<Option<Decimal>>,
    /// ISO currency code of `funding_raised`.
    #[validate(length(equal = 3))]
    pub funding_currency: Option<String>,
    /// AI score, 0-100.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0, max = 100))]
    pub ai_score: Option<Option<i32>>,
    /// AI confidence, 0-1.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub ai_confidence: Option<Option<f64>>,
    /// Listed in company lists.
    pub is_active: Option<bool>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active companies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &CompanyFilter,
        page: &PageRequest,
    ) -> RepoResult<PageResponse<CompanyListItem>> {
        let mut query = active_companies();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(text_match(search));
        }
        if let Some(industry) = filter.industry.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(companies::Column::Industry.eq(industry));
        }
        if let Some(stage) = filter.stage {
            query = query.filter(companies::Column::Stage.eq(stage));
        }

        let (column, order) = ordering::resolve(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            (companies::Column::UpdatedAt, Order::Desc),
        );
        query = query.order_by(column, order).order_by_asc(companies::Column::Id);

        let page = paginate(&self.db, query, page).await?;
        Ok(page.map(CompanyListItem::from))
    }

    /// Searches active companies by text, industry, stage and AI score window.
    ///
    /// Companies without an AI score never match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search(
        &self,
        search: &CompanySearch,
        page: &PageRequest,
    ) -> RepoResult<PageResponse<CompanyListItem>> {
        let mut query = active_companies();

        if !search.q.is_empty() {
            query = query.filter(text_match(&search.q));
        }
        if !search.industry.is_empty() {
            query = query.filter(companies::Column::Industry.eq(search.industry.as_str()));
        }
        if let Some(stage) = search.stage {
            query = query.filter(companies::Column::Stage.eq(stage));
        }

        query = query
            .filter(companies::Column::AiScore.gte(search.min_score))
            .filter(companies::Column::AiScore.lte(search.max_score))
            .order_by_desc(companies::Column::UpdatedAt)
            .order_by_asc(companies::Column::Id);

        let page = paginate(&self.db, query, page).await?;
        Ok(page.map(CompanyListItem::from))
    }

    /// Finds an active company with its tags.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the company does not exist or is inactive.
    pub async fn find(&self, id: Uuid) -> RepoResult<CompanyDetail> {
        let company = self.find_model(id).await?;
        let tags = self.tag_models(id).await?;
        Ok(CompanyDetail::new(company, tags))
    }

    /// Creates a company and its initial tags in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn create(&self, input: CreateCompanyInput) -> RepoResult<CompanyDetail> {
        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            industry: Set(input.industry),
            stage: Set(input.stage),
            founded_year: Set(input.founded_year),
            headquarters: Set(input.headquarters),
            website: Set(input.website),
            logo_url: Set(input.logo_url),
            employees_min: Set(input.employees_min),
            employees_max: Set(input.employees_max),
            funding_raised: Set(input.funding_raised),
            funding_currency: Set(input.funding_currency),
            ai_score: Set(input.ai_score),
            ai_confidence: Set(input.ai_confidence),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let tags = replace_tags(&txn, company.id, input.tags).await?;
        txn.commit().await?;

        tracing::debug!(company_id = %company.id, tags = tags.len(), "Company inserted");
        Ok(CompanyDetail::new(company, tags))
    }

    /// Applies a partial update; a provided tag list replaces the stored tags.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the company does not exist or is inactive.
    pub async fn update(&self, id: Uuid, input: UpdateCompanyInput) -> RepoResult<CompanyDetail> {
        let company = self.find_model(id).await?;

        let txn = self.db.begin().await?;
        let mut active = company.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(industry) = input.industry {
            active.industry = Set(industry);
        }
        if let Some(stage) = input.stage {
            active.stage = Set(stage);
        }
        if let Some(year) = input.founded_year {
            active.founded_year = Set(year);
        }
        if let Some(headquarters) = input.headquarters {
            active.headquarters = Set(headquarters);
        }
        if let Some(website) = input.website {
            active.website = Set(website);
        }
        if let Some(logo_url) = input.logo_url {
            active.logo_url = Set(logo_url);
        }
        if let Some(min) = input.employees_min {
            active.employees_min = Set(min);
        }
        if let Some(max) = input.employees_max {
            active.employees_max = Set(max);
        }
        if let Some(funding) = input.funding_raised {
            active.funding_raised = Set(funding);
        }
        if let Some(currency) = input.funding_currency {
            active.funding_currency = Set(currency);
        }
        if let Some(score) = input.ai_score {
            active.ai_score = Set(score);
        }
        if let Some(confidence) = input.ai_confidence {
            active.ai_confidence = Set(confidence);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());
        let company = active.update(&txn).await?;

        let tags = match input.tags {
            Some(names) => replace_tags(&txn, id, names).await?,
            None => tags_of(&txn, id).await?,
        };
        txn.commit().await?;

        Ok(CompanyDetail::new(company, tags))
    }

    /// Deletes a company; tags, leads, investments and analyses cascade.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the company does not exist or is inactive.
    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.find_model(id).await?;
        companies::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Lists a company's tags.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the company does not exist or is inactive.
    pub async fn list_tags(&self, company_id: Uuid) -> RepoResult<Vec<TagView>> {
        self.find_model(company_id).await?;
        let tags = self.tag_models(company_id).await?;
        Ok(tags.into_iter().map(TagView::from).collect())
    }

    /// Adds a tag to a company.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the company already has a tag with this name.
    pub async fn add_tag(&self, company_id: Uuid, name: &str) -> RepoResult<TagView> {
        self.find_model(company_id).await?;
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::Validation("Tag name must not be blank".to_string()));
        }

        let tag = company_tags::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| RepositoryError::from_write(e, || format!("Tag '{name}' already exists")))?;

        Ok(tag.into())
    }

    /// Removes a tag from a company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tag does not belong to the company.
    pub async fn delete_tag(&self, company_id: Uuid, tag_id: Uuid) -> RepoResult<()> {
        let result = company_tags::Entity::delete_many()
            .filter(company_tags::Column::Id.eq(tag_id))
            .filter(company_tags::Column::CompanyId.eq(company_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Tag", tag_id));
        }
        Ok(())
    }

    /// Builds the full-analysis view: every analysis, lead and investment plus a summary.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the company does not exist or is inactive.
    pub async fn full_analysis(&self, id: Uuid) -> RepoResult<FullAnalysis> {
        let company = self.find(id).await?;

        let high_level = summaries_for_company::<HighLevelRepository>(&self.db, id).await?;
        let perception = summaries_for_company::<PerceptionRepository>(&self.db, id).await?;
        let market = summaries_for_company::<MarketRepository>(&self.db, id).await?;
        let key_individuals = summaries_for_company::<KeyIndividualsRepository>(&self.db, id).await?;
        let competitive = summaries_for_company::<CompetitiveRepository>(&self.db, id).await?;

        let leads = LeadRepository::new(self.db.clone()).list_for_company(id).await?;
        let investments = InvestmentRepository::new(self.db.clone())
            .list_for_company(id)
            .await?;

        let samples: Vec<ScoreSample> = [&high_level, &perception, &market, &key_individuals, &competitive]
            .into_iter()
            .flatten()
            .map(|a| ScoreSample {
                overall_score: a.overall_score,
                confidence_score: a.confidence_score,
            })
            .collect();

        let metrics_summary = MetricsSummary::compute(
            &samples,
            investments.iter().map(|i| i.amount),
            leads.iter().map(|l| LeadStatus::from(l.status)),
        );

        Ok(FullAnalysis {
            company,
            high_level_analyses: high_level,
            perception_analyses: perception,
            market_analyses: market,
            key_individuals_analyses: key_individuals,
            competitive_analyses: competitive,
            leads,
            investments,
            metrics_summary,
        })
    }

    async fn find_model(&self, id: Uuid) -> RepoResult<companies::Model> {
        active_companies()
            .filter(companies::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Company", id))
    }

    async fn tag_models(&self, company_id: Uuid) -> RepoResult<Vec<company_tags::Model>> {
        Ok(company_tags::Entity::find()
            .filter(company_tags::Column::CompanyId.eq(company_id))
            .order_by_asc(company_tags::Column::Name)
            .all(&self.db)
            .await?)
    }
}

fn active_companies() -> Select<companies::Entity> {
    companies::Entity::find().filter(companies::Column::IsActive.eq(true))
}

fn text_match(term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(term));
    Condition::any()
        .add(ilike(companies::Column::Name, &pattern))
        .add(ilike(companies::Column::Description, &pattern))
        .add(ilike(companies::Column::Headquarters, &pattern))
}

/// Case-insensitive `LIKE` on a text column.
pub(crate) fn ilike<C: ColumnTrait>(column: C, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    use sea_orm::sea_query::{Expr, Func};
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).like(pattern.to_lowercase())
}

/// Escapes `%`, `_` and `\` so user input matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

async fn tags_of(txn: &DatabaseTransaction, company_id: Uuid) -> RepoResult<Vec<company_tags::Model>> {
    Ok(company_tags::Entity::find()
        .filter(company_tags::Column::CompanyId.eq(company_id))
        .order_by_asc(company_tags::Column::Name)
        .all(txn)
        .await?)
}

async fn replace_tags(
    txn: &DatabaseTransaction,
    company_id: Uuid,
    names: Vec<String>,
) -> RepoResult<Vec<company_tags::Model>> {
    company_tags::Entity::delete_many()
        .filter(company_tags::Column::CompanyId.eq(company_id))
        .exec(txn)
        .await?;

    let mut names: Vec<String> = names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();

    let now = Utc::now().into();
    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        let tag = company_tags::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            name: Set(name),
            created_at: Set(now),
        }
        .insert(txn)
        .await?;
        tags.push(tag);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("fin_tech 100%"), "fin\\_tech 100\\%");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_create_input_defaults() {
        let input: CreateCompanyInput = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "industry": "Fintech",
            "stage": "seed",
            "founded_year": 2020
        }))
        .unwrap();

        assert_eq!(input.funding_currency, "USD");
        assert!(input.is_active);
        assert!(input.tags.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_input_rejects_out_of_range_score() {
        let input: CreateCompanyInput = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "industry": "Fintech",
            "stage": "seed",
            "founded_year": 2020,
            "ai_score": 101,
            "ai_confidence": 1.5
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("ai_score"));
        assert!(fields.contains_key("ai_confidence"));
    }

    #[test]
    fn test_search_window_validation() {
        let search = CompanySearch {
            min_score: 80,
            max_score: 20,
            ..CompanySearch::default()
        };
        assert!(search.validate().is_err());
        assert!(CompanySearch::default().validate().is_ok());
    }

    #[test]
    fn test_update_rejects_negative_funding() {
        let input: UpdateCompanyInput =
            serde_json::from_value(serde_json::json!({ "funding_raised": "-5.00" })).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["funding_raised"][0].code, "non_negative");

        let cleared: UpdateCompanyInput =
            serde_json::from_value(serde_json::json!({ "funding_raised": null })).unwrap();
        assert!(cleared.validate().is_ok());
        assert_eq!(cleared.funding_raised, Some(None));

        let raised: UpdateCompanyInput =
            serde_json::from_value(serde_json::json!({ "funding_raised": "0.00" })).unwrap();
        assert!(raised.validate().is_ok());
    }

    #[test]
    fn test_list_item_employee_range() {
        let now = Utc::now().into();
        let company = companies::Model {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            description: String::new(),
            industry: "Fintech".into(),
            stage: CompanyStage::SeriesA,
            founded_year: 2019,
            headquarters: "Berlin".into(),
            website: None,
            logo_url: None,
            employees_min: Some(50),
            employees_max: Some(200),
            funding_raised: None,
            funding_currency: "USD".into(),
            ai_score: Some(72),
            ai_confidence: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let item = CompanyListItem::from(company);
        assert_eq!(item.employee_range, "50-200");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["stage"], "series-a");
    }
}
