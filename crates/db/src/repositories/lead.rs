//! Lead repository.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    JoinType, Order, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dealscope_core::LeadStatus as CoreLeadStatus;
use dealscope_shared::types::{PageRequest, PageResponse};

use super::company::{escape_like, ilike};
use super::error::{RepoResult, RepositoryError};
use super::{ensure_exists, names, nullable, ordering, paginate};
use crate::entities::{
    companies, leads,
    sea_orm_active_enums::{CompanyStage, LeadStatus, PriorityLevel},
    users,
};

const ORDERING_FIELDS: &[(&str, leads::Column)] = &[
    ("created_at", leads::Column::CreatedAt),
    ("updated_at", leads::Column::UpdatedAt),
    ("ai_match_score", leads::Column::AiMatchScore),
];

/// Lead with company and assignee details.
#[derive(Debug, Clone, Serialize)]
pub struct LeadView {
    /// Lead ID.
    pub id: Uuid,
    /// Company ID.
    pub company: Uuid,
    /// Company name.
    pub company_name: Option<String>,
    /// Company industry.
    pub company_industry: Option<String>,
    /// Company stage.
    pub company_stage: Option<CompanyStage>,
    /// Pipeline status.
    pub status: LeadStatus,
    /// Priority.
    pub priority: PriorityLevel,
    /// Assigned user.
    pub assigned_to: Option<Uuid>,
    /// Assigned user's username.
    pub assigned_to_name: Option<String>,
    /// Where the lead came from.
    pub source: String,
    /// Free text notes.
    pub notes: String,
    /// Fit score, 0-100.
    pub ai_match_score: Option<i32>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Last update time.
    pub updated_at: DateTime<FixedOffset>,
}

/// Filter options for listing leads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    /// Exact status.
    pub status: Option<LeadStatus>,
    /// Exact priority.
    pub priority: Option<PriorityLevel>,
    /// Assigned user.
    pub assigned_to: Option<Uuid>,
    /// Company.
    pub company: Option<Uuid>,
    /// Case-insensitive match on company name, source or notes.
    pub search: Option<String>,
    /// `field` or `-field`.
    pub ordering: Option<String>,
}

const fn default_status() -> LeadStatus {
    LeadStatus::New
}

const fn default_priority() -> PriorityLevel {
    PriorityLevel::Medium
}

/// Input for creating a lead.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLeadInput {
    /// Company ID.
    pub company: Uuid,
    /// Pipeline status.
    #[serde(default = "default_status")]
    pub status: LeadStatus,
    /// Priority.
    #[serde(default = "default_priority")]
    pub priority: PriorityLevel,
    /// Assigned user; the caller when absent.
    pub assigned_to: Option<Uuid>,
    /// Where the lead came from.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub source: String,
    /// Free text notes.
    #[serde(default)]
    pub notes: String,
    /// Fit score, 0-100.
    #[validate(range(min = 0, max = 100))]
    pub ai_match_score: Option<i32>,
}

/// Partial lead update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLeadInput {
    /// Company ID.
    pub company: Option<Uuid>,
    /// Pipeline status.
    pub status: Option<LeadStatus>,
    /// Priority.
    pub priority: Option<PriorityLevel>,
    /// Assigned user, `null` unassigns.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub assigned_to: Option<Option<Uuid>>,
    /// Where the lead came from.
    #[validate(length(max = 255))]
    pub source: Option<String>,
    /// Free text notes.
    pub notes: Option<String>,
    /// Fit score, 0-100.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0, max = 100))]
    pub ai_match_score: Option<Option<i32>>,
}

/// Lead repository.
#[derive(Debug, Clone)]
pub struct LeadRepository {
    db: DatabaseConnection,
}

impl LeadRepository {
    /// Creates a new lead repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists leads.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &LeadFilter, page: &PageRequest) -> RepoResult<PageResponse<LeadView>> {
        let mut query = leads::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(leads::Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(leads::Column::Priority.eq(priority));
        }
        if let Some(user_id) = filter.assigned_to {
            query = query.filter(leads::Column::AssignedTo.eq(user_id));
        }
        if let Some(company_id) = filter.company {
            query = query.filter(leads::Column::CompanyId.eq(company_id));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(search));
            query = query
                .join(JoinType::InnerJoin, leads::Relation::Companies.def())
                .filter(
                    Condition::any()
                        .add(ilike(companies::Column::Name, &pattern))
                        .add(ilike(leads::Column::Source, &pattern))
                        .add(ilike(leads::Column::Notes, &pattern)),
                );
        }

        let (column, order) = ordering::resolve(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            (leads::Column::CreatedAt, Order::Desc),
        );
        query = query.order_by(column, order).order_by_asc(leads::Column::Id);

        let page = paginate(&self.db, query, page).await?;
        let views = self.views(page.data).await?;
        Ok(PageResponse {
            data: views,
            meta: page.meta,
        })
    }

    /// Lists a company's leads, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_company(&self, company_id: Uuid) -> RepoResult<Vec<LeadView>> {
        let rows = leads::Entity::find()
            .filter(leads::Column::CompanyId.eq(company_id))
            .order_by_desc(leads::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.views(rows).await
    }

    /// Finds a lead.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub async fn find(&self, id: Uuid) -> RepoResult<LeadView> {
        let lead = self.find_model(id).await?;
        self.view(lead).await
    }

    /// Creates a lead, assigning it to `caller` unless another assignee is given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the company or assignee does not exist.
    pub async fn create(&self, input: CreateLeadInput, caller: Uuid) -> RepoResult<LeadView> {
        ensure_exists::<companies::Entity>(&self.db, input.company, "Company").await?;
        let assignee = input.assigned_to.unwrap_or(caller);
        ensure_exists::<users::Entity>(&self.db, assignee, "User").await?;

        let now = Utc::now().into();
        let lead = leads::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company),
            status: Set(input.status),
            priority: Set(input.priority),
            assigned_to: Set(Some(assignee)),
            source: Set(input.source),
            notes: Set(input.notes),
            ai_match_score: Set(input.ai_match_score),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        self.view(lead).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub async fn update(&self, id: Uuid, input: UpdateLeadInput) -> RepoResult<LeadView> {
        let lead = self.find_model(id).await?;
        if let Some(company_id) = input.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }
        if let Some(Some(user_id)) = input.assigned_to {
            ensure_exists::<users::Entity>(&self.db, user_id, "User").await?;
        }

        let mut active = lead.into_active_model();
        if let Some(company_id) = input.company {
            active.company_id = Set(company_id);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority);
        }
        if let Some(assigned_to) = input.assigned_to {
            active.assigned_to = Set(assigned_to);
        }
        if let Some(source) = input.source {
            active.source = Set(source);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(score) = input.ai_match_score {
            active.ai_match_score = Set(score);
        }
        active.updated_at = Set(Utc::now().into());

        let lead = active.update(&self.db).await?;
        self.view(lead).await
    }

    /// Moves a lead to the named status.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `status` is not a lead status, `NotFound` if the lead does not exist.
    pub async fn update_status(&self, id: Uuid, status: &str) -> RepoResult<LeadView> {
        let status = CoreLeadStatus::from_str(status)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut active = self.find_model(id).await?.into_active_model();
        active.status = Set(status.into());
        active.updated_at = Set(Utc::now().into());

        let lead = active.update(&self.db).await?;
        self.view(lead).await
    }

    /// Deletes a lead; investments referencing it keep existing without the link.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = leads::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Lead", id));
        }
        Ok(())
    }

    async fn find_model(&self, id: Uuid) -> RepoResult<leads::Model> {
        leads::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Lead", id))
    }

    async fn view(&self, lead: leads::Model) -> RepoResult<LeadView> {
        let id = lead.id;
        self.views(vec![lead])
            .await?
            .pop()
            .ok_or_else(|| RepositoryError::not_found("Lead", id))
    }

    async fn views(&self, rows: Vec<leads::Model>) -> RepoResult<Vec<LeadView>> {
        let company_ids: Vec<Uuid> = rows.iter().map(|l| l.company_id).collect();
        let companies: std::collections::HashMap<Uuid, companies::Model> = companies::Entity::find()
            .filter(companies::Column::Id.is_in(company_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let usernames = names::usernames(&self.db, rows.iter().filter_map(|l| l.assigned_to)).await?;

        Ok(rows
            .into_iter()
            .map(|lead| {
                let company = companies.get(&lead.company_id);
                LeadView {
                    id: lead.id,
                    company: lead.company_id,
                    company_name: company.map(|c| c.name.clone()),
                    company_industry: company.map(|c| c.industry.clone()),
                    company_stage: company.map(|c| c.stage),
                    status: lead.status,
                    priority: lead.priority,
                    assigned_to_name: lead.assigned_to.and_then(|id| usernames.get(&id).cloned()),
                    assigned_to: lead.assigned_to,
                    source: lead.source,
                    notes: lead.notes,
                    ai_match_score: lead.ai_match_score,
                    created_at: lead.created_at,
                    updated_at: lead.updated_at,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_defaults() {
        let input: CreateLeadInput = serde_json::from_value(serde_json::json!({
            "company": Uuid::nil()
        }))
        .unwrap();

        assert_eq!(input.status, LeadStatus::New);
        assert_eq!(input.priority, PriorityLevel::Medium);
        assert!(input.assigned_to.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_match_score_range() {
        let input: CreateLeadInput = serde_json::from_value(serde_json::json!({
            "company": Uuid::nil(),
            "ai_match_score": 120
        }))
        .unwrap();
        assert!(input.validate().is_err());

        let patch: UpdateLeadInput =
            serde_json::from_value(serde_json::json!({ "ai_match_score": -1 })).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_unassign_via_null() {
        let patch: UpdateLeadInput =
            serde_json::from_value(serde_json::json!({ "assigned_to": null })).unwrap();
        assert_eq!(patch.assigned_to, Some(None));
    }

    #[test]
    fn test_unknown_status_rejected_by_filter() {
        let parsed = serde_json::from_value::<LeadFilter>(serde_json::json!({ "status": "archived" }));
        assert!(parsed.is_err());
    }
}
