//! Investment repository.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use dealscope_shared::types::{PageRequest, PageResponse};

use super::error::{RepoResult, RepositoryError};
use super::{ensure_exists, names, nullable, ordering, paginate};
use crate::entities::{companies, investments, leads, sea_orm_active_enums::InvestmentStatus};

const ORDERING_FIELDS: &[(&str, investments::Column)] = &[
    ("investment_date", investments::Column::InvestmentDate),
    ("amount", investments::Column::Amount),
    ("created_at", investments::Column::CreatedAt),
];

/// Investment with company and creator names.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentView {
    /// Investment ID.
    pub id: Uuid,
    /// Company ID.
    pub company: Uuid,
    /// Company name.
    pub company_name: Option<String>,
    /// Originating lead.
    pub lead: Option<Uuid>,
    /// Amount invested.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Equity acquired, percent.
    pub equity_percentage: Option<f64>,
    /// Post-money valuation.
    pub valuation: Option<Decimal>,
    /// Date of the investment.
    pub investment_date: NaiveDate,
    /// Lifecycle status.
    pub status: InvestmentStatus,
    /// Recording user.
    pub created_by: Option<Uuid>,
    /// Recording user's username.
    pub created_by_name: Option<String>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Last update time.
    pub updated_at: DateTime<FixedOffset>,
}

/// Filter options for listing investments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvestmentFilter {
    /// Exact status.
    pub status: Option<InvestmentStatus>,
    /// Company.
    pub company: Option<Uuid>,
    /// `field` or `-field`.
    pub ordering: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

const fn default_status() -> InvestmentStatus {
    InvestmentStatus::Proposed
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Input for recording an investment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvestmentInput {
    /// Company ID.
    pub company: Uuid,
    /// Originating lead.
    pub lead: Option<Uuid>,
    /// Amount invested.
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    /// ISO currency code.
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3))]
    pub currency: String,
    /// Equity acquired, percent.
    #[validate(range(min = 0.0, max = 100.0))]
    pub equity_percentage: Option<f64>,
    /// Post-money valuation.
    #[validate(custom(function = "non_negative"))]
    pub valuation: Option<Decimal>,
    /// Date of the investment.
    pub investment_date: NaiveDate,
    /// Lifecycle status.
    #[serde(default = "default_status")]
    pub status: InvestmentStatus,
}

/// Partial investment update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInvestmentInput {
    /// Company ID.
    pub company: Option<Uuid>,
    /// Originating lead, `null` unlinks.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub lead: Option<Option<Uuid>>,
    /// Amount invested.
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    /// ISO currency code.
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    /// Equity acquired, percent.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub equity_percentage: Option<Option<f64>>,
    /// Post-money valuation.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub valuation: Option<Option<Decimal>>,
    /// Date of the investment.
    pub investment_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: Option<InvestmentStatus>,
}

/// Investment repository.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    db: DatabaseConnection,
}

impl InvestmentRepository {
    /// Creates a new investment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists investments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &InvestmentFilter,
        page: &PageRequest,
    ) -> RepoResult<PageResponse<InvestmentView>> {
        let mut query = investments::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(investments::Column::Status.eq(status));
        }
        if let Some(company_id) = filter.company {
            query = query.filter(investments::Column::CompanyId.eq(company_id));
        }

        let (column, order) = ordering::resolve(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            (investments::Column::InvestmentDate, Order::Desc),
        );
        query = query.order_by(column, order).order_by_asc(investments::Column::Id);

        let page = paginate(&self.db, query, page).await?;
        let views = self.views(page.data).await?;
        Ok(PageResponse {
            data: views,
            meta: page.meta,
        })
    }

    /// Lists a company's investments, latest investment date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_company(&self, company_id: Uuid) -> RepoResult<Vec<InvestmentView>> {
        let rows = investments::Entity::find()
            .filter(investments::Column::CompanyId.eq(company_id))
            .order_by_desc(investments::Column::InvestmentDate)
            .order_by_desc(investments::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.views(rows).await
    }

    /// Finds an investment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the investment does not exist.
    pub async fn find(&self, id: Uuid) -> RepoResult<InvestmentView> {
        let investment = self.find_model(id).await?;
        self.view(investment).await
    }

    /// Records an investment made by `caller`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the company or lead does not exist.
    pub async fn create(&self, input: CreateInvestmentInput, caller: Uuid) -> RepoResult<InvestmentView> {
        ensure_exists::<companies::Entity>(&self.db, input.company, "Company").await?;
        if let Some(lead_id) = input.lead {
            ensure_exists::<leads::Entity>(&self.db, lead_id, "Lead").await?;
        }

        let now = Utc::now().into();
        let investment = investments::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company),
            lead_id: Set(input.lead),
            amount: Set(input.amount),
            currency: Set(input.currency),
            equity_percentage: Set(input.equity_percentage),
            valuation: Set(input.valuation),
            investment_date: Set(input.investment_date),
            status: Set(input.status),
            created_by: Set(Some(caller)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        self.view(investment).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the investment does not exist.
    pub async fn update(&self, id: Uuid, input: UpdateInvestmentInput) -> RepoResult<InvestmentView> {
        let investment = self.find_model(id).await?;
        if let Some(company_id) = input.company {
            ensure_exists::<companies::Entity>(&self.db, company_id, "Company").await?;
        }
        if let Some(Some(lead_id)) = input.lead {
            ensure_exists::<leads::Entity>(&self.db, lead_id, "Lead").await?;
        }
        if let Some(Some(valuation)) = input.valuation
            && valuation.is_sign_negative()
        {
            return Err(RepositoryError::Validation(
                "valuation must not be negative".to_string(),
            ));
        }

        let mut active = investment.into_active_model();
        if let Some(company_id) = input.company {
            active.company_id = Set(company_id);
        }
        if let Some(lead) = input.lead {
            active.lead_id = Set(lead);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(currency) = input.currency {
            active.currency = Set(currency);
        }
        if let Some(equity) = input.equity_percentage {
            active.equity_percentage = Set(equity);
        }
        if let Some(valuation) = input.valuation {
            active.valuation = Set(valuation);
        }
        if let Some(date) = input.investment_date {
            active.investment_date = Set(date);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        let investment = active.update(&self.db).await?;
        self.view(investment).await
    }

    /// Deletes an investment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the investment does not exist.
    pub async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = investments::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Investment", id));
        }
        Ok(())
    }

    async fn find_model(&self, id: Uuid) -> RepoResult<investments::Model> {
        investments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Investment", id))
    }

    async fn view(&self, investment: investments::Model) -> RepoResult<InvestmentView> {
        let id = investment.id;
        self.views(vec![investment])
            .await?
            .pop()
            .ok_or_else(|| RepositoryError::not_found("Investment", id))
    }

    async fn views(&self, rows: Vec<investments::Model>) -> RepoResult<Vec<InvestmentView>> {
        let company_names = names::company_names(&self.db, rows.iter().map(|i| i.company_id)).await?;
        let usernames = names::usernames(&self.db, rows.iter().filter_map(|i| i.created_by)).await?;

        Ok(rows
            .into_iter()
            .map(|i| InvestmentView {
                id: i.id,
                company: i.company_id,
                company_name: company_names.get(&i.company_id).cloned(),
                lead: i.lead_id,
                amount: i.amount,
                currency: i.currency,
                equity_percentage: i.equity_percentage,
                valuation: i.valuation,
                investment_date: i.investment_date,
                status: i.status,
                created_by_name: i.created_by.and_then(|id| usernames.get(&id).cloned()),
                created_by: i.created_by,
                created_at: i.created_at,
                updated_at: i.updated_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_input_defaults() {
        let input: CreateInvestmentInput = serde_json::from_value(serde_json::json!({
            "company": Uuid::nil(),
            "amount": "1000000.00",
            "investment_date": "2026-03-01"
        }))
        .unwrap();

        assert_eq!(input.amount, dec!(1000000.00));
        assert_eq!(input.currency, "USD");
        assert_eq!(input.status, InvestmentStatus::Proposed);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let input: CreateInvestmentInput = serde_json::from_value(serde_json::json!({
            "company": Uuid::nil(),
            "amount": "-1",
            "investment_date": "2026-03-01"
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_equity_bounds() {
        let patch: UpdateInvestmentInput =
            serde_json::from_value(serde_json::json!({ "equity_percentage": 150.0 })).unwrap();
        assert!(patch.validate().is_err());

        let cleared: UpdateInvestmentInput =
            serde_json::from_value(serde_json::json!({ "equity_percentage": null })).unwrap();
        assert!(cleared.validate().is_ok());
        assert_eq!(cleared.equity_percentage, Some(None));
    }
}
