//! Integration tests for leads, investments and the dashboard.

mod common;

use chrono::Utc;
use dealscope_db::entities::sea_orm_active_enums::{InvestmentStatus, LeadStatus, PriorityLevel};
use dealscope_db::repositories::{CreateInvestmentInput, CreateLeadInput};
use dealscope_db::{DashboardRepository, InvestmentRepository, LeadRepository, RepositoryError};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn lead_input(body: serde_json::Value) -> CreateLeadInput {
    serde_json::from_value(body).expect("valid lead body")
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_lead_defaults_to_caller() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({})).await;

    let lead = LeadRepository::new(db.clone())
        .create(lead_input(serde_json::json!({ "company": company })), user.id)
        .await
        .unwrap();

    assert_eq!(lead.assigned_to, Some(user.id));
    assert_eq!(lead.assigned_to_name.as_deref(), Some(user.username.as_str()));
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.priority, PriorityLevel::Medium);
    assert!(lead.company_name.is_some());
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_lead_for_missing_company_is_rejected() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;

    let err = LeadRepository::new(db.clone())
        .create(lead_input(serde_json::json!({ "company": Uuid::new_v4() })), user.id)
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::InvalidReference { entity: "Company", .. }));
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_update_status() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({})).await;
    let repo = LeadRepository::new(db.clone());
    let lead = repo
        .create(lead_input(serde_json::json!({ "company": company })), user.id)
        .await
        .unwrap();

    let moved = repo.update_status(lead.id, "qualified").await.unwrap();
    assert_eq!(moved.status, LeadStatus::Qualified);

    let err = repo.update_status(lead.id, "archived").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));

    let err = repo.update_status(Uuid::new_v4(), "new").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_investment_records_creator() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({})).await;

    let input: CreateInvestmentInput = serde_json::from_value(serde_json::json!({
        "company": company,
        "amount": "250000.00",
        "investment_date": "2026-02-01"
    }))
    .unwrap();
    let investment = InvestmentRepository::new(db.clone()).create(input, user.id).await.unwrap();

    assert_eq!(investment.amount, dec!(250000.00));
    assert_eq!(investment.currency, "USD");
    assert_eq!(investment.status, InvestmentStatus::Proposed);
    assert_eq!(investment.created_by, Some(user.id));
    assert_eq!(investment.created_by_name.as_deref(), Some(user.username.as_str()));
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_upcoming_tasks_for_caller() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({ "name": common::unique("Nimbus") })).await;
    let leads = LeadRepository::new(db.clone());

    leads
        .create(lead_input(serde_json::json!({ "company": company, "priority": "high" })), user.id)
        .await
        .unwrap();
    leads
        .create(lead_input(serde_json::json!({ "company": company, "status": "passed" })), user.id)
        .await
        .unwrap();

    let tasks = DashboardRepository::new(db.clone())
        .upcoming_tasks(user.id, Utc::now())
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].task.starts_with("Follow up with Nimbus"));
    assert_eq!(tasks[0].priority, "High");
    assert_eq!(tasks[0].due_date, "Today");
    assert_eq!(tasks[0].task_type, "follow_up");
}
