//! Integration tests for dashboard statistics.
//!
//! The statistics aggregate whole tables, so this binary holds a single test
//! that starts from empty company data.

mod common;

use chrono::Utc;
use dealscope_db::DashboardRepository;
use dealscope_db::repositories::{
    CompetitiveRepository, CreateInvestmentInput, CreateLeadInput, HighLevelRepository,
    InvestmentRepository, KeyIndividualsRepository, LeadRepository, MarketRepository,
    PerceptionRepository,
};
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

async fn add_lead(db: &DatabaseConnection, user: Uuid, body: serde_json::Value) {
    let input: CreateLeadInput = serde_json::from_value(body).expect("valid lead body");
    LeadRepository::new(db.clone()).create(input, user).await.unwrap();
}

async fn add_investment(db: &DatabaseConnection, user: Uuid, body: serde_json::Value) {
    let input: CreateInvestmentInput = serde_json::from_value(body).expect("valid investment body");
    InvestmentRepository::new(db.clone()).create(input, user).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_stats_from_known_pipeline() {
    let db = common::connect().await;
    db.execute_unprepared("TRUNCATE companies CASCADE").await.unwrap();

    let user = common::create_user(&db).await.id;
    let company = common::create_company(&db, serde_json::json!({})).await;
    let dashboard = DashboardRepository::new(db.clone());

    let empty = dashboard.stats(Utc::now()).await.unwrap();
    assert_eq!(empty.success_rate, dec!(0));
    assert_eq!(serde_json::to_value(&empty).unwrap()["investment_pipeline"], "0.00");

    // Two leads and one completed investment.
    add_lead(
        &db,
        user,
        serde_json::json!({ "company": company, "priority": "high", "ai_match_score": 80 }),
    )
    .await;
    add_lead(
        &db,
        user,
        serde_json::json!({
            "company": company,
            "priority": "medium",
            "status": "passed",
            "ai_match_score": 95
        }),
    )
    .await;
    add_investment(
        &db,
        user,
        serde_json::json!({
            "company": company,
            "amount": "5000.00",
            "investment_date": "2026-01-15",
            "status": "completed"
        }),
    )
    .await;

    let stats = dashboard.stats(Utc::now()).await.unwrap();
    assert_eq!(stats.success_rate, dec!(50.0));
    assert_eq!(stats.active_prospects, 1);
    assert_eq!(stats.hot_leads, 1);
    assert_eq!(stats.avg_match_score, dec!(87.5));
    assert_eq!(stats.investment_pipeline, dec!(0.00));
    assert_eq!(stats.new_companies_this_week, 1);

    // A critical lead without a score is active but neither hot nor averaged.
    add_lead(
        &db,
        user,
        serde_json::json!({ "company": company, "priority": "critical", "status": "qualified" }),
    )
    .await;
    for (amount, status) in [("200.25", "proposed"), ("50.25", "approved")] {
        add_investment(
            &db,
            user,
            serde_json::json!({
                "company": company,
                "amount": amount,
                "investment_date": "2026-02-01",
                "status": status
            }),
        )
        .await;
    }

    common::create_analysis::<HighLevelRepository>(
        &db,
        user,
        serde_json::json!({ "company": company, "title": "Overview", "is_completed": true }),
    )
    .await;
    common::create_analysis::<PerceptionRepository>(
        &db,
        user,
        serde_json::json!({ "company": company, "title": "Pulse", "is_completed": true }),
    )
    .await;
    common::create_analysis::<PerceptionRepository>(
        &db,
        user,
        serde_json::json!({ "company": company, "title": "Draft pulse" }),
    )
    .await;
    common::create_analysis::<MarketRepository>(
        &db,
        user,
        serde_json::json!({ "company": company, "title": "Market", "is_completed": true }),
    )
    .await;
    common::create_analysis::<KeyIndividualsRepository>(
        &db,
        user,
        serde_json::json!({ "company": company, "title": "Team", "is_completed": true }),
    )
    .await;
    common::create_analysis::<CompetitiveRepository>(
        &db,
        user,
        serde_json::json!({ "company": company, "title": "Rivals", "is_completed": true }),
    )
    .await;

    let stats = dashboard.stats(Utc::now()).await.unwrap();
    assert_eq!(stats.success_rate, dec!(33.3));
    assert_eq!(stats.active_prospects, 2);
    assert_eq!(stats.hot_leads, 1);
    assert_eq!(stats.avg_match_score, dec!(87.5));
    assert_eq!(stats.analysis_completed, 5);

    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["investment_pipeline"], "250.50");
    assert_eq!(value["success_rate"], 33.3);
    assert_eq!(value["avg_match_score"], 87.5);

    let recent = dashboard.recent_analyses().await.unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}
