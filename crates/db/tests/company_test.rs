//! Integration tests for the company repository.

mod common;

use dealscope_db::entities::{
    company_tags, competitive_analyses, competitive_competitors, high_level_analyses, investments,
    key_individuals, key_individuals_analyses, leads, market_analyses, market_forces,
    perception_analyses, perception_risk_alerts,
};
use dealscope_db::repositories::{
    CompanyFilter, CompanySearch, CompetitiveRepository, HighLevelRepository,
    KeyIndividualsRepository, MarketRepository, PerceptionRepository,
};
use dealscope_db::{CompanyRepository, InvestmentRepository, LeadRepository, RepositoryError};
use dealscope_shared::types::PageRequest;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_create_with_tags_and_derived_range() {
    let db = common::connect().await;
    let repo = CompanyRepository::new(db.clone());

    let detail = repo
        .create(common::company_input(serde_json::json!({
            "employees_min": 50,
            "employees_max": 200,
            "funding_raised": "1500000.00",
            "tags": ["b2b", "payments", "b2b"]
        })))
        .await
        .expect("Failed to create company");

    assert_eq!(detail.employee_range, "50-200");
    assert_eq!(detail.company.funding_currency, "USD");
    assert_eq!(detail.company.funding_raised, Some(dec!(1500000.00)));
    let tags: Vec<_> = detail.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["b2b", "payments"]);
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_duplicate_tag_conflicts() {
    let db = common::connect().await;
    let repo = CompanyRepository::new(db.clone());
    let id = common::create_company(&db, serde_json::json!({ "tags": ["ai"] })).await;

    let err = repo.add_tag(id, "ai").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(ref m) if m == "Tag 'ai' already exists"));

    let blank = repo.add_tag(id, "   ").await.unwrap_err();
    assert!(matches!(blank, RepositoryError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_inactive_company_is_hidden() {
    let db = common::connect().await;
    let repo = CompanyRepository::new(db.clone());
    let id = common::create_company(&db, serde_json::json!({ "is_active": false })).await;

    let err = repo.find(id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { entity: "Company", .. }));
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_search_respects_score_window() {
    let db = common::connect().await;
    let repo = CompanyRepository::new(db.clone());
    let industry = common::unique("Robotics");
    common::create_company(&db, serde_json::json!({ "industry": industry, "ai_score": 40 })).await;
    common::create_company(&db, serde_json::json!({ "industry": industry, "ai_score": 90 })).await;

    let search = CompanySearch {
        industry: industry.clone(),
        min_score: 50,
        ..CompanySearch::default()
    };
    let page = repo.search(&search, &PageRequest::default()).await.unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].ai_score, Some(90));

    let filter = CompanyFilter {
        industry: Some(industry),
        ordering: Some("-ai_score".to_string()),
        ..CompanyFilter::default()
    };
    let page = repo.list(&filter, &PageRequest::default()).await.unwrap();
    let scores: Vec<_> = page.data.iter().map(|c| c.ai_score).collect();
    assert_eq!(scores, vec![Some(90), Some(40)]);
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_full_analysis_of_empty_company() {
    let db = common::connect().await;
    let id = common::create_company(&db, serde_json::json!({})).await;

    let full = CompanyRepository::new(db.clone()).full_analysis(id).await.unwrap();

    assert_eq!(full.metrics_summary.total_analyses, 0);
    assert!(full.metrics_summary.avg_score.abs() < f64::EPSILON);
    assert!(full.leads.is_empty());
    assert!(full.metrics_summary.lead_status_breakdown.is_empty());
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_delete_removes_dependent_rows() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let id = common::create_company(&db, serde_json::json!({ "tags": ["ai", "seed"] })).await;

    LeadRepository::new(db.clone())
        .create(serde_json::from_value(serde_json::json!({ "company": id })).unwrap(), user.id)
        .await
        .unwrap();
    InvestmentRepository::new(db.clone())
        .create(
            serde_json::from_value(serde_json::json!({
                "company": id,
                "amount": "1000.00",
                "investment_date": "2026-02-01"
            }))
            .unwrap(),
            user.id,
        )
        .await
        .unwrap();

    common::create_analysis::<HighLevelRepository>(
        &db,
        user.id,
        serde_json::json!({ "company": id, "title": "Overview" }),
    )
    .await;
    let perception = common::create_analysis::<PerceptionRepository>(
        &db,
        user.id,
        serde_json::json!({
            "company": id,
            "title": "Pulse",
            "risk_alerts": [{ "title": "Lawsuit", "priority": "high" }]
        }),
    )
    .await;
    let market = common::create_analysis::<MarketRepository>(
        &db,
        user.id,
        serde_json::json!({
            "company": id,
            "title": "Market",
            "market_forces": [{ "force_name": "Buyer power", "score": 60 }]
        }),
    )
    .await;
    let team = common::create_analysis::<KeyIndividualsRepository>(
        &db,
        user.id,
        serde_json::json!({ "company": id, "title": "Team", "individuals": [{ "name": "Amy" }] }),
    )
    .await;
    let competitive = common::create_analysis::<CompetitiveRepository>(
        &db,
        user.id,
        serde_json::json!({ "company": id, "title": "Rivals", "competitors": [{ "name": "Globex" }] }),
    )
    .await;

    assert_eq!(
        perception_risk_alerts::Entity::find()
            .filter(perception_risk_alerts::Column::AnalysisId.eq(perception))
            .count(&db)
            .await
            .unwrap(),
        1
    );

    CompanyRepository::new(db.clone()).delete(id).await.unwrap();

    let by_company = [
        company_tags::Entity::find()
            .filter(company_tags::Column::CompanyId.eq(id))
            .count(&db)
            .await,
        leads::Entity::find().filter(leads::Column::CompanyId.eq(id)).count(&db).await,
        investments::Entity::find()
            .filter(investments::Column::CompanyId.eq(id))
            .count(&db)
            .await,
        high_level_analyses::Entity::find()
            .filter(high_level_analyses::Column::CompanyId.eq(id))
            .count(&db)
            .await,
        perception_analyses::Entity::find()
            .filter(perception_analyses::Column::CompanyId.eq(id))
            .count(&db)
            .await,
        market_analyses::Entity::find()
            .filter(market_analyses::Column::CompanyId.eq(id))
            .count(&db)
            .await,
        key_individuals_analyses::Entity::find()
            .filter(key_individuals_analyses::Column::CompanyId.eq(id))
            .count(&db)
            .await,
        competitive_analyses::Entity::find()
            .filter(competitive_analyses::Column::CompanyId.eq(id))
            .count(&db)
            .await,
    ];
    for count in by_company {
        assert_eq!(count.unwrap(), 0);
    }

    let by_analysis = [
        perception_risk_alerts::Entity::find()
            .filter(perception_risk_alerts::Column::AnalysisId.eq(perception))
            .count(&db)
            .await,
        market_forces::Entity::find()
            .filter(market_forces::Column::AnalysisId.eq(market))
            .count(&db)
            .await,
        key_individuals::Entity::find()
            .filter(key_individuals::Column::AnalysisId.eq(team))
            .count(&db)
            .await,
        competitive_competitors::Entity::find()
            .filter(competitive_competitors::Column::AnalysisId.eq(competitive))
            .count(&db)
            .await,
    ];
    for count in by_analysis {
        assert_eq!(count.unwrap(), 0);
    }

    let err = CompanyRepository::new(db.clone()).delete(id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { entity: "Company", .. }));
}
