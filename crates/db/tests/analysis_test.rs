//! Integration tests for the analysis repositories.

mod common;

use dealscope_db::repositories::analysis::perception::{
    CreatePerceptionInput, UpdatePerceptionInput,
};
use dealscope_db::repositories::analysis::key_individuals::CreateKeyIndividualsInput;
use dealscope_db::repositories::{
    AnalysisFilter, AnalysisRepository, KeyIndividualsRepository, PerceptionRepository,
    RepositoryError,
};
use dealscope_db::CompanyRepository;
use dealscope_shared::types::PageRequest;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_perception_children_are_ordered_and_replaced() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({})).await;
    let repo = PerceptionRepository::new(db.clone());

    let input: CreatePerceptionInput = serde_json::from_value(serde_json::json!({
        "company": company,
        "title": "Brand pulse",
        "overall_score": 70,
        "brand_metrics": [
            { "metric_name": "Awareness", "current_score": 61, "industry_benchmark": 70 },
            { "metric_name": "Trust", "current_score": 78, "industry_benchmark": 70 }
        ],
        "risk_alerts": [
            { "title": "Minor outage", "priority": "low" },
            { "title": "Lawsuit", "priority": "critical" }
        ]
    }))
    .unwrap();
    let created = repo.create(input, user.id).await.unwrap();

    assert_eq!(created.common.analysis_type, "perception");
    assert_eq!(created.common.analyst_name.as_deref(), Some(user.username.as_str()));
    assert_eq!(created.brand_metrics[0].metric.metric_name, "Trust");
    assert!(created.brand_metrics[0].is_above_benchmark);
    assert_eq!(created.brand_metrics[1].benchmark_difference, -9);
    assert_eq!(created.risk_alerts[0].alert.title, "Lawsuit");
    assert_eq!(created.risk_alerts[0].border_color, "red");
    assert_eq!(created.risk_alerts[1].border_color, "blue");

    let patch: UpdatePerceptionInput =
        serde_json::from_value(serde_json::json!({ "risk_alerts": [], "sentiment_score": 55 })).unwrap();
    let updated = repo.update(created.common.id, patch).await.unwrap();

    assert!(updated.risk_alerts.is_empty());
    assert_eq!(updated.brand_metrics.len(), 2);
    assert_eq!(updated.sentiment_score, Some(55));
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_board_members_listed_last() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({})).await;

    let input: CreateKeyIndividualsInput = serde_json::from_value(serde_json::json!({
        "company": company,
        "title": "Team",
        "individuals": [
            { "name": "Zed", "is_board_member": false },
            { "name": "Amy", "is_board_member": true },
            { "name": "Bob", "is_board_member": false }
        ]
    }))
    .unwrap();
    let detail = KeyIndividualsRepository::new(db.clone()).create(input, user.id).await.unwrap();

    let names: Vec<_> = detail.individuals.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Zed", "Amy"]);
}

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_list_delete_and_full_analysis() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let company = common::create_company(&db, serde_json::json!({})).await;
    let repo = PerceptionRepository::new(db.clone());

    let input: CreatePerceptionInput = serde_json::from_value(serde_json::json!({
        "company": company,
        "title": "Sentiment",
        "overall_score": 80,
        "confidence_score": 0.5
    }))
    .unwrap();
    let created = repo.create(input, user.id).await.unwrap();

    let filter = AnalysisFilter {
        company: Some(company),
        ..AnalysisFilter::default()
    };
    let page = repo.list(&filter, &PageRequest::default()).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].analysis_type, "perception");

    let full = CompanyRepository::new(db.clone()).full_analysis(company).await.unwrap();
    assert_eq!(full.perception_analyses.len(), 1);
    assert_eq!(full.metrics_summary.total_analyses, 1);
    assert!((full.metrics_summary.avg_score - 80.0).abs() < 1e-9);

    repo.delete(created.common.id).await.unwrap();
    let err = repo.find(created.common.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}
