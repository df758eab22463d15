//! Demo data seeder for DealScope development.
//!
//! Creates an admin user with profile plus a handful of companies, leads,
//! an investment and analyses. Does nothing if the admin user already exists.
//!
//! Usage: cargo run --bin seeder
//!
//! The admin password comes from `SEED_ADMIN_PASSWORD` (default `dealscope-admin`).

use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use dealscope_core::auth::hash_password;
use dealscope_db::entities::sea_orm_active_enums::ProfileRole;
use dealscope_db::repositories::{
    AnalysisRepository, CompanyRepository, CreateUserInput, HighLevelRepository,
    InvestmentRepository, LeadRepository, MarketRepository, PerceptionRepository,
    ProfileRepository, UserRepository,
};
use dealscope_shared::AppConfig;
use sea_orm::DatabaseConnection;

const ADMIN_USERNAME: &str = "admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,dealscope_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let db = dealscope_db::connect(&config.database).await?;
    info!("Connected to database");

    let users = UserRepository::new(db.clone());
    if users.username_exists(ADMIN_USERNAME).await? {
        info!(username = ADMIN_USERNAME, "Admin user already exists, skipping");
        return Ok(());
    }

    let admin_id = seed_admin(&db).await?;
    let company_ids = seed_companies(&db).await?;
    seed_pipeline(&db, admin_id, &company_ids).await?;
    seed_analyses(&db, admin_id, &company_ids).await?;

    info!("Seeding complete");
    Ok(())
}

async fn seed_admin(db: &DatabaseConnection) -> anyhow::Result<Uuid> {
    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "dealscope-admin".to_string());

    let user = UserRepository::new(db.clone())
        .create(CreateUserInput {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@dealscope.dev".to_string(),
            first_name: "Demo".to_string(),
            last_name: "Admin".to_string(),
            password_hash: hash_password(&password)?,
            is_staff: true,
        })
        .await?;

    ProfileRepository::new(db.clone())
        .create(user.id, ProfileRole::Admin)
        .await?;

    info!(user_id = %user.id, username = ADMIN_USERNAME, "Created admin user");
    Ok(user.id)
}

fn sample_companies() -> Vec<Value> {
    vec![
        json!({
            "name": "Northwind Payments",
            "description": "Cross-border payment rails for small merchants.",
            "industry": "Fintech",
            "stage": "series-a",
            "founded_year": 2019,
            "headquarters": "Lisbon, Portugal",
            "website": "https://northwind.example.com",
            "employees_min": 50,
            "employees_max": 200,
            "funding_raised": "18500000.00",
            "ai_score": 84,
            "ai_confidence": 0.78,
            "tags": ["payments", "b2b"]
        }),
        json!({
            "name": "Helio Grid",
            "description": "Software for community solar cooperatives.",
            "industry": "Climate",
            "stage": "seed",
            "founded_year": 2022,
            "headquarters": "Austin, TX",
            "employees_min": 10,
            "ai_score": 71,
            "ai_confidence": 0.6,
            "tags": ["energy"]
        }),
        json!({
            "name": "Quill Health",
            "description": "Clinical note summarization for outpatient practices.",
            "industry": "Healthcare",
            "stage": "pre-seed",
            "founded_year": 2024,
            "headquarters": "Toronto, Canada",
            "tags": ["ai", "healthcare"]
        }),
    ]
}

async fn seed_companies(db: &DatabaseConnection) -> anyhow::Result<Vec<Uuid>> {
    let repo = CompanyRepository::new(db.clone());
    let mut ids = Vec::new();

    for body in sample_companies() {
        let company = repo.create(serde_json::from_value(body)?).await?;
        info!(company_id = %company.company.id, name = %company.company.name, "Created company");
        ids.push(company.company.id);
    }

    Ok(ids)
}

async fn seed_pipeline(db: &DatabaseConnection, admin_id: Uuid, companies: &[Uuid]) -> anyhow::Result<()> {
    let leads = LeadRepository::new(db.clone());
    let statuses = [("qualified", "high", 88), ("new", "medium", 64), ("contacted", "critical", 91)];

    let mut first_lead = None;
    for (company, (status, priority, score)) in companies.iter().zip(statuses) {
        let lead = leads
            .create(
                serde_json::from_value(json!({
                    "company": company,
                    "status": status,
                    "priority": priority,
                    "source": "Partner referral",
                    "ai_match_score": score
                }))?,
                admin_id,
            )
            .await?;
        first_lead.get_or_insert((lead.id, lead.company));
    }
    info!(count = companies.len(), "Created leads");

    if let Some((lead_id, company_id)) = first_lead {
        let investment = InvestmentRepository::new(db.clone())
            .create(
                serde_json::from_value(json!({
                    "company": company_id,
                    "lead": lead_id,
                    "amount": "1500000.00",
                    "equity_percentage": 7.5,
                    "valuation": "20000000.00",
                    "investment_date": "2026-03-02",
                    "status": "approved"
                }))?,
                admin_id,
            )
            .await?;
        info!(investment_id = %investment.id, "Created investment");
    }

    Ok(())
}

async fn seed_analyses(db: &DatabaseConnection, admin_id: Uuid, companies: &[Uuid]) -> anyhow::Result<()> {
    let Some(&company) = companies.first() else {
        return Ok(());
    };

    HighLevelRepository::new(db.clone())
        .create(
            serde_json::from_value(json!({
                "company": company,
                "title": "Initial screen",
                "summary": "Strong merchant traction, thin margins.",
                "overall_score": 82,
                "confidence_score": 0.8,
                "is_completed": true,
                "key_findings": ["Net revenue retention above 120%"],
                "risk_factors": ["Interchange regulation"],
                "opportunities": ["Expansion into Brazil"],
                "recommendations": ["Proceed to partner meeting"]
            }))?,
            admin_id,
        )
        .await?;

    PerceptionRepository::new(db.clone())
        .create(
            serde_json::from_value(json!({
                "company": company,
                "title": "Merchant sentiment",
                "overall_score": 76,
                "sentiment_score": 72,
                "sentiment_sources": [
                    { "source_name": "App reviews", "positive_percentage": 78, "mentions_count": 1240 }
                ],
                "brand_metrics": [
                    { "metric_name": "Awareness", "current_score": 61, "industry_benchmark": 55 }
                ],
                "risk_alerts": [
                    { "title": "Chargeback complaints", "description": "Rising on forums.", "priority": "high" }
                ]
            }))?,
            admin_id,
        )
        .await?;

    MarketRepository::new(db.clone())
        .create(
            serde_json::from_value(json!({
                "company": company,
                "title": "SMB payments market",
                "market_size": "$48B",
                "market_growth_rate": 11.5,
                "industry_trends": [
                    { "title": "Real-time rails", "description": "Instant payment schemes spread.", "impact": "high", "relevance": 90 }
                ]
            }))?,
            admin_id,
        )
        .await?;

    info!(company_id = %company, "Created analyses");
    Ok(())
}
