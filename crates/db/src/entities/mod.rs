//! `SeaORM` entity definitions.
//!
//! One module per table; Postgres enum types live in `sea_orm_active_enums`.

pub mod prelude;
pub mod sea_orm_active_enums;

pub mod companies;
pub mod company_tags;
pub mod competitive_analyses;
pub mod competitive_competitors;
pub mod competitive_strategic_recommendations;
pub mod high_level_analyses;
pub mod investments;
pub mod key_individual_public_mentions;
pub mod key_individual_risks;
pub mod key_individuals;
pub mod key_individuals_analyses;
pub mod leads;
pub mod market_analyses;
pub mod market_forces;
pub mod market_industry_trends;
pub mod market_revenue_information;
pub mod market_sales_channels;
pub mod perception_analyses;
pub mod perception_brand_metrics;
pub mod perception_competitor_sentiments;
pub mod perception_key_topics;
pub mod perception_recent_mentions;
pub mod perception_risk_alerts;
pub mod perception_sentiment_sources;
pub mod user_profiles;
pub mod users;
