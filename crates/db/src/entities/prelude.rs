//! Entity type aliases.

pub use super::companies::Entity as Companies;
pub use super::company_tags::Entity as CompanyTags;
pub use super::competitive_analyses::Entity as CompetitiveAnalyses;
pub use super::competitive_competitors::Entity as CompetitiveCompetitors;
pub use super::competitive_strategic_recommendations::Entity as CompetitiveStrategicRecommendations;
pub use super::high_level_analyses::Entity as HighLevelAnalyses;
pub use super::investments::Entity as Investments;
pub use super::key_individual_public_mentions::Entity as KeyIndividualPublicMentions;
pub use super::key_individual_risks::Entity as KeyIndividualRisks;
pub use super::key_individuals::Entity as KeyIndividuals;
pub use super::key_individuals_analyses::Entity as KeyIndividualsAnalyses;
pub use super::leads::Entity as Leads;
pub use super::market_analyses::Entity as MarketAnalyses;
pub use super::market_forces::Entity as MarketForces;
pub use super::market_industry_trends::Entity as MarketIndustryTrends;
pub use super::market_revenue_information::Entity as MarketRevenueInformation;
pub use super::market_sales_channels::Entity as MarketSalesChannels;
pub use super::perception_analyses::Entity as PerceptionAnalyses;
pub use super::perception_brand_metrics::Entity as PerceptionBrandMetrics;
pub use super::perception_competitor_sentiments::Entity as PerceptionCompetitorSentiments;
pub use super::perception_key_topics::Entity as PerceptionKeyTopics;
pub use super::perception_recent_mentions::Entity as PerceptionRecentMentions;
pub use super::perception_risk_alerts::Entity as PerceptionRiskAlerts;
pub use super::perception_sentiment_sources::Entity as PerceptionSentimentSources;
pub use super::user_profiles::Entity as UserProfiles;
pub use super::users::Entity as Users;
