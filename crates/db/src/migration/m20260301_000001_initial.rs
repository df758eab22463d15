//! Initial database migration.
//!
//! Creates enums, users and profiles, companies, the pipeline tables, the five
//! analysis tables with their sub-entity tables, and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(FUNCTIONS_SQL).await?;

        // ============================================================
        // PART 2: USERS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: COMPANIES & PIPELINE
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(PIPELINE_SQL).await?;

        // ============================================================
        // PART 4: ANALYSES
        // ============================================================
        db.execute_unprepared(HIGH_LEVEL_SQL).await?;
        db.execute_unprepared(PERCEPTION_SQL).await?;
        db.execute_unprepared(MARKET_SQL).await?;
        db.execute_unprepared(KEY_INDIVIDUALS_SQL).await?;
        db.execute_unprepared(COMPETITIVE_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE company_stage AS ENUM ('pre-seed', 'seed', 'series-a', 'series-b', 'series-c');

CREATE TYPE lead_status AS ENUM (
    'new',
    'contacted',
    'qualified',
    'under_review',
    'recommended',
    'passed',
    'invested'
);

-- Ascending order matters: ORDER BY priority DESC lists critical first
CREATE TYPE priority_level AS ENUM ('low', 'medium', 'high', 'critical');

CREATE TYPE investment_status AS ENUM ('proposed', 'approved', 'completed', 'exited');

CREATE TYPE profile_role AS ENUM ('analyst', 'portfolio_manager', 'partner', 'admin');

CREATE TYPE trend_direction AS ENUM ('up', 'down', 'stable');

CREATE TYPE engagement_level AS ENUM ('low', 'medium', 'high', 'very_high');

CREATE TYPE reliability_level AS ENUM ('low', 'medium', 'high', 'verified');

CREATE TYPE impact_level AS ENUM ('low', 'medium', 'high');
";

const FUNCTIONS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(150) NOT NULL UNIQUE,
    email VARCHAR(254) NOT NULL DEFAULT '',
    first_name VARCHAR(150) NOT NULL DEFAULT '',
    last_name VARCHAR(150) NOT NULL DEFAULT '',
    password_hash VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_staff BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE user_profiles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    role profile_role NOT NULL DEFAULT 'analyst',
    preferred_industries JSONB NOT NULL DEFAULT '[]',
    notification_preferences JSONB NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_preferred_industries_array CHECK (jsonb_typeof(preferred_industries) = 'array'),
    CONSTRAINT chk_notification_preferences_object CHECK (jsonb_typeof(notification_preferences) = 'object')
);
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    industry VARCHAR(100) NOT NULL,
    stage company_stage NOT NULL,
    founded_year INTEGER NOT NULL,
    headquarters VARCHAR(255) NOT NULL DEFAULT '',
    website VARCHAR(200),
    logo_url VARCHAR(200),
    employees_min INTEGER,
    employees_max INTEGER,
    funding_raised NUMERIC(15, 2),
    funding_currency CHAR(3) NOT NULL DEFAULT 'USD',
    ai_score INTEGER,
    ai_confidence DOUBLE PRECISION,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_company_ai_score CHECK (ai_score IS NULL OR ai_score BETWEEN 0 AND 100),
    CONSTRAINT chk_company_ai_confidence CHECK (ai_confidence IS NULL OR ai_confidence BETWEEN 0 AND 1)
);

CREATE INDEX idx_companies_active_updated ON companies(updated_at DESC) WHERE is_active = true;
CREATE INDEX idx_companies_created ON companies(created_at);

CREATE TABLE company_tags (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_company_tag UNIQUE (company_id, name)
);
";

const PIPELINE_SQL: &str = r"
CREATE TABLE leads (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    status lead_status NOT NULL DEFAULT 'new',
    priority priority_level NOT NULL DEFAULT 'medium',
    assigned_to UUID REFERENCES users(id) ON DELETE SET NULL,
    source VARCHAR(255) NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    ai_match_score INTEGER,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_lead_match_score CHECK (ai_match_score IS NULL OR ai_match_score BETWEEN 0 AND 100)
);

CREATE INDEX idx_leads_company ON leads(company_id);
CREATE INDEX idx_leads_assignee_status ON leads(assigned_to, status);

CREATE TABLE investments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    lead_id UUID REFERENCES leads(id) ON DELETE SET NULL,
    amount NUMERIC(15, 2) NOT NULL,
    currency CHAR(3) NOT NULL DEFAULT 'USD',
    equity_percentage DOUBLE PRECISION,
    valuation NUMERIC(15, 2),
    investment_date DATE NOT NULL,
    status investment_status NOT NULL DEFAULT 'proposed',
    created_by UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_investment_amount CHECK (amount >= 0),
    CONSTRAINT chk_investment_equity CHECK (equity_percentage IS NULL OR equity_percentage BETWEEN 0 AND 100)
);

CREATE INDEX idx_investments_company ON investments(company_id);
CREATE INDEX idx_investments_status ON investments(status);
";

const HIGH_LEVEL_SQL: &str = r"
CREATE TABLE high_level_analyses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    overall_score INTEGER CHECK (overall_score IS NULL OR overall_score BETWEEN 0 AND 100),
    confidence_score DOUBLE PRECISION CHECK (confidence_score IS NULL OR confidence_score BETWEEN 0 AND 1),
    analyst_id UUID REFERENCES users(id) ON DELETE SET NULL,
    is_completed BOOLEAN NOT NULL DEFAULT false,
    key_findings JSONB NOT NULL DEFAULT '[]',
    risk_factors JSONB NOT NULL DEFAULT '[]',
    opportunities JSONB NOT NULL DEFAULT '[]',
    recommendations JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_high_level_company ON high_level_analyses(company_id, created_at DESC);
";

const PERCEPTION_SQL: &str = r"
CREATE TABLE perception_analyses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    overall_score INTEGER CHECK (overall_score IS NULL OR overall_score BETWEEN 0 AND 100),
    confidence_score DOUBLE PRECISION CHECK (confidence_score IS NULL OR confidence_score BETWEEN 0 AND 1),
    analyst_id UUID REFERENCES users(id) ON DELETE SET NULL,
    is_completed BOOLEAN NOT NULL DEFAULT false,
    sentiment_score INTEGER CHECK (sentiment_score IS NULL OR sentiment_score BETWEEN 0 AND 100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_perception_company ON perception_analyses(company_id, created_at DESC);

CREATE TABLE perception_sentiment_sources (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES perception_analyses(id) ON DELETE CASCADE,
    source_name VARCHAR(255) NOT NULL,
    positive_percentage INTEGER NOT NULL CHECK (positive_percentage BETWEEN 0 AND 100),
    mentions_count INTEGER NOT NULL DEFAULT 0 CHECK (mentions_count >= 0),
    sentiment_label VARCHAR(50) NOT NULL DEFAULT '',
    change_vs_previous VARCHAR(50) NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE perception_competitor_sentiments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES perception_analyses(id) ON DELETE CASCADE,
    company_name VARCHAR(255) NOT NULL,
    positive_percentage INTEGER NOT NULL CHECK (positive_percentage BETWEEN 0 AND 100),
    mentions_count INTEGER NOT NULL DEFAULT 0 CHECK (mentions_count >= 0),
    is_current_company BOOLEAN NOT NULL DEFAULT false,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE perception_recent_mentions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES perception_analyses(id) ON DELETE CASCADE,
    title VARCHAR(500) NOT NULL,
    source VARCHAR(255) NOT NULL,
    date DATE NOT NULL,
    url VARCHAR(200) NOT NULL DEFAULT '',
    excerpt TEXT NOT NULL DEFAULT '',
    reach VARCHAR(50) NOT NULL DEFAULT '',
    engagement_level engagement_level NOT NULL DEFAULT 'medium',
    sentiment_label VARCHAR(50) NOT NULL DEFAULT '',
    sentiment_score INTEGER NOT NULL CHECK (sentiment_score BETWEEN 0 AND 100),
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE perception_key_topics (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES perception_analyses(id) ON DELETE CASCADE,
    topic_name VARCHAR(255) NOT NULL,
    sentiment_score INTEGER NOT NULL CHECK (sentiment_score BETWEEN 0 AND 100),
    mentions_count INTEGER NOT NULL DEFAULT 0 CHECK (mentions_count >= 0),
    trend trend_direction NOT NULL DEFAULT 'stable',
    description TEXT NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE perception_brand_metrics (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES perception_analyses(id) ON DELETE CASCADE,
    metric_name VARCHAR(255) NOT NULL,
    current_score INTEGER NOT NULL CHECK (current_score BETWEEN 0 AND 100),
    industry_benchmark INTEGER NOT NULL CHECK (industry_benchmark BETWEEN 0 AND 100),
    trend trend_direction NOT NULL DEFAULT 'stable',
    description TEXT NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE perception_risk_alerts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES perception_analyses(id) ON DELETE CASCADE,
    title VARCHAR(500) NOT NULL,
    priority priority_level NOT NULL DEFAULT 'medium',
    description TEXT NOT NULL DEFAULT '',
    impact TEXT NOT NULL DEFAULT '',
    recommendation TEXT NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const MARKET_SQL: &str = r"
CREATE TABLE market_analyses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    overall_score INTEGER CHECK (overall_score IS NULL OR overall_score BETWEEN 0 AND 100),
    confidence_score DOUBLE PRECISION CHECK (confidence_score IS NULL OR confidence_score BETWEEN 0 AND 1),
    analyst_id UUID REFERENCES users(id) ON DELETE SET NULL,
    is_completed BOOLEAN NOT NULL DEFAULT false,
    market_size VARCHAR(255) NOT NULL DEFAULT '',
    market_growth_rate DOUBLE PRECISION,
    revenue_note TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_market_company ON market_analyses(company_id, created_at DESC);

CREATE TABLE market_revenue_information (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES market_analyses(id) ON DELETE CASCADE,
    title VARCHAR(500) NOT NULL,
    source VARCHAR(255) NOT NULL,
    date DATE NOT NULL,
    url VARCHAR(200) NOT NULL DEFAULT '',
    revenue_figure VARCHAR(100) NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    reliability reliability_level NOT NULL DEFAULT 'medium',
    growth_rate VARCHAR(50) NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE market_forces (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES market_analyses(id) ON DELETE CASCADE,
    force_name VARCHAR(255) NOT NULL,
    intensity impact_level NOT NULL DEFAULT 'medium',
    score INTEGER NOT NULL CHECK (score BETWEEN 0 AND 100),
    description TEXT NOT NULL DEFAULT '',
    factors JSONB NOT NULL DEFAULT '[]',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE market_sales_channels (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES market_analyses(id) ON DELETE CASCADE,
    platform_name VARCHAR(255) NOT NULL,
    url VARCHAR(200) NOT NULL DEFAULT '',
    count_unit VARCHAR(50) NOT NULL DEFAULT '',
    installs_count VARCHAR(50) NOT NULL DEFAULT '',
    revenue_amount VARCHAR(50) NOT NULL DEFAULT '',
    rating DOUBLE PRECISION,
    reviews_count INTEGER,
    change_percentage DOUBLE PRECISION,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE market_industry_trends (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES market_analyses(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    impact impact_level NOT NULL DEFAULT 'medium',
    relevance INTEGER NOT NULL CHECK (relevance BETWEEN 0 AND 100),
    description TEXT NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const KEY_INDIVIDUALS_SQL: &str = r"
CREATE TABLE key_individuals_analyses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    overall_score INTEGER CHECK (overall_score IS NULL OR overall_score BETWEEN 0 AND 100),
    confidence_score DOUBLE PRECISION CHECK (confidence_score IS NULL OR confidence_score BETWEEN 0 AND 1),
    analyst_id UUID REFERENCES users(id) ON DELETE SET NULL,
    is_completed BOOLEAN NOT NULL DEFAULT false,
    team_strength_score INTEGER CHECK (team_strength_score IS NULL OR team_strength_score BETWEEN 0 AND 100),
    leadership_assessment TEXT NOT NULL DEFAULT '',
    team_strengths JSONB NOT NULL DEFAULT '[]',
    team_risks JSONB NOT NULL DEFAULT '[]',
    team_recommendations JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_key_individuals_company ON key_individuals_analyses(company_id, created_at DESC);

CREATE TABLE key_individuals (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES key_individuals_analyses(id) ON DELETE CASCADE,
    is_board_member BOOLEAN NOT NULL DEFAULT false,
    name VARCHAR(255) NOT NULL,
    role VARCHAR(255) NOT NULL DEFAULT '',
    experience VARCHAR(255) NOT NULL DEFAULT '',
    education VARCHAR(255) NOT NULL DEFAULT '',
    credibility_score INTEGER CHECK (credibility_score IS NULL OR credibility_score BETWEEN 0 AND 100),
    public_perception INTEGER CHECK (public_perception IS NULL OR public_perception BETWEEN 0 AND 100),
    previous_companies JSONB NOT NULL DEFAULT '[]',
    strengths JSONB NOT NULL DEFAULT '[]',
    achievements JSONB NOT NULL DEFAULT '[]',
    social_media JSONB NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE key_individual_risks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES key_individuals_analyses(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE key_individual_public_mentions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES key_individuals_analyses(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    person VARCHAR(255) NOT NULL DEFAULT '',
    source VARCHAR(255) NOT NULL DEFAULT '',
    date DATE,
    summary TEXT NOT NULL DEFAULT '',
    sentiment VARCHAR(50) NOT NULL DEFAULT '',
    url VARCHAR(200) NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const COMPETITIVE_SQL: &str = r"
CREATE TABLE competitive_analyses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    overall_score INTEGER CHECK (overall_score IS NULL OR overall_score BETWEEN 0 AND 100),
    confidence_score DOUBLE PRECISION CHECK (confidence_score IS NULL OR confidence_score BETWEEN 0 AND 1),
    analyst_id UUID REFERENCES users(id) ON DELETE SET NULL,
    is_completed BOOLEAN NOT NULL DEFAULT false,
    competitive_position VARCHAR(100) NOT NULL DEFAULT '',
    competitor_analysis JSONB NOT NULL DEFAULT '[]',
    swot_strengths JSONB NOT NULL DEFAULT '[]',
    swot_weaknesses JSONB NOT NULL DEFAULT '[]',
    swot_opportunities JSONB NOT NULL DEFAULT '[]',
    swot_threats JSONB NOT NULL DEFAULT '[]',
    competitive_advantages JSONB NOT NULL DEFAULT '[]',
    competitive_threats JSONB NOT NULL DEFAULT '[]',
    differentiation_factors JSONB NOT NULL DEFAULT '[]',
    strategic_recommendations JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_competitive_company ON competitive_analyses(company_id, created_at DESC);

CREATE TABLE competitive_competitors (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES competitive_analyses(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    position VARCHAR(255) NOT NULL DEFAULT '',
    logo VARCHAR(10) NOT NULL DEFAULT '📊',
    employees VARCHAR(100) NOT NULL DEFAULT '',
    headquarters VARCHAR(255) NOT NULL DEFAULT '',
    founded VARCHAR(50) NOT NULL DEFAULT '',
    funding VARCHAR(100) NOT NULL DEFAULT '',
    market_share VARCHAR(50) NOT NULL DEFAULT '',
    revenue VARCHAR(100) NOT NULL DEFAULT '',
    score INTEGER NOT NULL DEFAULT 0 CHECK (score BETWEEN 0 AND 100),
    trend trend_direction NOT NULL DEFAULT 'stable',
    strengths JSONB NOT NULL DEFAULT '[]',
    weaknesses JSONB NOT NULL DEFAULT '[]',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE competitive_strategic_recommendations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    analysis_id UUID NOT NULL REFERENCES competitive_analyses(id) ON DELETE CASCADE,
    category VARCHAR(255) NOT NULL,
    priority priority_level NOT NULL DEFAULT 'medium',
    recommendations JSONB NOT NULL DEFAULT '[]',
    description TEXT NOT NULL DEFAULT '',
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

/// Attaches `set_updated_at` to every table with an `updated_at` column.
const TRIGGERS_SQL: &str = r"
DO $$
DECLARE
    t TEXT;
BEGIN
    FOR t IN
        SELECT table_name FROM information_schema.columns
        WHERE table_schema = current_schema() AND column_name = 'updated_at'
    LOOP
        EXECUTE format(
            'CREATE TRIGGER trg_%s_updated_at BEFORE UPDATE ON %I FOR EACH ROW EXECUTE FUNCTION set_updated_at()',
            t, t
        );
    END LOOP;
END;
$$;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS competitive_strategic_recommendations CASCADE;
DROP TABLE IF EXISTS competitive_competitors CASCADE;
DROP TABLE IF EXISTS competitive_analyses CASCADE;
DROP TABLE IF EXISTS key_individual_public_mentions CASCADE;
DROP TABLE IF EXISTS key_individual_risks CASCADE;
DROP TABLE IF EXISTS key_individuals CASCADE;
DROP TABLE IF EXISTS key_individuals_analyses CASCADE;
DROP TABLE IF EXISTS market_industry_trends CASCADE;
DROP TABLE IF EXISTS market_sales_channels CASCADE;
DROP TABLE IF EXISTS market_forces CASCADE;
DROP TABLE IF EXISTS market_revenue_information CASCADE;
DROP TABLE IF EXISTS market_analyses CASCADE;
DROP TABLE IF EXISTS perception_risk_alerts CASCADE;
DROP TABLE IF EXISTS perception_brand_metrics CASCADE;
DROP TABLE IF EXISTS perception_key_topics CASCADE;
DROP TABLE IF EXISTS perception_recent_mentions CASCADE;
DROP TABLE IF EXISTS perception_competitor_sentiments CASCADE;
DROP TABLE IF EXISTS perception_sentiment_sources CASCADE;
DROP TABLE IF EXISTS perception_analyses CASCADE;
DROP TABLE IF EXISTS high_level_analyses CASCADE;
DROP TABLE IF EXISTS investments CASCADE;
DROP TABLE IF EXISTS leads CASCADE;
DROP TABLE IF EXISTS company_tags CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP TABLE IF EXISTS user_profiles CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at() CASCADE;

DROP TYPE IF EXISTS impact_level;
DROP TYPE IF EXISTS reliability_level;
DROP TYPE IF EXISTS engagement_level;
DROP TYPE IF EXISTS trend_direction;
DROP TYPE IF EXISTS profile_role;
DROP TYPE IF EXISTS investment_status;
DROP TYPE IF EXISTS priority_level;
DROP TYPE IF EXISTS lead_status;
DROP TYPE IF EXISTS company_stage;
";
