//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod analysis;
pub mod company;
pub mod dashboard;
pub mod error;
pub mod investment;
pub mod lead;
mod names;
pub mod nullable;
pub mod ordering;
pub mod profile;
pub mod user;

pub use analysis::{
    AnalysisFilter, AnalysisRepository, AnalysisSummary,
    competitive::CompetitiveRepository, high_level::HighLevelRepository,
    key_individuals::KeyIndividualsRepository, market::MarketRepository,
    perception::PerceptionRepository,
};
pub use company::{
    CompanyDetail, CompanyFilter, CompanyListItem, CompanyRepository, CompanySearch,
    CreateCompanyInput, FullAnalysis, TagView, UpdateCompanyInput,
};
pub use dashboard::DashboardRepository;
pub use error::{RepoResult, RepositoryError};
pub use investment::{
    CreateInvestmentInput, InvestmentFilter, InvestmentRepository, InvestmentView,
    UpdateInvestmentInput,
};
pub use lead::{CreateLeadInput, LeadFilter, LeadRepository, LeadView, UpdateLeadInput};
pub use profile::{ProfileRepository, ProfileView, UpdateProfileInput};
pub use user::{CreateUserInput, UserRepository};

use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, PrimaryKeyTrait,
    QuerySelect, Select,
};
use uuid::Uuid;

use dealscope_shared::types::{PageRequest, PageResponse};

/// Runs `query` for one page and counts the full result set.
pub(crate) async fn paginate<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    page: &PageRequest,
) -> Result<PageResponse<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let page = page.clamped();
    let total = query.clone().count(db).await?;
    let data = query
        .offset(page.offset())
        .limit(page.limit())
        .all(db)
        .await?;
    Ok(PageResponse::new(data, page.page, page.per_page, total))
}

/// Fails with `InvalidReference` unless a row with primary key `id` exists.
pub(crate) async fn ensure_exists<E>(
    db: &DatabaseConnection,
    id: Uuid,
    entity: &'static str,
) -> RepoResult<()>
where
    E: EntityTrait,
    E::Model: Sync,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let found = E::find_by_id(id).count(db).await?;
    if found == 0 {
        return Err(RepositoryError::InvalidReference { entity, id });
    }
    Ok(())
}
