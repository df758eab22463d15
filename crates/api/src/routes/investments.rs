//! Investment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use dealscope_db::repositories::{
    CreateInvestmentInput, InvestmentFilter, InvestmentRepository, UpdateInvestmentInput,
};
use dealscope_shared::types::PageRequest;

/// Creates the investment router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/investments", get(list_investments).post(create_investment))
        .route(
            "/investments/{id}",
            get(get_investment)
                .put(update_investment)
                .patch(update_investment)
                .delete(delete_investment),
        )
}

async fn list_investments(
    State(state): State<AppState>,
    Query(filter): Query<InvestmentFilter>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(InvestmentRepository::new(state.conn()).list(&filter, &page).await?))
}

async fn create_investment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateInvestmentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let investment = InvestmentRepository::new(state.conn())
        .create(input, auth.user_id())
        .await?;
    info!(
        user_id = %auth.user_id(),
        investment_id = %investment.id,
        amount = %investment.amount,
        "Investment recorded"
    );
    Ok((StatusCode::CREATED, Json(investment)))
}

async fn get_investment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(InvestmentRepository::new(state.conn()).find(id).await?))
}

async fn update_investment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateInvestmentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let investment = InvestmentRepository::new(state.conn()).update(id, input).await?;
    info!(user_id = %auth.user_id(), investment_id = %id, "Investment updated");
    Ok(Json(investment))
}

async fn delete_investment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    InvestmentRepository::new(state.conn()).delete(id).await?;
    info!(user_id = %auth.user_id(), investment_id = %id, "Investment deleted");
    Ok(StatusCode::NO_CONTENT)
}
