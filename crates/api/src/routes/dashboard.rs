//! Dashboard routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::Utc;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use dealscope_db::DashboardRepository;

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(stats))
        .route("/dashboard/recent_analyses", get(recent_analyses))
        .route("/dashboard/upcoming_tasks", get(upcoming_tasks))
}

/// GET /dashboard/stats - Headline numbers, computed per request.
async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = DashboardRepository::new(state.conn()).stats(Utc::now()).await?;
    Ok(Json(stats))
}

/// GET /dashboard/recent_analyses - Newest analyses across every kind.
async fn recent_analyses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let recent = DashboardRepository::new(state.conn()).recent_analyses().await?;
    Ok(Json(recent))
}

/// GET /dashboard/upcoming_tasks - Follow-ups for the caller's new and contacted leads.
async fn upcoming_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = DashboardRepository::new(state.conn())
        .upcoming_tasks(auth.user_id(), Utc::now())
        .await?;
    Ok(Json(tasks))
}
