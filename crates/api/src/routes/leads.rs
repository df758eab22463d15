//! Lead routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use dealscope_db::repositories::{CreateLeadInput, LeadFilter, LeadRepository, UpdateLeadInput};
use dealscope_shared::types::PageRequest;

/// Creates the lead router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list_leads).post(create_lead))
        .route(
            "/leads/{id}",
            get(get_lead)
                .put(update_lead)
                .patch(update_lead)
                .delete(delete_lead),
        )
        .route("/leads/{id}/update_status", post(update_status))
}

/// Body of `POST /leads/{id}/update_status`.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    /// Target status name.
    pub status: String,
}

/// GET /leads
async fn list_leads(
    State(state): State<AppState>,
    Query(filter): Query<LeadFilter>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(LeadRepository::new(state.conn()).list(&filter, &page).await?))
}

/// POST /leads - Unassigned leads go to the caller.
async fn create_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateLeadInput>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = LeadRepository::new(state.conn())
        .create(input, auth.user_id())
        .await?;
    info!(user_id = %auth.user_id(), lead_id = %lead.id, company_id = %lead.company, "Lead created");
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /leads/{id}
async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(LeadRepository::new(state.conn()).find(id).await?))
}

/// PUT|PATCH /leads/{id}
async fn update_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateLeadInput>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = LeadRepository::new(state.conn()).update(id, input).await?;
    info!(user_id = %auth.user_id(), lead_id = %id, "Lead updated");
    Ok(Json(lead))
}

/// DELETE /leads/{id}
async fn delete_lead(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    LeadRepository::new(state.conn()).delete(id).await?;
    info!(user_id = %auth.user_id(), lead_id = %id, "Lead deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /leads/{id}/update_status - Move a lead along the pipeline.
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(change): Json<StatusChange>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = LeadRepository::new(state.conn())
        .update_status(id, &change.status)
        .await?;
    info!(user_id = %auth.user_id(), lead_id = %id, status = %change.status, "Lead status changed");
    Ok(Json(lead))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{create_router, routes::test_support};

    #[tokio::test]
    async fn test_create_rejects_match_score_above_100() {
        let state = test_support::state();
        let body = json!({ "company": uuid::Uuid::new_v4(), "ai_match_score": 120 });
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "POST", "/api/v1/leads", Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = test_support::json_body(response).await;
        assert!(body["details"]["ai_match_score"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_status_value_in_body_is_rejected() {
        let state = test_support::state();
        let body = json!({ "status": "archived" });
        let uri = format!("/api/v1/leads/{}", uuid::Uuid::new_v4());
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "PATCH", &uri, Some(&body)))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
