//! Company routes: CRUD, advanced search, tags and the full-analysis view.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    extractors::{ValidatedJson, ValidatedQuery},
    middleware::AuthUser,
};
use dealscope_db::repositories::{
    CompanyFilter, CompanyRepository, CompanySearch, CreateCompanyInput, UpdateCompanyInput,
};
use dealscope_shared::types::PageRequest;

/// Creates the company router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/search", get(search_companies))
        .route(
            "/companies/{id}",
            get(get_company)
                .put(update_company)
                .patch(update_company)
                .delete(delete_company),
        )
        .route("/companies/{id}/full_analysis", get(full_analysis))
        .route("/companies/{id}/tags", get(list_tags).post(add_tag))
        .route("/companies/{id}/tags/{tag_id}", delete(delete_tag))
}

/// Body of `POST /companies/{id}/tags`.
#[derive(Debug, Deserialize, Validate)]
pub struct TagInput {
    /// Tag label.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// GET /companies - List active companies.
async fn list_companies(
    State(state): State<AppState>,
    Query(filter): Query<CompanyFilter>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CompanyRepository::new(state.conn());
    Ok(Json(repo.list(&filter, &page).await?))
}

/// GET /companies/search - Text, industry, stage and score-window search.
async fn search_companies(
    State(state): State<AppState>,
    ValidatedQuery(search): ValidatedQuery<CompanySearch>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CompanyRepository::new(state.conn());
    Ok(Json(repo.search(&search, &page).await?))
}

/// POST /companies - Create a company.
async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateCompanyInput>,
) -> Result<impl IntoResponse, ApiError> {
    let company = CompanyRepository::new(state.conn()).create(input).await?;
    info!(user_id = %auth.user_id(), company_id = %company.company.id, "Company created");
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /companies/{id}
async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(CompanyRepository::new(state.conn()).find(id).await?))
}

/// PUT|PATCH /companies/{id} - Partial update.
async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateCompanyInput>,
) -> Result<impl IntoResponse, ApiError> {
    let company = CompanyRepository::new(state.conn()).update(id, input).await?;
    info!(user_id = %auth.user_id(), company_id = %id, "Company updated");
    Ok(Json(company))
}

/// DELETE /companies/{id} - Delete a company with everything attached to it.
async fn delete_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    CompanyRepository::new(state.conn()).delete(id).await?;
    info!(user_id = %auth.user_id(), company_id = %id, "Company deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /companies/{id}/full_analysis
async fn full_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(CompanyRepository::new(state.conn()).full_analysis(id).await?))
}

/// GET /companies/{id}/tags
async fn list_tags(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(CompanyRepository::new(state.conn()).list_tags(id).await?))
}

/// POST /companies/{id}/tags
async fn add_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<TagInput>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = CompanyRepository::new(state.conn())
        .add_tag(id, &input.name)
        .await?;
    info!(user_id = %auth.user_id(), company_id = %id, tag = %tag.name, "Tag added");
    Ok((StatusCode::CREATED, Json(tag)))
}

/// DELETE /companies/{id}/tags/{tag_id}
async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, tag_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    CompanyRepository::new(state.conn())
        .delete_tag(id, tag_id)
        .await?;
    info!(user_id = %auth.user_id(), company_id = %id, tag_id = %tag_id, "Tag removed");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{create_router, routes::test_support};

    #[tokio::test]
    async fn test_create_rejects_out_of_range_score() {
        let state = test_support::state();
        let body = json!({
            "name": "Acme",
            "industry": "Fintech",
            "stage": "seed",
            "founded_year": 2020,
            "ai_score": 140
        });
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "POST", "/api/v1/companies", Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = test_support::json_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["details"]["ai_score"].is_array());
    }

    #[tokio::test]
    async fn test_update_rejects_negative_funding() {
        let state = test_support::state();
        let uri = format!("/api/v1/companies/{}", uuid::Uuid::new_v4());
        let body = json!({ "funding_raised": "-5.00" });
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "PATCH", &uri, Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = test_support::json_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["details"]["funding_raised"].is_array());
    }

    #[tokio::test]
    async fn test_search_rejects_inverted_window() {
        let state = test_support::state();
        let response = create_router(state.clone())
            .oneshot(test_support::request(
                &state,
                "GET",
                "/api/v1/companies/search?min_score=90&max_score=10",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_tag_is_rejected() {
        let state = test_support::state();
        let uri = format!("/api/v1/companies/{}/tags", uuid::Uuid::new_v4());
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "POST", &uri, Some(&json!({ "name": "" }))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_path_id_is_rejected() {
        let state = test_support::state();
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "GET", "/api/v1/companies/not-a-uuid", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
