//! Analysis routes, one identical set per analysis kind.
//!
//! Each kind gets `/analyses/{slug}` and `/analyses/{slug}/{id}`; the
//! repository type decides the request and response bodies.

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
    AnalysisFilter, AnalysisRepository, CompetitiveRepository, HighLevelRepository,
    KeyIndividualsRepository, MarketRepository, PerceptionRepository,
    analysis::AnalysisTable,
};
use dealscope_shared::types::PageRequest;

/// Creates the analysis router for all five kinds.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(kind_routes::<HighLevelRepository>())
        .merge(kind_routes::<PerceptionRepository>())
        .merge(kind_routes::<MarketRepository>())
        .merge(kind_routes::<KeyIndividualsRepository>())
        .merge(kind_routes::<CompetitiveRepository>())
}

fn kind_routes<R>() -> Router<AppState>
where
    R: AnalysisRepository + 'static,
{
    let collection = format!("/analyses/{}", <R::Entity as AnalysisTable>::KIND.slug());
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(&collection, get(list_analyses::<R>).post(create_analysis::<R>))
        .route(
            &item,
            get(get_analysis::<R>)
                .put(update_analysis::<R>)
                .patch(update_analysis::<R>)
                .delete(delete_analysis::<R>),
        )
}

fn kind_name<R: AnalysisRepository>() -> &'static str {
    <R::Entity as AnalysisTable>::KIND.type_name()
}

async fn list_analyses<R: AnalysisRepository>(
    State(state): State<AppState>,
    Query(filter): Query<AnalysisFilter>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(R::new(state.conn()).list(&filter, &page).await?))
}

async fn create_analysis<R: AnalysisRepository>(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<R::Create>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = R::new(state.conn()).create(input, auth.user_id()).await?;
    info!(user_id = %auth.user_id(), kind = kind_name::<R>(), "Analysis created");
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn get_analysis<R: AnalysisRepository>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(R::new(state.conn()).find(id).await?))
}

async fn update_analysis<R: AnalysisRepository>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<R::Update>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = R::new(state.conn()).update(id, input).await?;
    info!(user_id = %auth.user_id(), kind = kind_name::<R>(), analysis_id = %id, "Analysis updated");
    Ok(Json(detail))
}

async fn delete_analysis<R: AnalysisRepository>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    R::new(state.conn()).delete(id).await?;
    info!(user_id = %auth.user_id(), kind = kind_name::<R>(), analysis_id = %id, "Analysis deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{create_router, routes::test_support};

    #[rstest]
    #[case("high-level")]
    #[case("perception")]
    #[case("market")]
    #[case("key-individuals")]
    #[case("competitive")]
    #[tokio::test]
    async fn test_every_kind_validates_scores(#[case] slug: &str) {
        let state = test_support::state();
        let body = json!({
            "company": uuid::Uuid::new_v4(),
            "title": "Q3 review",
            "overall_score": 101
        });
        let uri = format!("/api/v1/analyses/{slug}");
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "POST", &uri, Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = test_support::json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_nested_item_is_validated() {
        let state = test_support::state();
        let body = json!({
            "company": uuid::Uuid::new_v4(),
            "title": "Channels",
            "sales_channels": [{ "platform_name": "Retail", "rating": 9 }]
        });
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "POST", "/api/v1/analyses/market", Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_404() {
        let state = test_support::state();
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "GET", "/api/v1/analyses/metrics", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
