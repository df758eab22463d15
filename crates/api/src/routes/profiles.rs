//! Profile routes. Users only ever see their own profile.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};
use dealscope_db::repositories::{ProfileRepository, UpdateProfileInput};

/// Creates the profile router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles/me", get(my_profile).put(update_my_profile))
        .route("/profiles/{id}", get(get_profile).put(update_profile))
}

/// GET /profiles - The caller's profile as a one-element list.
async fn list_profiles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let profiles = ProfileRepository::new(state.conn())
        .list_for_user(auth.user_id())
        .await?;
    Ok(Json(profiles))
}

/// GET /profiles/me - Creates an analyst profile on first access.
async fn my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let profile = ProfileRepository::new(state.conn())
        .get_or_create(auth.user_id())
        .await?;
    Ok(Json(profile))
}

/// PUT /profiles/me
async fn update_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = ProfileRepository::new(state.conn())
        .update_me(auth.user_id(), input)
        .await?;
    info!(user_id = %auth.user_id(), profile_id = %profile.id, "Profile updated");
    Ok(Json(profile))
}

/// GET /profiles/{id}
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = ProfileRepository::new(state.conn())
        .find_for_user(id, auth.user_id())
        .await?;
    Ok(Json(profile))
}

/// PUT /profiles/{id}
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = ProfileRepository::new(state.conn())
        .update_for_user(id, auth.user_id(), input)
        .await?;
    info!(user_id = %auth.user_id(), profile_id = %id, "Profile updated");
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{create_router, routes::test_support};

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let state = test_support::state();
        let body = json!({ "role": "intern" });
        let response = create_router(state.clone())
            .oneshot(test_support::request(&state, "PUT", "/api/v1/profiles/me", Some(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
