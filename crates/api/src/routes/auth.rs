//! Token issuing for username/password credentials.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use dealscope_core::auth::verify_password;
use dealscope_db::{ProfileRepository, UserRepository};
use dealscope_shared::auth::{TokenRequest, TokenResponse};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/token", post(issue_token))
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid username or password"
        })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred while issuing the token"
        })),
    )
        .into_response()
}

/// POST /auth/token - Exchange credentials for a bearer token.
async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Response {
    let user_repo = UserRepository::new(state.conn());

    let user = match user_repo.find_by_username(&payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %payload.username, "Token request for unknown user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during token request");
            return internal_error();
        }
    };

    if !user.is_active {
        info!(user_id = %user.id, "Token request for inactive user");
        return invalid_credentials();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Token request with wrong password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let profile = match ProfileRepository::new(state.conn()).get_or_create(user.id).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to load profile during token request");
            return internal_error();
        }
    };

    let token = match state
        .jwt_service
        .generate_access_token(user.id, &user.username, profile.role.as_str())
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, role = profile.role.as_str(), "Issued access token");

    Json(TokenResponse::bearer(
        token,
        state.jwt_service.access_token_expires_in(),
    ))
    .into_response()
}
