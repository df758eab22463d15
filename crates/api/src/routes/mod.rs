//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod analyses;
pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod health;
pub mod investments;
pub mod leads;
pub mod profiles;

/// Creates the API router; everything except health and token issuing
/// sits behind the bearer-token middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(companies::routes())
        .merge(analyses::routes())
        .merge(leads::routes())
        .merge(investments::routes())
        .merge(profiles::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, response::Response};
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use serde_json::Value;
    use uuid::Uuid;

    use crate::AppState;
    use dealscope_shared::{JwtConfig, JwtService};

    /// State whose database is never reachable, for tests that stop before a query.
    pub fn state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            jwt_service: Arc::new(JwtService::new(JwtConfig {
                secret: "test-secret-key-for-testing-only".to_string(),
                access_token_expires_secs: 900,
            })),
        }
    }

    /// `Authorization` header value for a fresh analyst.
    pub fn bearer(state: &AppState) -> String {
        let token = state
            .jwt_service
            .generate_access_token(Uuid::new_v4(), "analyst", "analyst")
            .unwrap();
        format!("Bearer {token}")
    }

    /// Authenticated request with an optional JSON body.
    pub fn request(state: &AppState, method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", bearer(state));
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::{Request, StatusCode}};
    use rstest::rstest;
    use tower::ServiceExt;

    use super::test_support;
    use crate::create_router;

    #[rstest]
    #[case("/api/v1/companies")]
    #[case("/api/v1/analyses/market")]
    #[case("/api/v1/leads")]
    #[case("/api/v1/investments")]
    #[case("/api/v1/profiles/me")]
    #[case("/api/v1/dashboard/stats")]
    #[tokio::test]
    async fn test_protected_routes_require_token(#[case] uri: &str) {
        let app = create_router(test_support::state());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = test_support::json_body(response).await;
        assert_eq!(body["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let app = create_router(test_support::state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/leads")
                    .header("authorization", "Bearer not.a.jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = test_support::json_body(response).await;
        assert_eq!(body["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_invalid() {
        let other = dealscope_shared::JwtService::new(dealscope_shared::JwtConfig {
            secret: "a-different-secret".to_string(),
            access_token_expires_secs: 900,
        });
        let token = other
            .generate_access_token(uuid::Uuid::new_v4(), "mallory", "admin")
            .unwrap();

        let app = create_router(test_support::state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard/stats")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_request_needs_password() {
        let app = create_router(test_support::state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/token")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"username": "jdoe"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_expired_token_is_reported() {
        let expired = dealscope_shared::JwtService::new(dealscope_shared::JwtConfig {
            secret: "test-secret-key-for-testing-only".to_string(),
            access_token_expires_secs: -3600,
        });
        let token = expired
            .generate_access_token(uuid::Uuid::new_v4(), "analyst", "analyst")
            .unwrap();

        let app = create_router(test_support::state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/profiles")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = test_support::json_body(response).await;
        assert_eq!(body["error"], "token_expired");
    }
}
