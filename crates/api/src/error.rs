//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": <code>, "message": <text>}`;
//! validation failures add a `details` object keyed by field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::{Value, json};
use tracing::error;
use validator::ValidationErrors;

use dealscope_db::RepositoryError;
use dealscope_shared::AppError;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    details: Option<Value>,
}

impl ApiError {
    /// Status code of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.inner.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self { inner, details: None }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        AppError::from(err).into()
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string()).into()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            inner: AppError::Validation("Request validation failed".to_string()),
            details: serde_json::to_value(&errors).ok(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.inner.is_internal() {
            error!(error = %self.inner, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            message_of(&self.inner)
        };

        let mut body = json!({
            "error": self.inner.error_code(),
            "message": message,
        });
        if let (Some(details), Some(map)) = (self.details, body.as_object_mut()) {
            map.insert("details".to_string(), details);
        }

        (status, Json(body)).into_response()
    }
}

/// The payload of an `AppError` without its display prefix.
fn message_of(err: &AppError) -> String {
    match err {
        AppError::Unauthorized(m)
        | AppError::Forbidden(m)
        | AppError::NotFound(m)
        | AppError::Validation(m)
        | AppError::Conflict(m)
        | AppError::Database(m)
        | AppError::Internal(m) => m.clone(),
    }
}
