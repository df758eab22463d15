//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Username at issue time.
    pub username: String,
    /// User's profile role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, username: &str, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Token request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    /// Username.
    pub username: String,
    /// User password.
    pub password: String,
}

/// Token response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Creates a bearer token response.
    #[must_use]
    pub fn bearer(token: String, expires_in: i64) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_fields() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new(user_id, "jdoe", "analyst", expires_at);

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "jdoe");
        assert_eq!(claims.role, "analyst");
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_token_request_deserializes() {
        let request: TokenRequest =
            serde_json::from_str(r#"{"username":"jdoe","password":"pw"}"#).unwrap();
        assert_eq!(request.username, "jdoe");
        assert_eq!(request.password, "pw");
    }

    #[test]
    fn test_bearer_response_shape() {
        let response = TokenResponse::bearer("abc".to_string(), 3600);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["token"], "abc");
        assert_eq!(value["token_type"], "Bearer");
        assert_eq!(value["expires_in"], 3600);
    }
}
