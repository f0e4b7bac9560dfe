//! Identity boundary: Bearer JWT → local user record.
//!
//! Every `/api/v1` handler takes an [`AuthUser`] extractor. A missing or
//! invalid token fails with 401 before the handler runs; a valid token whose
//! subject has no local `users` row fails with "User not found". Ownership
//! checks against the resolved user happen per call in the handlers.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// JWT claims issued by the identity provider.
/// `sub` is the external identity resolved against `users.external_id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller, resolved to a local user record.
#[derive(Debug)]
pub struct AuthUser {
    pub user: User,
}

/// Validates a bearer token and returns its claims.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!("JWT validation failed: {e}");
        AppError::Unauthorized
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        // Accept "Bearer <token>" or a raw token
        let token = header.strip_prefix("Bearer ").unwrap_or(header);

        let claims = decode_token(&state.config.jwt_secret, token)?;

        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE external_id = $1")
            .bind(&claims.sub)
            .fetch_optional(&state.db)
            .await?;

        match user {
            Some(user) => Ok(AuthUser { user }),
            None => {
                warn!("Authenticated subject {} has no local user record", claims.sub);
                Err(AppError::NotFound("User not found".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn mint(sub: &str, exp: usize) -> String {
        encode(
            &Header::default(),
            &Claims {
                sub: sub.to_string(),
                exp,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> usize {
        // Fixed timestamp well past any test run: 2200-01-01.
        7258118400
    }

    #[test]
    fn test_valid_token_round_trips_subject() {
        let token = mint("user-abc", far_future());
        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "user-abc");
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = mint("user-abc", far_future());
        let err = decode_token("other-secret", &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let token = mint("user-abc", 1_000_000); // 1970s — long expired
        let err = decode_token(SECRET, &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let err = decode_token(SECRET, "not-a-jwt").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
