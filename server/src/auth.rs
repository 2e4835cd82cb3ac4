use anyhow::Result;
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{accounts::SessionGrant, config::AuthConfig, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User id
    pub sid: Uuid,   // Session id, revocable
    pub exp: i64,
    pub iat: i64,
}

/// A request carrying a valid token for a session that has not been revoked.
pub struct AuthUser {
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthError::MissingToken)?;

        let claims = decode_token(&state.config.auth, bearer.token())?;

        if !state.accounts.is_session_active(&claims.sid).await {
            return Err(AuthError::SessionRevoked);
        }

        Ok(AuthUser { claims })
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Malformed password hash: {}", e))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| anyhow::anyhow!("Invalid password"))
}

/// Mints a token whose lifetime is exactly the session's.
pub fn generate_token(config: &AuthConfig, user_id: &str, grant: &SessionGrant) -> Result<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        sid: grant.sid,
        exp: grant.expires_at,
        iat: grant.issued_at,
    };

    encode_claims(config, &claims)
}

fn encode_claims(config: &AuthConfig, claims: &Claims) -> Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(config: &AuthConfig, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        AuthError::InvalidToken
    })
}

#[derive(Debug, PartialEq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    SessionRevoked,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error_message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidToken => "Invalid authorization token",
            AuthError::SessionRevoked => "Session has been signed out",
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            session_duration_hours: 1,
        }
    }

    fn grant(lifetime_secs: i64) -> SessionGrant {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        SessionGrant {
            sid: Uuid::new_v4(),
            issued_at: now,
            expires_at: now + lifetime_secs,
        }
    }

    #[test]
    fn test_token_carries_user_and_session() {
        let config = config("test-secret");
        let grant = grant(3600);
        let token = generate_token(&config, "user-1", &grant).unwrap();

        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.sid, grant.sid);
        assert_eq!(claims.exp, grant.expires_at);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = generate_token(&config("one"), "user-1", &grant(3600)).unwrap();
        assert_eq!(
            decode_token(&config("two"), &token).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = config("test-secret");
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            sid: Uuid::new_v4(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_claims(&config, &claims).unwrap();

        assert_eq!(decode_token(&config, &token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).is_ok());
        assert!(verify_password("secret2", &hash).is_err());
    }
}
