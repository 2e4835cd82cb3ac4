use async_trait::async_trait;
use ecoguard_core::{GatewayError, ProfileAttributes, Session, SessionUser};
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("Server error: {0}")]
    Server(String),
}

impl From<ApiError> for GatewayError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => GatewayError::Network(msg),
            ApiError::Unauthorized => GatewayError::Unauthorized,
            ApiError::Rejected(msg) => GatewayError::Rejected(msg),
            ApiError::Server(msg) => GatewayError::Server(msg),
        }
    }
}

#[derive(Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub profile: &'a ProfileAttributes,
}

#[derive(Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub user: SessionUser,
}

impl SessionResponse {
    pub fn into_session(self, now: i64) -> Session {
        Session {
            access_token: self.access_token,
            expires_at: now + self.expires_in as i64,
            user: self.user,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Maps a non-success status to an error. `message` is the server's
/// `{"error": ..}` text when it sent one.
pub fn status_error(status: u16, message: Option<String>) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        400 | 409 | 422 => {
            ApiError::Rejected(message.unwrap_or_else(|| format!("Status: {}", status)))
        }
        _ => ApiError::Server(format!("Status: {}", status)),
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(status_error(status, message))
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// The auth endpoints the session gateway relies on.
#[async_trait(?Send)]
pub trait AuthApi {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileAttributes,
    ) -> Result<SessionResponse, ApiError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionResponse, ApiError>;

    async fn sign_out(&self, token: &str) -> Result<(), ApiError>;

    async fn get_user(&self, token: &str) -> Result<SessionUser, ApiError>;

    async fn update_user(
        &self,
        token: &str,
        profile: &ProfileAttributes,
    ) -> Result<SessionUser, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        // Served by the same origin as the client bundle
        Self {
            base_url: "/api".to_string(),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileAttributes,
    ) -> Result<SessionResponse, ApiError> {
        let response = Request::post(&format!("{}/auth/signup", self.base_url))
            .json(&SignUpRequest { email, password, profile })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response)
            .await?
            .json::<SessionResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionResponse, ApiError> {
        let response = Request::post(&format!("{}/auth/signin", self.base_url))
            .json(&SignInRequest { email, password })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response)
            .await?
            .json::<SessionResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn sign_out(&self, token: &str) -> Result<(), ApiError> {
        let response = Request::post(&format!("{}/auth/signout", self.base_url))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response).await.map(|_| ())
    }

    async fn get_user(&self, token: &str) -> Result<SessionUser, ApiError> {
        let response = Request::get(&format!("{}/auth/user", self.base_url))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response)
            .await?
            .json::<SessionUser>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn update_user(
        &self,
        token: &str,
        profile: &ProfileAttributes,
    ) -> Result<SessionUser, ApiError> {
        let response = Request::put(&format!("{}/auth/user", self.base_url))
            .header("Authorization", &bearer(token))
            .json(profile)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response)
            .await?
            .json::<SessionUser>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(status_error(401, None), ApiError::Unauthorized);
        assert_eq!(
            status_error(409, Some("Email already registered".to_string())),
            ApiError::Rejected("Email already registered".to_string())
        );
        assert_eq!(
            status_error(400, None),
            ApiError::Rejected("Status: 400".to_string())
        );
        assert_eq!(status_error(503, None), ApiError::Server("Status: 503".to_string()));
    }

    #[test]
    fn test_session_expiry_from_response() {
        let response: SessionResponse = serde_json::from_str(
            r#"{"access_token":"t","expires_in":3600,"user":{"id":"u1","email":"a@b.co"}}"#,
        )
        .unwrap();
        let session = response.into_session(1_000);
        assert_eq!(session.expires_at, 4_600);
        assert_eq!(session.user.profile, ProfileAttributes::default());
        assert_eq!(GatewayError::from(ApiError::Unauthorized), GatewayError::Unauthorized);
    }
}
