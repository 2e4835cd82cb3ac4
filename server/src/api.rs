use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ecoguard_core::{ProfileAttributes, SessionUser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    auth::{generate_token, AuthUser},
    error::AppError,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
        .route("/auth/user", get(current_user).put(update_user))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    accounts: usize,
    sessions: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        accounts: state.accounts.count().await,
        sessions: state.accounts.session_count().await,
    })
}

#[derive(Deserialize)]
struct SignUpRequest {
    email: String,
    password: String,
    #[serde(default)]
    profile: ProfileAttributes,
}

#[derive(Deserialize)]
struct SignInRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct SessionResponse {
    access_token: String,
    expires_in: u64,
    user: SessionUser,
}

async fn open_session(state: &AppState, user: SessionUser) -> Result<SessionResponse, AppError> {
    let grant = state.accounts.open_session().await;
    let access_token = generate_token(&state.config.auth, &user.id, &grant)?;

    Ok(SessionResponse {
        access_token,
        expires_in: grant.lifetime_secs(),
        user,
    })
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = state
        .accounts
        .sign_up(&req.email, &req.password, req.profile)
        .await
        .map_err(|e| {
            tracing::info!("Sign-up rejected: {}", e);
            e
        })?;

    Ok(Json(open_session(&state, user).await?))
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = state
        .accounts
        .verify(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!("Sign-in failed: {}", e);
            e
        })?;

    Ok(Json(open_session(&state, user).await?))
}

async fn sign_out(State(state): State<Arc<AppState>>, auth: AuthUser) -> StatusCode {
    state.accounts.revoke_session(&auth.claims.sid).await;
    tracing::info!("Session {} signed out", auth.claims.sid);
    StatusCode::NO_CONTENT
}

async fn current_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<SessionUser>, AppError> {
    Ok(Json(state.accounts.user(&auth.claims.sub).await?))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(profile): Json<ProfileAttributes>,
) -> Result<Json<SessionUser>, AppError> {
    let user = state.accounts.update_profile(&auth.claims.sub, profile).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{accounts::AccountStore, build_router, config::Config};
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config::default();
        let state = Arc::new(AppState {
            accounts: AccountStore::new(config.auth.session_duration_secs()),
            config,
        });
        build_router(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router, email: &str) -> (StatusCode, Value) {
        send(
            app,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({
                "email": email,
                "password": "secret1",
                "profile": { "full_name": "Ana" }
            })),
        )
        .await
    }

    fn token(body: &Value) -> String {
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_counts_accounts() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "accounts": 0, "sessions": 0 }));

        register(&app, "ana@example.com").await;
        let (_, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(body["accounts"], 1);
        assert_eq!(body["sessions"], 1);
    }

    #[tokio::test]
    async fn test_sign_up_opens_session() {
        let app = app();
        let (status, body) = register(&app, "Ana@Example.com").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert_eq!(body["user"]["profile"]["full_name"], "Ana");
        assert_eq!(body["expires_in"], 24 * 3600);

        let (status, user) =
            send(&app, Method::GET, "/api/auth/user", Some(&token(&body)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["id"], body["user"]["id"]);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_conflicts() {
        let app = app();
        register(&app, "ana@example.com").await;
        let (status, body) = register(&app, "ANA@example.com").await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_short_password_is_bad_request() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "email": "ana@example.com", "password": "123" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Six bytes, three characters.
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "email": "ana@example.com", "password": "äöü" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_sign_in() {
        let app = app();
        register(&app, "ana@example.com").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/signin",
            None,
            Some(json!({ "email": "ana@example.com", "password": "wrong-pass" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signin",
            None,
            Some(json!({ "email": "ana@example.com", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!token(&body).is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let app = app();
        let (_, body) = register(&app, "ana@example.com").await;
        let token = token(&body);

        let (status, _) = send(&app, Method::POST, "/api/auth/signout", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Session has been signed out");
    }

    #[tokio::test]
    async fn test_user_requires_token() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/auth/user", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            send(&app, Method::GET, "/api/auth/user", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_user_profile() {
        let app = app();
        let (_, body) = register(&app, "ana@example.com").await;
        let token = token(&body);

        let (status, user) = send(
            &app,
            Method::PUT,
            "/api/auth/user",
            Some(&token),
            Some(json!({ "full_name": "Ana Silva", "avatar_url": "https://img/ana.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["profile"]["full_name"], "Ana Silva");

        let (_, user) = send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;
        assert_eq!(user["profile"]["avatar_url"], "https://img/ana.png");
    }
}
