//! Session Gateway backed by the EcoGuard server.
//!
//! The session (token, expiry and user) is kept in local storage so a reload
//! can resume it; every state change is announced through the event hub the
//! navigation controller subscribes to.

use async_trait::async_trait;
use chrono::Utc;
use ecoguard_core::{
    AuthEvent, AuthEventHub, AuthHandler, AuthSubscription, GatewayError, ProfileAttributes,
    Session, SessionGateway, SessionUser,
};
use gloo_storage::{LocalStorage, Storage};

use crate::api::{ApiClient, ApiError, AuthApi, SessionResponse};

const SESSION_KEY: &str = "ecoguard_session";

/// Where the signed-in session survives reloads.
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<(), GatewayError>;
    fn clear(&self);
}

pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Option<Session> {
        LocalStorage::get(SESSION_KEY).ok()
    }

    fn save(&self, session: &Session) -> Result<(), GatewayError> {
        LocalStorage::set(SESSION_KEY, session).map_err(|e| GatewayError::Storage(e.to_string()))
    }

    fn clear(&self) {
        LocalStorage::delete(SESSION_KEY);
    }
}

pub struct HttpSessionGateway<A = ApiClient, S = LocalSessionStore> {
    api: A,
    store: S,
    hub: AuthEventHub,
}

impl<A: AuthApi, S: SessionStore> HttpSessionGateway<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            hub: AuthEventHub::new(),
        }
    }

    /// Stored session that has not expired yet. Expired ones are dropped.
    fn live_session(&self) -> Option<Session> {
        let session = self.store.load()?;
        if session.is_expired_at(Utc::now().timestamp()) {
            tracing::debug!("stored session expired");
            self.store.clear();
            return None;
        }
        Some(session)
    }

    fn open_session(&self, response: SessionResponse) -> Result<SessionUser, GatewayError> {
        let session = response.into_session(Utc::now().timestamp());
        self.store.save(&session)?;
        tracing::info!(user_id = %session.user.id, "signed in");
        self.hub.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session.user)
    }
}

#[async_trait(?Send)]
impl<A: AuthApi, S: SessionStore> SessionGateway for HttpSessionGateway<A, S> {
    async fn current_user(&self) -> Result<Option<SessionUser>, GatewayError> {
        let Some(session) = self.live_session() else {
            return Ok(None);
        };

        match self.api.get_user(&session.access_token).await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::Unauthorized) => {
                tracing::info!("stored session rejected by server");
                self.store.clear();
                self.hub.emit(AuthEvent::SignedOut, None);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, GatewayError> {
        let response = self.api.sign_in(email, password).await?;
        self.open_session(response)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: ProfileAttributes,
    ) -> Result<SessionUser, GatewayError> {
        let response = self.api.sign_up(email, password, &profile).await?;
        self.open_session(response)
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        if let Some(session) = self.store.load() {
            if let Err(e) = self.api.sign_out(&session.access_token).await {
                tracing::warn!("Server sign-out failed, clearing local session anyway: {}", e);
            }
        }
        self.store.clear();
        self.hub.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    async fn update_user(&self, profile: ProfileAttributes) -> Result<SessionUser, GatewayError> {
        let mut session = self.live_session().ok_or(GatewayError::Unauthorized)?;
        let user = self.api.update_user(&session.access_token, &profile).await?;

        session.user = user.clone();
        self.store.save(&session)?;
        self.hub.emit(AuthEvent::UserUpdated, Some(&session));
        Ok(user)
    }

    fn on_auth_state_change(&self, handler: AuthHandler) -> Box<dyn AuthSubscription> {
        Box::new(self.hub.subscribe(handler))
    }
}
