//! Contract with the authentication/session backend.
//!
//! The navigation controller only needs `current_user` and
//! `on_auth_state_change`; the rest of the trait is what the login,
//! register, settings and edit-profile screens call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::error::GatewayError;

/// Sign-in state change pushed by the gateway.
///
/// No catch-all variant: consumers match exhaustively, so a new kind is a
/// compile error at every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

impl AuthEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
            Self::PasswordRecovery => "PASSWORD_RECOVERY",
        }
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileAttributes {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub profile: ProfileAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    /// Unix timestamp, seconds.
    pub expires_at: i64,
    pub user: SessionUser,
}

impl Session {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

pub type AuthHandler = Rc<dyn Fn(AuthEvent, Option<&Session>)>;

/// Handle returned by `on_auth_state_change`.
pub trait AuthSubscription {
    /// Stops delivery to the handler. A second call reports
    /// `GatewayError::SubscriptionReleased`.
    fn unsubscribe(&mut self) -> Result<(), GatewayError>;
}

#[async_trait(?Send)]
pub trait SessionGateway {
    /// The signed-in user, or `None` when there is no live session.
    async fn current_user(&self) -> Result<Option<SessionUser>, GatewayError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, GatewayError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: ProfileAttributes,
    ) -> Result<SessionUser, GatewayError>;

    async fn sign_out(&self) -> Result<(), GatewayError>;

    async fn update_user(&self, profile: ProfileAttributes) -> Result<SessionUser, GatewayError>;

    fn on_auth_state_change(&self, handler: AuthHandler) -> Box<dyn AuthSubscription>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_names() {
        let json = serde_json::to_string(&AuthEvent::UserUpdated).unwrap();
        assert_eq!(json, "\"USER_UPDATED\"");
        assert_eq!(AuthEvent::SignedOut.to_string(), "SIGNED_OUT");
        assert!(serde_json::from_str::<AuthEvent>("\"MFA_CHALLENGE_VERIFIED\"").is_err());
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            access_token: "t".to_string(),
            expires_at: 100,
            user: SessionUser {
                id: "u1".to_string(),
                email: "a@b.c".to_string(),
                profile: ProfileAttributes::default(),
            },
        };
        assert!(!session.is_expired_at(99));
        assert!(session.is_expired_at(100));
    }
}
