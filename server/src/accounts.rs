use std::collections::HashMap;

use ecoguard_core::validation::normalize_email;
use ecoguard_core::{check_credentials, CredentialError, ProfileAttributes, SessionUser};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};

#[derive(Debug, Error, PartialEq)]
pub enum AccountError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("Account not found")]
    NotFound,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

struct Account {
    user: SessionUser,
    password_hash: String,
}

#[derive(Default)]
struct Inner {
    /// Keyed by user id.
    accounts: HashMap<String, Account>,
    /// Normalized email to user id.
    emails: HashMap<String, String>,
    /// Session id to expiry, unix seconds.
    sessions: HashMap<Uuid, i64>,
}

/// A freshly opened session; the token minted for it carries the same times.
#[derive(Debug, Clone, Copy)]
pub struct SessionGrant {
    pub sid: Uuid,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl SessionGrant {
    pub fn lifetime_secs(&self) -> u64 {
        (self.expires_at - self.issued_at).max(0) as u64
    }
}

/// In-memory account and session registry. Everything is lost on restart.
pub struct AccountStore {
    session_ttl_secs: i64,
    inner: RwLock<Inner>,
}

fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl AccountStore {
    pub fn new(session_ttl_secs: u64) -> Self {
        Self {
            session_ttl_secs: session_ttl_secs as i64,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: ProfileAttributes,
    ) -> Result<SessionUser, AccountError> {
        let email = normalize_email(email);
        check_credentials(&email, password)?;

        let password_hash =
            hash_password(password).map_err(|e| AccountError::Hashing(e.to_string()))?;

        let mut inner = self.inner.write().await;
        if inner.emails.contains_key(&email) {
            return Err(AccountError::EmailTaken);
        }

        let user = SessionUser {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            profile,
        };
        inner.emails.insert(email, user.id.clone());
        inner.accounts.insert(
            user.id.clone(),
            Account {
                user: user.clone(),
                password_hash,
            },
        );

        tracing::info!("Registered account {}", user.id);
        Ok(user)
    }

    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn verify(&self, email: &str, password: &str) -> Result<SessionUser, AccountError> {
        let email = normalize_email(email);
        let inner = self.inner.read().await;
        let account = inner
            .emails
            .get(&email)
            .and_then(|id| inner.accounts.get(id))
            .ok_or(AccountError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)
            .map_err(|_| AccountError::InvalidCredentials)?;

        Ok(account.user.clone())
    }

    pub async fn open_session(&self) -> SessionGrant {
        self.open_session_at(now_unix()).await
    }

    /// Opening a session also drops every session that expired by `now`.
    async fn open_session_at(&self, now: i64) -> SessionGrant {
        let mut inner = self.inner.write().await;

        let before = inner.sessions.len();
        inner.sessions.retain(|_, expires_at| *expires_at > now);
        let pruned = before - inner.sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "dropped expired sessions");
        }

        let grant = SessionGrant {
            sid: Uuid::new_v4(),
            issued_at: now,
            expires_at: now + self.session_ttl_secs,
        };
        inner.sessions.insert(grant.sid, grant.expires_at);
        grant
    }

    /// Returns whether the session was still held.
    pub async fn revoke_session(&self, sid: &Uuid) -> bool {
        self.inner.write().await.sessions.remove(sid).is_some()
    }

    pub async fn is_session_active(&self, sid: &Uuid) -> bool {
        self.is_session_active_at(sid, now_unix()).await
    }

    async fn is_session_active_at(&self, sid: &Uuid, now: i64) -> bool {
        matches!(self.inner.read().await.sessions.get(sid), Some(expires_at) if *expires_at > now)
    }

    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn user(&self, user_id: &str) -> Result<SessionUser, AccountError> {
        self.inner
            .read()
            .await
            .accounts
            .get(user_id)
            .map(|account| account.user.clone())
            .ok_or(AccountError::NotFound)
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        profile: ProfileAttributes,
    ) -> Result<SessionUser, AccountError> {
        let mut inner = self.inner.write().await;
        let account = inner.accounts.get_mut(user_id).ok_or(AccountError::NotFound)?;
        account.user.profile = profile;
        Ok(account.user.clone())
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.accounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> ProfileAttributes {
        ProfileAttributes {
            full_name: name.to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_sign_up_normalizes_email() {
        let store = AccountStore::new(3600);
        let user = store
            .sign_up("  Ana@Example.COM ", "secret1", profile("Ana"))
            .await
            .unwrap();

        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.profile.full_name, "Ana");
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = AccountStore::new(3600);
        store.sign_up("ana@example.com", "secret1", profile("Ana")).await.unwrap();

        let err = store
            .sign_up("ANA@example.com", "another1", profile("Other"))
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::EmailTaken);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let store = AccountStore::new(3600);
        assert_eq!(
            store.sign_up("not-an-email", "secret1", profile("A")).await.unwrap_err(),
            AccountError::Credentials(CredentialError::InvalidEmail)
        );
        assert_eq!(
            store.sign_up("a@.b.c", "secret1", profile("A")).await.unwrap_err(),
            AccountError::Credentials(CredentialError::InvalidEmail)
        );
        assert_eq!(
            store.sign_up("a@b.co", "12345", profile("A")).await.unwrap_err(),
            AccountError::Credentials(CredentialError::PasswordTooShort)
        );
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_multibyte_password_length() {
        let store = AccountStore::new(3600);
        assert_eq!(
            store.sign_up("a@b.co", "äöü", profile("A")).await.unwrap_err(),
            AccountError::Credentials(CredentialError::PasswordTooShort)
        );
        assert!(store.sign_up("a@b.co", "äöüäöü", profile("A")).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let store = AccountStore::new(3600);
        let user = store.sign_up("ana@example.com", "secret1", profile("Ana")).await.unwrap();

        assert_eq!(store.verify("Ana@Example.com", "secret1").await.unwrap(), user);
        assert_eq!(
            store.verify("ana@example.com", "wrong-pass").await.unwrap_err(),
            AccountError::InvalidCredentials
        );
        assert_eq!(
            store.verify("nobody@example.com", "secret1").await.unwrap_err(),
            AccountError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_session_revocation() {
        let store = AccountStore::new(3600);
        let grant = store.open_session().await;

        assert_eq!(grant.lifetime_secs(), 3600);
        assert!(store.is_session_active(&grant.sid).await);
        assert!(store.revoke_session(&grant.sid).await);
        assert!(!store.is_session_active(&grant.sid).await);
        assert!(!store.revoke_session(&grant.sid).await);
    }

    #[tokio::test]
    async fn test_expired_sessions_pruned_on_open() {
        let store = AccountStore::new(60);
        let first = store.open_session_at(1_000).await;
        let second = store.open_session_at(1_030).await;

        assert!(store.is_session_active_at(&first.sid, 1_059).await);
        assert!(!store.is_session_active_at(&first.sid, 1_060).await);

        let third = store.open_session_at(1_070).await;
        assert_eq!(store.session_count().await, 2);
        assert!(!store.revoke_session(&first.sid).await);
        assert!(store.is_session_active_at(&second.sid, 1_070).await);
        assert!(store.is_session_active_at(&third.sid, 1_070).await);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let store = AccountStore::new(3600);
        let user = store.sign_up("ana@example.com", "secret1", profile("Ana")).await.unwrap();

        let updated = store.update_profile(&user.id, profile("Ana Silva")).await.unwrap();
        assert_eq!(updated.profile.full_name, "Ana Silva");
        assert_eq!(store.user(&user.id).await.unwrap().profile.full_name, "Ana Silva");
        assert_eq!(
            store.update_profile("missing", profile("X")).await.unwrap_err(),
            AccountError::NotFound
        );
    }
}
