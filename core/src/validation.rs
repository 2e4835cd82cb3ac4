//! Credential rules shared by the registration form and the account store.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

// Dot-separated domain with no empty labels.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern compiles")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
}

/// Trimmed and lowercased; the form accounts are keyed by.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Length in characters, not bytes.
pub fn password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn check_credentials(email: &str, password: &str) -> Result<(), CredentialError> {
    if !is_valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }
    if !password_long_enough(password) {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}
