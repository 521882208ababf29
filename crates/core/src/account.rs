//! Registration and login input normalization.
//!
//! Emails are trimmed and lowercased here so the `users.email` unique
//! constraint behaves case-insensitively.

use serde::Deserialize;

use crate::error::CoreError;

/// Minimum number of characters accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Body for `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body for `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// A registration that passed [`normalize_registration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login credentials with a canonical email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn normalize_registration(input: RegisterInput) -> Result<Registration, CoreError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("name is required".into()));
    }

    let email = normalize_email(&input.email);
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::Validation("valid email is required".into()));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)?;

    Ok(Registration {
        name,
        email,
        password: input.password,
    })
}

pub fn normalize_login(input: LoginInput) -> Result<Credentials, CoreError> {
    let email = normalize_email(&input.email);
    if email.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation(
            "email and password are required".into(),
        ));
    }

    Ok(Credentials {
        email,
        password: input.password,
    })
}

/// Reject passwords shorter than `min_length` characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "password must have at least {min_length} characters"
        )));
    }
    Ok(())
}
