//! # Credential store
//!
//! Registration and sign-in against a [`UserStore`].
//!
//! - [`Credentials::register`] validates a [`Registration`], rejects an email
//!   that is already taken (case-insensitive), hashes the password with Argon2id
//!   and stores the account.
//! - [`Credentials::verify`] looks the account up by normalised email and checks
//!   the password. An unknown email still runs a full Argon2 verification against
//!   a fixed hash, so both failure modes cost the same time and report the same
//!   [`Error::InvalidCredentials`].
//!
//! Hashing is CPU-bound and runs on the blocking pool.

use std::sync::Arc;
use std::time::Duration;

use argon2::Params;
use chrono::Utc;
use store::{StoreError, UserRecord, UserStore};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::error::{bounded, Error, FieldError, Result};
use crate::models::UserInfo;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Well-formed Argon2id hash that no password produces in practice; verified
/// against when the email is unknown.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// A sign-up request as submitted.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// Trim name and email, lower-case the email, and collect every field problem.
    fn validate(self) -> Result<Registration> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(FieldError::new("name", "El nombre es obligatorio"));
        }
        if email.is_empty() {
            errors.push(FieldError::new("email", "El correo electrónico es obligatorio"));
        } else if !email.contains('@') {
            errors.push(FieldError::new("email", "El correo electrónico no es válido"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "La contraseña es obligatoria"));
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres"),
            ));
        }
        if self.password != self.confirm_password {
            errors.push(FieldError::new(
                "confirm_password",
                "Las contraseñas no coinciden",
            ));
        }

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        Ok(Registration {
            name,
            email,
            password: self.password,
            confirm_password: self.confirm_password,
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers and verifies users.
pub struct Credentials {
    users: Arc<dyn UserStore>,
    params: Params,
    timeout: Duration,
}

impl Credentials {
    pub fn new(users: Arc<dyn UserStore>, timeout: Duration) -> Self {
        Self {
            users,
            params: Params::default(),
            timeout,
        }
    }

    /// Override the Argon2 cost parameters used for new hashes.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Create an account. Returns the new user's public profile.
    pub async fn register(&self, registration: Registration) -> Result<UserInfo> {
        let registration = registration.validate()?;

        let existing = bounded(self.timeout, self.users.find_user_by_email(&registration.email)).await?;
        if existing.is_some() {
            return Err(Error::DuplicateEmail);
        }

        let params = self.params.clone();
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &params))
            .await
            .map_err(|e| Error::Internal(format!("hashing task failed: {e}")))??;

        let user = UserRecord {
            id: Uuid::new_v4(),
            name: registration.name,
            email: registration.email,
            password_hash,
            created_at: Utc::now(),
        };

        // The unique index still decides when two sign-ups race for one email.
        match tokio::time::timeout(self.timeout, self.users.insert_user(&user)).await {
            Ok(Ok(())) => {}
            Ok(Err(StoreError::Conflict)) => return Err(Error::DuplicateEmail),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(Error::Unavailable("user insert timed out".to_string())),
        }

        tracing::info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(UserInfo::from(&user))
    }

    /// Check an email / password pair.
    pub async fn verify(&self, email: &str, password: &str) -> Result<UserInfo> {
        let email = normalize_email(email);
        let user = bounded(self.timeout, self.users.find_user_by_email(&email)).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password = password.to_string();
        let matched = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| Error::Internal(format!("verification task failed: {e}")))?;

        match (user, matched) {
            (Some(user), Ok(true)) => {
                tracing::info!(target: "auth::login", user_id = %user.id, email = %email, success = true, "sign-in");
                Ok(UserInfo::from(&user))
            }
            (Some(_), Err(e)) => {
                tracing::error!(target: "auth::login", email = %email, error = %e, "stored hash unreadable");
                Err(e)
            }
            _ => {
                tracing::warn!(target: "auth::login", email = %email, success = false, "sign-in");
                Err(Error::InvalidCredentials)
            }
        }
    }

    /// Public profile of a user id taken from a session.
    pub async fn profile(&self, user_id: Uuid) -> Result<Option<UserInfo>> {
        let user = bounded(self.timeout, self.users.find_user(user_id)).await?;
        Ok(user.as_ref().map(UserInfo::from))
    }
}
