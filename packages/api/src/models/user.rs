//! # Public user profile
//!
//! [`UserInfo`] is what the rest of the application sees of an account once it
//! has been registered or verified: identity, name and email. It never carries
//! the password hash, so it is safe to hand to views and to log.

use serde::{Deserialize, Serialize};
use store::UserRecord;
use uuid::Uuid;

/// User information safe to render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&UserRecord> for UserInfo {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
