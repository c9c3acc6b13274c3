//! # Persisted records
//!
//! The rows the application keeps, independent of the backend that stores them.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserRecord`] | A registered account. `email` is always stored lower-cased and `password_hash` is a PHC string, never the plaintext. |
//! | [`Note`] | A note owned by exactly one user through `user_id`. The owner is fixed at creation. |
//! | [`ContactMessage`] | A submission of the contact form, optionally linked to the signed-in user. |
//! | [`NewContact`] | The validated fields of a contact submission before it gets an id and timestamp. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    /// Lower-cased, unique across all users.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A note and its owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Owner id; never changes after creation.
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact form fields that passed validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A stored contact form submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Stamp a validated submission with a fresh id and the current time.
    pub fn new(contact: NewContact, ip_address: Option<String>, user_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            ip_address,
            user_id,
            created_at: Utc::now(),
        }
    }
}
