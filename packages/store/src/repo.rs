//! # Store traits: the persistence seam
//!
//! Services in the `api` crate never talk to a database directly. They hold
//! `Arc<dyn UserStore>`, `Arc<dyn NoteStore>` and `Arc<dyn ContactStore>` and the
//! binary decides which backend sits behind them: the PostgreSQL store in
//! `api::db` in production, [`crate::MemoryStore`] in tests.
//!
//! ## Ownership
//!
//! Every [`NoteStore`] method that touches a single note takes the owner id
//! alongside the note id and must apply both in the same operation. A note that
//! exists but belongs to someone else is indistinguishable from a missing one:
//! the lookup returns `None`, the update returns `None`, the delete returns
//! `false`. Implementations must not split this into a read followed by a write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ContactMessage, Note, UserRecord};

/// Failure reported by a store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("conflicting record")]
    Conflict,

    /// The backend could not be reached in time; the call may be retried.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Anything else the backend reported.
    #[error("store failure: {0}")]
    Backend(String),
}

/// User accounts keyed by id and by lower-cased email.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::Conflict`] if the email is taken.
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;
}

/// Notes, always addressed through their owner.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn insert_note(&self, note: &Note) -> Result<(), StoreError>;

    /// All notes of `owner`, newest first.
    async fn notes_for_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError>;

    /// The note `id` if it exists and belongs to `owner`.
    async fn owned_note(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Replace title and body of an owned note and bump `updated_at`.
    /// Returns the updated note, or `None` if no note matched both ids.
    async fn update_owned_note(
        &self,
        owner: Uuid,
        id: Uuid,
        title: &str,
        body: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError>;

    /// Remove an owned note. Returns whether a note matched both ids.
    async fn delete_owned_note(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError>;
}

/// Write-only sink for contact form submissions.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert_contact(&self, contact: &ContactMessage) -> Result<(), StoreError>;
}
