//! # Note repository
//!
//! Owner-scoped CRUD over a [`NoteStore`]. Every operation takes the acting
//! user's id and hands it to the store together with the note id, so the owner
//! check and the read or write happen in one store operation. A note that
//! belongs to someone else is reported exactly like a missing one,
//! [`Error::NotFound`], for reads, updates and deletes alike.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use store::{Note, NoteStore};
use uuid::Uuid;

use crate::error::{bounded, Error, FieldError, Result};

/// Validated title and body of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    title: String,
    body: String,
}

impl NoteInput {
    /// Trim both fields; both are required.
    pub fn new(title: &str, body: &str) -> Result<Self> {
        let title = title.trim();
        let body = body.trim();
        let mut errors = Vec::new();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Por favor escribe un título"));
        }
        if body.is_empty() {
            errors.push(FieldError::new("body", "Por favor escribe una descripción"));
        }
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

pub struct NoteRepository {
    notes: Arc<dyn NoteStore>,
    timeout: Duration,
}

impl NoteRepository {
    pub fn new(notes: Arc<dyn NoteStore>, timeout: Duration) -> Self {
        Self { notes, timeout }
    }

    /// Store a new note for `owner`. Returns its id.
    pub async fn create(&self, owner: Uuid, input: NoteInput) -> Result<Uuid> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id: owner,
            title: input.title,
            body: input.body,
            created_at: now,
            updated_at: now,
        };
        bounded(self.timeout, self.notes.insert_note(&note)).await?;
        tracing::info!(target: "notes::activity", user_id = %owner, note_id = %note.id, op = "create", "note created");
        Ok(note.id)
    }

    /// Snapshot of the owner's notes, newest first.
    pub async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Note>> {
        bounded(self.timeout, self.notes.notes_for_owner(owner)).await
    }

    pub async fn get_for_edit(&self, owner: Uuid, id: Uuid) -> Result<Note> {
        bounded(self.timeout, self.notes.owned_note(owner, id))
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, input: NoteInput) -> Result<Note> {
        let note = bounded(
            self.timeout,
            self.notes
                .update_owned_note(owner, id, &input.title, &input.body, Utc::now()),
        )
        .await?
        .ok_or(Error::NotFound)?;
        tracing::info!(target: "notes::activity", user_id = %owner, note_id = %id, op = "update", "note updated");
        Ok(note)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()> {
        if !bounded(self.timeout, self.notes.delete_owned_note(owner, id)).await? {
            return Err(Error::NotFound);
        }
        tracing::info!(target: "notes::activity", user_id = %owner, note_id = %id, op = "delete", "note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use store::{MemoryStore, StoreError};

    fn repository() -> NoteRepository {
        NoteRepository::new(Arc::new(MemoryStore::new()), Duration::from_secs(5))
    }

    fn input(title: &str, body: &str) -> NoteInput {
        NoteInput::new(title, body).unwrap()
    }

    #[test]
    fn test_input_is_trimmed_and_required() {
        let input = NoteInput::new("  Groceries ", " milk\n").unwrap();
        assert_eq!(input.title(), "Groceries");
        assert_eq!(input.body(), "milk");

        let err = NoteInput::new(" ", "").unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[tokio::test]
    async fn test_created_note_listed_once() {
        let repo = repository();
        let alice = Uuid::new_v4();
        let id = repo.create(alice, input("Groceries", "milk")).await.unwrap();

        let notes = repo.list_for_owner(alice).await.unwrap();
        assert_eq!(notes.iter().filter(|n| n.id == id).count(), 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        assert_eq!(notes[0].body, "milk");
        assert_eq!(notes[0].user_id, alice);
    }

    #[tokio::test]
    async fn test_other_owner_gets_not_found_everywhere() {
        let repo = repository();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let id = repo.create(alice, input("Groceries", "milk")).await.unwrap();

        assert_eq!(repo.get_for_edit(bob, id).await.unwrap_err(), Error::NotFound);
        assert_eq!(
            repo.update(bob, id, input("Hacked", "x")).await.unwrap_err(),
            Error::NotFound
        );
        assert_eq!(repo.delete(bob, id).await.unwrap_err(), Error::NotFound);
        assert!(repo.list_for_owner(bob).await.unwrap().is_empty());

        let note = repo.get_for_edit(alice, id).await.unwrap();
        assert_eq!(note.title, "Groceries");
    }

    #[tokio::test]
    async fn test_missing_note_is_not_found() {
        let repo = repository();
        let alice = Uuid::new_v4();
        let missing = Uuid::new_v4();
        assert_eq!(repo.get_for_edit(alice, missing).await.unwrap_err(), Error::NotFound);
        assert_eq!(
            repo.update(alice, missing, input("a", "b")).await.unwrap_err(),
            Error::NotFound
        );
        assert_eq!(repo.delete(alice, missing).await.unwrap_err(), Error::NotFound);
    }

    #[tokio::test]
    async fn test_update_bumps_modified_time() {
        let repo = repository();
        let alice = Uuid::new_v4();
        let id = repo.create(alice, input("Groceries", "milk")).await.unwrap();
        let before = repo.get_for_edit(alice, id).await.unwrap();

        let after = repo.update(alice, id, input("Groceries", "milk, eggs")).await.unwrap();
        assert_eq!(after.body, "milk, eggs");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let repo = repository();
        let alice = Uuid::new_v4();
        let id = repo.create(alice, input("Groceries", "milk")).await.unwrap();

        repo.delete(alice, id).await.unwrap();
        assert_eq!(repo.get_for_edit(alice, id).await.unwrap_err(), Error::NotFound);
        assert_eq!(repo.delete(alice, id).await.unwrap_err(), Error::NotFound);
    }

    struct StalledStore;

    #[async_trait]
    impl NoteStore for StalledStore {
        async fn insert_note(&self, _note: &Note) -> std::result::Result<(), StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
        async fn notes_for_owner(&self, _owner: Uuid) -> std::result::Result<Vec<Note>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn owned_note(&self, _o: Uuid, _i: Uuid) -> std::result::Result<Option<Note>, StoreError> {
            Ok(None)
        }
        async fn update_owned_note(
            &self,
            _o: Uuid,
            _i: Uuid,
            _t: &str,
            _b: &str,
            _at: DateTime<Utc>,
        ) -> std::result::Result<Option<Note>, StoreError> {
            Ok(None)
        }
        async fn delete_owned_note(&self, _o: Uuid, _i: Uuid) -> std::result::Result<bool, StoreError> {
            Ok(false)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_store_surfaces_unavailable() {
        let repo = NoteRepository::new(Arc::new(StalledStore), Duration::from_secs(5));
        let err = repo
            .create(Uuid::new_v4(), input("a", "b"))
            .await
            .unwrap_err();
        assert!(err.is_retryable());

        let err = repo.list_for_owner(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }
}
