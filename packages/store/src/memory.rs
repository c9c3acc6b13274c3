use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{ContactMessage, Note, UserRecord};
use crate::repo::{ContactStore, NoteStore, StoreError, UserStore};

/// In-memory store for tests and local runs without a database.
///
/// All three record kinds live behind one mutex, so every trait method is a
/// single critical section and the owner check of a note mutation cannot
/// interleave with another request. The lock is never held across an await.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, UserRecord>,
    /// Insertion order; newer notes are pushed last.
    notes: Vec<Note>,
    contacts: Vec<ContactMessage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored contact message, oldest first.
    pub fn contacts(&self) -> Vec<ContactMessage> {
        self.lock()
            .map(|inner| inner.contacts.clone())
            .unwrap_or_default()
    }

    /// Snapshot of every stored note regardless of owner.
    pub fn all_notes(&self) -> Vec<Note> {
        self.lock()
            .map(|inner| inner.notes.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert_note(&self, note: &Note) -> Result<(), StoreError> {
        self.lock()?.notes.push(note.clone());
        Ok(())
    }

    async fn notes_for_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        let mut notes: Vec<Note> = self
            .lock()?
            .notes
            .iter()
            .rev()
            .filter(|n| n.user_id == owner)
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep newest-inserted first.
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn owned_note(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>, StoreError> {
        Ok(self
            .lock()?
            .notes
            .iter()
            .find(|n| n.id == id && n.user_id == owner)
            .cloned())
    }

    async fn update_owned_note(
        &self,
        owner: Uuid,
        id: Uuid,
        title: &str,
        body: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError> {
        let mut inner = self.lock()?;
        let Some(note) = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id && n.user_id == owner)
        else {
            return Ok(None);
        };
        note.title = title.to_string();
        note.body = body.to_string();
        note.updated_at = updated_at;
        Ok(Some(note.clone()))
    }

    async fn delete_owned_note(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.notes.len();
        inner.notes.retain(|n| !(n.id == id && n.user_id == owner));
        Ok(inner.notes.len() != before)
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert_contact(&self, contact: &ContactMessage) -> Result<(), StoreError> {
        self.lock()?.contacts.push(contact.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(email: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    fn note(owner: Uuid, title: &str, created_at: DateTime<Utc>) -> Note {
        Note {
            id: Uuid::new_v4(),
            user_id: owner,
            title: title.to_string(),
            body: "body".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.insert_user(&user("alice@example.com")).await.unwrap();

        let err = store
            .insert_user(&user("alice@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Conflict);
    }

    #[tokio::test]
    async fn test_find_user_by_email_and_id() {
        let store = MemoryStore::new();
        let alice = user("alice@example.com");
        store.insert_user(&alice).await.unwrap();

        let by_email = store.find_user_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.as_ref().map(|u| u.id), Some(alice.id));
        assert_eq!(store.find_user(alice.id).await.unwrap(), Some(alice));
        assert!(store.find_user_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_notes_for_owner_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let now = Utc::now();

        store.insert_note(&note(owner, "old", now - Duration::minutes(5))).await.unwrap();
        store.insert_note(&note(other, "foreign", now)).await.unwrap();
        store.insert_note(&note(owner, "new", now)).await.unwrap();

        let titles: Vec<String> = store
            .notes_for_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_order_reversed() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();

        store.insert_note(&note(owner, "first", now)).await.unwrap();
        store.insert_note(&note(owner, "second", now)).await.unwrap();

        let notes = store.notes_for_owner(owner).await.unwrap();
        assert_eq!(notes[0].title, "second");
        assert_eq!(notes[1].title, "first");
    }

    #[tokio::test]
    async fn test_owner_filter_on_single_note_operations() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let n = note(owner, "mine", Utc::now());
        store.insert_note(&n).await.unwrap();

        assert!(store.owned_note(intruder, n.id).await.unwrap().is_none());
        assert!(store
            .update_owned_note(intruder, n.id, "x", "y", Utc::now())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_owned_note(intruder, n.id).await.unwrap());

        // Untouched after the intruder's attempts.
        assert_eq!(store.owned_note(owner, n.id).await.unwrap(), Some(n.clone()));

        let later = Utc::now() + Duration::seconds(1);
        let updated = store
            .update_owned_note(owner, n.id, "renamed", "new body", later)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, n.created_at);

        assert!(store.delete_owned_note(owner, n.id).await.unwrap());
        assert!(store.owned_note(owner, n.id).await.unwrap().is_none());
        assert!(!store.delete_owned_note(owner, n.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_contacts_are_appended() {
        let store = MemoryStore::new();
        let contact = ContactMessage::new(
            crate::NewContact {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                subject: "Hola".to_string(),
                message: "Mensaje".to_string(),
            },
            Some("127.0.0.1".to_string()),
            None,
        );
        store.insert_contact(&contact).await.unwrap();
        assert_eq!(store.contacts(), vec![contact]);
    }
}
