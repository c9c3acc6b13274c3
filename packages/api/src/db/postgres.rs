use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use store::{ContactMessage, ContactStore, Note, NoteStore, StoreError, UserRecord, UserStore};
use uuid::Uuid;

/// `sqlx`-backed implementation of the store traits.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SqlUser {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<SqlUser> for UserRecord {
    fn from(row: SqlUser) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct SqlNote {
    id: Uuid,
    user_id: Uuid,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SqlNote> for Note {
    fn from(row: SqlNote) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row: Option<SqlUser> = sqlx::query_as(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(UserRecord::from))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let row: Option<SqlUser> = sqlx::query_as(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(UserRecord::from))
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn insert_note(&self, note: &Note) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, title, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(note.id)
        .bind(note.user_id)
        .bind(&note.title)
        .bind(&note.body)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn notes_for_owner(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        let rows: Vec<SqlNote> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, body, created_at, updated_at
            FROM notes
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn owned_note(&self, owner: Uuid, id: Uuid) -> Result<Option<Note>, StoreError> {
        let row: Option<SqlNote> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, body, created_at, updated_at
            FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(Note::from))
    }

    async fn update_owned_note(
        &self,
        owner: Uuid,
        id: Uuid,
        title: &str,
        body: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError> {
        let row: Option<SqlNote> = sqlx::query_as(
            r#"
            UPDATE notes
            SET title = $3, body = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(title)
        .bind(body)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(Note::from))
    }

    async fn delete_owned_note(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn insert_contact(&self, contact: &ContactMessage) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, email, subject, message, ip_address, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(&contact.ip_address)
        .bind(contact.user_id)
        .bind(contact.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }
}
