//! # API crate: domain services for Notas
//!
//! Everything the web binary needs to serve a request lives here: validation of
//! incoming commands, password and session handling, the owner-scoped note
//! repository, contact intake with its best-effort mail notification, and the
//! PostgreSQL store. Handlers in the `web` crate only ever call into these
//! services; none of them touches a store directly.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Credential store (register / verify), Argon2id password hashing, session establish / resolve / destroy |
//! | [`notes`] | [`NoteRepository`]: create, list, fetch, update and delete notes for their owner only |
//! | [`contact`] | [`ContactService`]: validate and persist contact messages, then notify |
//! | [`mailer`] | [`Mailer`] transports and the best-effort notification [`Dispatcher`] |
//! | [`db`] | PostgreSQL pool, migrations and the `sqlx`-backed store |
//! | [`models`] | Client-safe projections ([`UserInfo`]) |
//! | [`settings`] | Layered configuration (`config.toml` + environment) |
//! | [`logging`] | Tracing subscriber setup and structured field names |
//! | [`error`] | The error taxonomy every service returns |
//!
//! ## Timeouts
//!
//! Every store call and every outbound mail is bounded. When the bound elapses
//! the caller gets [`Error::Unavailable`], which is retryable; a request never
//! hangs on a stalled backend.

pub mod auth;
pub mod contact;
pub mod db;
pub mod error;
pub mod logging;
pub mod mailer;
pub mod models;
pub mod notes;
pub mod settings;

pub use auth::{Credentials, Registration};
pub use contact::{ContactService, ContactSubmission};
pub use error::{Error, FieldError, Result};
pub use mailer::{Delivery, Dispatcher, Mailer};
pub use models::UserInfo;
pub use notes::{NoteInput, NoteRepository};
pub use settings::Settings;
