//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use api::{ContactService, Credentials, NoteRepository, Settings};

/// Services every handler reaches through `State`. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<Credentials>,
    pub notes: Arc<NoteRepository>,
    pub contact: Arc<ContactService>,
    pub settings: Arc<Settings>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        credentials: Credentials,
        notes: NoteRepository,
        contact: ContactService,
        settings: Settings,
    ) -> Self {
        Self {
            credentials: Arc::new(credentials),
            notes: Arc::new(notes),
            contact: Arc::new(contact),
            settings: Arc::new(settings),
            started_at: Instant::now(),
        }
    }
}
