pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use models::{ContactMessage, NewContact, Note, UserRecord};
pub use repo::{ContactStore, NoteStore, StoreError, UserStore};
