//! Authentication: credential store, password hashing and sessions.

mod credentials;
mod password;
pub mod session;

pub use credentials::{Credentials, Registration, MIN_PASSWORD_LEN};
pub use password::{hash_password, verify_password};
pub use session::SESSION_USER_ID_KEY;
