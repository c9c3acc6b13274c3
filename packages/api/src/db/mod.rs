//! # Database module: PostgreSQL pool and store
//!
//! - [`connect`] opens a pool sized and bounded by [`crate::settings::Database`].
//! - [`migrate`] applies the embedded migrations under `migrations/`.
//! - [`PgStore`] implements the `store` traits on top of that pool.
//!
//! The pool is created once by the binary and passed down explicitly; nothing
//! in this crate holds it in a global.

mod pool;
mod postgres;

pub use pool::{connect, migrate};
pub use postgres::PgStore;
