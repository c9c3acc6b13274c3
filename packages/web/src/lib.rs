//! HTTP surface of Notas: routing, handlers and request plumbing on top of
//! the `api` services and the `ui` pages.

pub mod error;
pub mod extract;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::{app, build_router};
pub use state::AppState;
