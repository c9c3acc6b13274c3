//! This crate contains every page of the site, rendered on the server.
//!
//! Pages are dioxus components. Handlers call one of the `render_*` functions
//! with a [`PageContext`] and whatever the page shows, and get a complete HTML
//! document back. Text and attribute values are escaped by the renderer.

mod context;
mod layout;
pub mod views;

pub use context::{FlashKind, FlashMessage, PageContext};
pub use layout::STYLESHEET_PATH;
pub use views::*;

/// Site stylesheet, served at [`STYLESHEET_PATH`].
pub const STYLESHEET: &str = include_str!("../assets/notas.css");
