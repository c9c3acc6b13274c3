//! Full pages. Each `render_*` function builds a fresh virtual DOM for one
//! page and returns the serialised HTML document.

use api::FieldError;
use dioxus::prelude::*;

mod contact;
mod error;
mod notes;
mod pages;
mod users;

pub use contact::render_contact;
pub use error::render_error;
pub use notes::{render_edit_note, render_new_note, render_notes, NoteForm};
pub use pages::{render_faq, render_home, render_privacy, render_terms, FAQ_CATEGORIES};
pub use users::{render_signin, render_signup, SignupForm};

fn document(mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    format!("<!DOCTYPE html><html lang=\"es\">{}</html>", dioxus_ssr::render(&dom))
}

fn messages_for(errors: &[FieldError], field: &str) -> Vec<String> {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| e.message.clone())
        .collect()
}
