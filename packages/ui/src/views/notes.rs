use api::FieldError;
use dioxus::prelude::*;
use store::Note;
use uuid::Uuid;

use super::{document, messages_for};
use crate::context::PageContext;
use crate::layout::{FieldMessages, Layout};

/// Values and field errors of the note form, for re-rendering after a
/// rejected submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteForm {
    pub title: String,
    pub body: String,
    pub errors: Vec<FieldError>,
}

impl From<&Note> for NoteForm {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            body: note.body.clone(),
            errors: Vec::new(),
        }
    }
}

pub fn render_new_note(ctx: PageContext, form: NoteForm) -> String {
    document(VirtualDom::new_with_props(
        NewNote,
        NewNoteProps { ctx, form },
    ))
}

pub fn render_notes(ctx: PageContext, notes: Vec<Note>) -> String {
    document(VirtualDom::new_with_props(
        NoteList,
        NoteListProps { ctx, notes },
    ))
}

pub fn render_edit_note(ctx: PageContext, id: Uuid, form: NoteForm) -> String {
    document(VirtualDom::new_with_props(
        EditNote,
        EditNoteProps { ctx, id, form },
    ))
}

#[component]
fn NewNote(ctx: PageContext, form: NoteForm) -> Element {
    rsx! {
        Layout { ctx, title: "Nueva nota",
            h1 { "Nueva nota" }
            form { class: "card", action: "/notas/nota-nueva", method: "POST",
                NoteFields { form }
                button { class: "button", r#type: "submit", "Guardar" }
            }
        }
    }
}

#[component]
fn EditNote(ctx: PageContext, id: Uuid, form: NoteForm) -> Element {
    rsx! {
        Layout { ctx, title: "Editar nota",
            h1 { "Editar nota" }
            form { class: "card", action: "/notas/editar/{id}?_method=PUT", method: "POST",
                NoteFields { form }
                button { class: "button", r#type: "submit", "Actualizar" }
            }
        }
    }
}

#[component]
fn NoteFields(form: NoteForm) -> Element {
    let title_errors = messages_for(&form.errors, "title");
    let body_errors = messages_for(&form.errors, "body");
    rsx! {
        label { r#for: "title", "Título" }
        input {
            id: "title",
            r#type: "text",
            name: "title",
            value: "{form.title}",
            placeholder: "Título",
            autofocus: true,
        }
        FieldMessages { errors: title_errors }
        label { r#for: "body", "Descripción" }
        textarea { id: "body", name: "body", rows: "6", placeholder: "Descripción", "{form.body}" }
        FieldMessages { errors: body_errors }
    }
}

#[component]
fn NoteList(ctx: PageContext, notes: Vec<Note>) -> Element {
    rsx! {
        Layout { ctx, title: "Mis notas",
            h1 { "Mis notas" }
            if notes.is_empty() {
                div { class: "card empty",
                    p { "Todavía no tienes notas." }
                    a { class: "button", href: "/notas/agregar", "Crear la primera" }
                }
            }
            div { class: "notes",
                for note in notes.iter().cloned() {
                    NoteCard { key: "{note.id}", note }
                }
            }
        }
    }
}

#[component]
fn NoteCard(note: Note) -> Element {
    let modified = note.updated_at.format("%d/%m/%Y %H:%M").to_string();
    rsx! {
        article { class: "card note",
            h2 { "{note.title}" }
            p { class: "note-body", "{note.body}" }
            small { "Modificada el {modified}" }
            div { class: "actions",
                a { class: "button button-secondary", href: "/notas/editar/{note.id}", "Editar" }
                form { action: "/notas/borrar/{note.id}?_method=DELETE", method: "POST",
                    button { class: "button button-danger", r#type: "submit", "Borrar" }
                }
            }
        }
    }
}
