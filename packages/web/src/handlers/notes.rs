//! Note pages. Every handler acts on behalf of the signed-in user only.

use api::{Error, NoteInput};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use ui::{FlashMessage, NoteForm};
use uuid::Uuid;

use super::page;
use crate::error::AppError;
use crate::extract::CurrentUser;
use crate::flash;
use crate::state::AppState;

const NOTES_PATH: &str = "/notas";
const NOT_FOUND_MESSAGE: &str = "La nota no existe o no tienes acceso a ella.";

#[derive(Debug, Deserialize)]
pub struct NoteFormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

pub async fn new_note_handler(session: Session, CurrentUser(user): CurrentUser) -> Html<String> {
    Html(ui::render_new_note(page(&session, Some(user)).await, NoteForm::default()))
}

pub async fn create_note_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Form(data): Form<NoteFormData>,
) -> Result<Response, AppError> {
    let input = match NoteInput::new(&data.title, &data.body) {
        Ok(input) => input,
        Err(Error::Validation(errors)) => {
            let form = NoteForm {
                title: data.title,
                body: data.body,
                errors,
            };
            let ctx = page(&session, Some(user)).await;
            return Ok(Html(ui::render_new_note(ctx, form)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    state.notes.create(user.id, input).await?;
    flash::push(&session, FlashMessage::success("Nota agregada exitosamente")).await;
    Ok(Redirect::to(NOTES_PATH).into_response())
}

pub async fn list_notes_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let notes = state.notes.list_for_owner(user.id).await?;
    Ok(Html(ui::render_notes(page(&session, Some(user)).await, notes)))
}

pub async fn edit_note_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found(&session).await);
    };
    match state.notes.get_for_edit(user.id, id).await {
        Ok(note) => {
            let ctx = page(&session, Some(user)).await;
            Ok(Html(ui::render_edit_note(ctx, id, NoteForm::from(&note))).into_response())
        }
        Err(Error::NotFound) => Ok(not_found(&session).await),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_note_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Form(data): Form<NoteFormData>,
) -> Result<Response, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found(&session).await);
    };
    let input = match NoteInput::new(&data.title, &data.body) {
        Ok(input) => input,
        Err(Error::Validation(errors)) => {
            let form = NoteForm {
                title: data.title,
                body: data.body,
                errors,
            };
            let ctx = page(&session, Some(user)).await;
            return Ok(Html(ui::render_edit_note(ctx, id, form)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    match state.notes.update(user.id, id, input).await {
        Ok(_) => {
            flash::push(&session, FlashMessage::success("Nota actualizada exitosamente")).await;
            Ok(Redirect::to(NOTES_PATH).into_response())
        }
        Err(Error::NotFound) => Ok(not_found(&session).await),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_note_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found(&session).await);
    };
    match state.notes.delete(user.id, id).await {
        Ok(()) => {
            flash::push(&session, FlashMessage::success("Nota eliminada exitosamente")).await;
            Ok(Redirect::to(NOTES_PATH).into_response())
        }
        Err(Error::NotFound) => Ok(not_found(&session).await),
        Err(e) => Err(e.into()),
    }
}

async fn not_found(session: &Session) -> Response {
    flash::push(session, FlashMessage::error(NOT_FOUND_MESSAGE)).await;
    Redirect::to(NOTES_PATH).into_response()
}
