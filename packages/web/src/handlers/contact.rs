//! Contact form.

use api::{ContactSubmission, Delivery, Error};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use ui::FlashMessage;

use super::page;
use crate::error::AppError;
use crate::extract::{ClientIp, CurrentUser};
use crate::flash;
use crate::state::AppState;

const CONTACT_PATH: &str = "/contacto";

#[derive(Debug, Deserialize)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

pub async fn contact_form_handler(session: Session, CurrentUser(user): CurrentUser) -> Html<String> {
    Html(ui::render_contact(page(&session, Some(user)).await))
}

pub async fn submit_contact_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    ClientIp(ip): ClientIp,
    Form(data): Form<ContactFormData>,
) -> Result<Response, AppError> {
    let submission = match ContactSubmission::parse(&data.name, &data.email, &data.subject, &data.message) {
        Ok(submission) => submission,
        Err(Error::Validation(_)) => {
            flash::push(
                &session,
                FlashMessage::error("Por favor completa todos los campos del formulario."),
            )
            .await;
            return Ok(Redirect::to(CONTACT_PATH).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let (_, delivery) = state.contact.submit(submission, ip, Some(user.id)).await?;
    let message = match delivery {
        Delivery::Sent => "¡Mensaje enviado con éxito! Te responderemos pronto a tu correo.",
        Delivery::Degraded => {
            "Tu mensaje ha sido guardado. Lamentablemente hubo un problema al enviar la \
             notificación por correo, pero nos pondremos en contacto contigo pronto."
        }
    };
    flash::push(&session, FlashMessage::success(message)).await;
    Ok(Redirect::to(CONTACT_PATH).into_response())
}
