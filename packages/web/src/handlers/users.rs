//! Registration, sign-in and sign-out.

use api::auth::session;
use api::{Error, FieldError, Registration};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use ui::{FlashMessage, SignupForm};

use super::page;
use crate::error::AppError;
use crate::extract::{CurrentUser, MaybeUser, SIGNIN_PATH};
use crate::flash;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn signup_form_handler(session: Session, MaybeUser(user): MaybeUser) -> Html<String> {
    Html(ui::render_signup(page(&session, user).await, SignupForm::default()))
}

pub async fn signup_handler(
    State(state): State<AppState>,
    session: Session,
    Form(data): Form<SignupData>,
) -> Result<Response, AppError> {
    let name = data.name.clone();
    let email = data.email.clone();
    let registration = Registration {
        name: data.name,
        email: data.email,
        password: data.password,
        confirm_password: data.confirm_password,
    };

    let errors = match state.credentials.register(registration).await {
        Ok(_) => {
            flash::push(&session, FlashMessage::success("Registro exitoso. Ya puedes iniciar sesión.")).await;
            return Ok(Redirect::to(SIGNIN_PATH).into_response());
        }
        Err(Error::Validation(errors)) => errors,
        Err(Error::DuplicateEmail) => vec![FieldError::new("email", "El correo ya está en uso")],
        Err(e) => return Err(e.into()),
    };

    let form = SignupForm {
        name,
        email,
        errors,
    };
    Ok(Html(ui::render_signup(page(&session, None).await, form)).into_response())
}

pub async fn signin_form_handler(session: Session, MaybeUser(user): MaybeUser) -> Html<String> {
    Html(ui::render_signin(page(&session, user).await, String::new()))
}

pub async fn signin_handler(
    State(state): State<AppState>,
    session: Session,
    Form(data): Form<SigninData>,
) -> Result<Response, AppError> {
    match state.credentials.verify(&data.email, &data.password).await {
        Ok(user) => {
            session::establish(&session, user.id, state.settings.database.timeout()).await?;
            Ok(Redirect::to("/notas").into_response())
        }
        Err(Error::InvalidCredentials) => {
            flash::push(&session, FlashMessage::error("Correo o contraseña incorrectos")).await;
            Ok(Redirect::to(SIGNIN_PATH).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn signout_handler(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(_user): CurrentUser,
) -> Result<Response, AppError> {
    session::destroy(&session, state.settings.database.timeout()).await?;
    flash::push(&session, FlashMessage::success("Has cerrado sesión")).await;
    Ok(Redirect::to(SIGNIN_PATH).into_response())
}
