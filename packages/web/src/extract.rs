//! Request extractors for the signed-in user and the client address.

use std::net::SocketAddr;

use api::auth::session;
use api::{Error, UserInfo};
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use ui::FlashMessage;

use crate::error::AppError;
use crate::flash;
use crate::state::AppState;

pub const SIGNIN_PATH: &str = "/usuarios/ingreso";

/// The signed-in user. Anonymous requests are redirected to the sign-in page
/// with a flash message.
pub struct CurrentUser(pub UserInfo);

/// The signed-in user, if any. Never rejects.
pub struct MaybeUser(pub Option<UserInfo>);

async fn session_from(parts: &mut Parts, state: &AppState) -> Result<Session, Response> {
    Session::from_request_parts(parts, state)
        .await
        .map_err(IntoResponse::into_response)
}

async fn lookup(session: &Session, state: &AppState) -> Result<UserInfo, Error> {
    let user_id = session::resolve(session, state.settings.database.timeout()).await?;
    state
        .credentials
        .profile(user_id)
        .await?
        .ok_or(Error::Unauthenticated)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = session_from(parts, state).await?;
        match lookup(&session, state).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(Error::Unauthenticated) => {
                flash::push(&session, FlashMessage::error("Por favor inicia sesión para continuar.")).await;
                Err(Redirect::to(SIGNIN_PATH).into_response())
            }
            Err(e) => Err(AppError(e).into_response()),
        }
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = session_from(parts, state).await?;
        match lookup(&session, state).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(e) => {
                if e.is_retryable() {
                    tracing::warn!(error = %e, "could not resolve session user");
                }
                Ok(MaybeUser(None))
            }
        }
    }
}

/// Client address: first hop of `X-Forwarded-For`, else the socket peer.
pub struct ClientIp(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if forwarded.is_some() {
            return Ok(ClientIp(forwarded));
        }
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        Ok(ClientIp(peer))
    }
}
