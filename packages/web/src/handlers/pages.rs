//! Public and static pages.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tower_sessions::Session;

use super::page;
use crate::error::error_page;
use crate::extract::{CurrentUser, MaybeUser};
use crate::state::AppState;

pub async fn home_handler(session: Session, MaybeUser(user): MaybeUser) -> Html<String> {
    Html(ui::render_home(page(&session, user).await))
}

/// FAQ. In production, a `Referer` from another site is refused.
pub async fn faq_handler(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    CurrentUser(user): CurrentUser,
) -> Response {
    if state.settings.server.is_production() {
        let referer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
        let host = headers.get(header::HOST).and_then(|v| v.to_str().ok()).unwrap_or_default();
        if let Some(referer) = referer {
            if !same_origin(referer, host) {
                tracing::warn!(referer, user_id = %user.id, "FAQ requested from foreign referer");
                return error_page(
                    StatusCode::FORBIDDEN,
                    "Acceso no autorizado. Por favor, navega desde nuestra página principal.",
                );
            }
        }
    }
    Html(ui::render_faq(page(&session, Some(user)).await)).into_response()
}

pub async fn privacy_handler(session: Session, MaybeUser(user): MaybeUser) -> Html<String> {
    Html(ui::render_privacy(page(&session, user).await))
}

pub async fn terms_handler(session: Session, MaybeUser(user): MaybeUser) -> Html<String> {
    Html(ui::render_terms(page(&session, user).await))
}

pub async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], ui::STYLESHEET)
}

pub async fn not_found_handler(session: Session, MaybeUser(user): MaybeUser) -> Response {
    let html = ui::render_error(
        page(&session, user).await,
        StatusCode::NOT_FOUND.as_u16(),
        "La página que buscas no existe".to_string(),
    );
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

/// Whether `referer` points at `host` over http or https.
fn same_origin(referer: &str, host: &str) -> bool {
    let Some(rest) = referer
        .strip_prefix("https://")
        .or_else(|| referer.strip_prefix("http://"))
    else {
        return false;
    };
    match rest.strip_prefix(host) {
        Some(tail) => !host.is_empty() && (tail.is_empty() || tail.starts_with('/') || tail.starts_with('?')),
        None => false,
    }
}
