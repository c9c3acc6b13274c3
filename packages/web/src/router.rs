//! Axum router construction.

use axum::http::{header, HeaderName, HeaderValue};
use axum::middleware::from_fn;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::handlers;
use crate::middleware::method_override;
use crate::state::AppState;

/// Routes and their handlers, without the session layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::pages::home_handler))
        .route("/faq", get(handlers::pages::faq_handler))
        .route(
            "/contacto",
            get(handlers::contact::contact_form_handler).post(handlers::contact::submit_contact_handler),
        )
        .route("/privacidad", get(handlers::pages::privacy_handler))
        .route("/terminos", get(handlers::pages::terms_handler))
        // Notes
        .route("/notas", get(handlers::notes::list_notes_handler))
        .route("/notas/agregar", get(handlers::notes::new_note_handler))
        .route("/notas/nota-nueva", post(handlers::notes::create_note_handler))
        .route(
            "/notas/editar/{id}",
            get(handlers::notes::edit_note_handler).put(handlers::notes::update_note_handler),
        )
        .route("/notas/borrar/{id}", delete(handlers::notes::delete_note_handler))
        // Users
        .route("/usuarios/registro", get(handlers::users::signup_form_handler))
        .route("/users/signup", post(handlers::users::signup_handler))
        .route("/usuarios/ingreso", get(handlers::users::signin_form_handler))
        .route("/users/signin", post(handlers::users::signin_handler))
        .route("/usuarios/salir", get(handlers::users::signout_handler))
        // Plumbing
        .route("/health", get(handlers::health::health_handler))
        .route(ui::STYLESHEET_PATH, get(handlers::pages::stylesheet_handler))
        .fallback(handlers::pages::not_found_handler)
        .with_state(state)
}

/// The complete application.
///
/// The method override runs in an outer router so the rewritten method is
/// what the inner router dispatches on.
pub fn app<S>(state: AppState, sessions: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .fallback_service(build_router(state))
        .layer(from_fn(method_override))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}
