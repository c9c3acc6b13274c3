//! Mapping of service errors that a handler does not deal with itself.

use api::Error;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use ui::PageContext;

use crate::extract::SIGNIN_PATH;

/// Fallback response for an [`api::Error`]. Bodies never include the error
/// detail; that only goes to the log.
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Unauthenticated => return Redirect::to(SIGNIN_PATH).into_response(),
            Error::NotFound => (StatusCode::NOT_FOUND, "La página que buscas no existe."),
            Error::Validation(_) | Error::DuplicateEmail | Error::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "La solicitud no es válida.")
            }
            Error::Unavailable(detail) => {
                tracing::warn!(error = %detail, "backend unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "El servicio no está disponible en este momento. Intenta nuevamente en unos minutos.",
                )
            }
            Error::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.",
                )
            }
        };
        error_page(status, message)
    }
}

/// Rendered error page without session context.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let html = ui::render_error(
        PageContext::new(None, Vec::new()),
        status.as_u16(),
        message.to_string(),
    );
    (status, Html(html)).into_response()
}
