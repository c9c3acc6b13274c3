//! Error taxonomy shared by every service.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use store::StoreError;
use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A user-correctable problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or malformed input; carries one message per offending field.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No session, or the session expired.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Absent, or owned by someone else. The two cases are not distinguished.
    #[error("Not found")]
    NotFound,

    /// A backend timed out or refused the connection; the call may be retried.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether retrying the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }

    /// Field-level messages of a validation failure, empty for other variants.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => Error::Unavailable(msg),
            other => Error::Internal(other.to_string()),
        }
    }
}

impl From<tower_sessions::session::Error> for Error {
    fn from(e: tower_sessions::session::Error) -> Self {
        Error::Unavailable(format!("session store: {e}"))
    }
}

/// Run a store call with an upper bound on its duration.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(Error::from),
        Err(_) => Err(Error::Unavailable(format!(
            "store call exceeded {}ms",
            limit.as_millis()
        ))),
    }
}

/// Run a session store call with the same bound as [`bounded`].
pub(crate) async fn bounded_session<T, F>(limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, tower_sessions::session::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(Error::from),
        Err(_) => Err(Error::Unavailable(format!(
            "session store call exceeded {}ms",
            limit.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_unavailable_maps_to_retryable() {
        let err: Error = StoreError::Unavailable("pool timed out".to_string()).into();
        assert_eq!(err, Error::Unavailable("pool timed out".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_store_conflict_and_backend_map_to_internal() {
        let err: Error = StoreError::Backend("syntax error".to_string()).into();
        assert!(matches!(err, Error::Internal(_)));
        assert!(!err.is_retryable());

        let err: Error = StoreError::Conflict.into();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn test_field_errors_only_for_validation() {
        let err = Error::Validation(vec![FieldError::new("title", "required")]);
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field, "title");
        assert!(Error::NotFound.field_errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_times_out_as_unavailable() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, StoreError>(())
        };
        let err = bounded(Duration::from_secs(5), slow).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_bounded_passes_results_through() {
        let value = bounded(Duration::from_secs(5), async { Ok::<_, StoreError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
