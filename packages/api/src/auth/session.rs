//! # Session manager
//!
//! Binds a browser to a signed-in user through `tower-sessions`. The opaque token
//! is the session id the [`SessionManagerLayer`](tower_sessions::SessionManagerLayer)
//! keeps in the cookie; the record itself lives in the shared session store
//! (PostgreSQL in production) so it survives restarts.
//!
//! ```text
//! Anonymous --establish--> Authenticated --destroy / expiry--> Anonymous
//! ```
//!
//! - [`establish`] rotates the session id before binding the user, so a token
//!   handed out before sign-in is worthless afterwards.
//! - [`resolve`] reads the bound user. A missing cookie, an expired record or a
//!   session without a user all yield [`Error::Unauthenticated`]; only a failing
//!   store yields something else.
//! - [`destroy`] deletes the record and clears the cookie. Destroying an
//!   already-empty session is a no-op.
//!
//! Every store call is bounded by the given timeout. An elapsed bound is
//! [`Error::Unavailable`].

use std::time::Duration;

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{bounded_session, Error, Result};

/// Key for storing the user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Start an authenticated session for `user_id`.
pub async fn establish(session: &Session, user_id: Uuid, timeout: Duration) -> Result<()> {
    bounded_session(timeout, session.cycle_id()).await?;
    bounded_session(timeout, session.insert(SESSION_USER_ID_KEY, user_id)).await?;
    tracing::info!(target: "auth::session", user_id = %user_id, "session established");
    Ok(())
}

/// The user bound to this session.
pub async fn resolve(session: &Session, timeout: Duration) -> Result<Uuid> {
    bounded_session(timeout, session.get::<Uuid>(SESSION_USER_ID_KEY))
        .await?
        .ok_or(Error::Unauthenticated)
}

/// End the session. Idempotent.
pub async fn destroy(session: &Session, timeout: Duration) -> Result<()> {
    let user_id = bounded_session(timeout, session.get::<Uuid>(SESSION_USER_ID_KEY))
        .await
        .ok()
        .flatten();
    bounded_session(timeout, session.flush()).await?;
    if let Some(user_id) = user_id {
        tracing::info!(target: "auth::session", user_id = %user_id, "session destroyed");
    }
    Ok(())
}
