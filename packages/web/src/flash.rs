//! Read-once messages carried across a redirect in the session.

use tower_sessions::Session;
use ui::FlashMessage;

const FLASH_KEY: &str = "flash";

/// Queue a message for the next rendered page.
pub async fn push(session: &Session, message: FlashMessage) {
    let mut pending: Vec<FlashMessage> = session
        .get(FLASH_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(message);
    if let Err(e) = session.insert(FLASH_KEY, pending).await {
        tracing::warn!(error = %e, "failed to store flash message");
    }
}

/// Remove and return every queued message.
pub async fn take(session: &Session) -> Vec<FlashMessage> {
    match session.remove::<Vec<FlashMessage>>(FLASH_KEY).await {
        Ok(messages) => messages.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read flash messages");
            Vec::new()
        }
    }
}
