pub mod contact;
pub mod health;
pub mod notes;
pub mod pages;
pub mod users;

use api::UserInfo;
use tower_sessions::Session;
use ui::PageContext;

use crate::flash;

/// Page context for `user`, consuming any pending flash messages.
async fn page(session: &Session, user: Option<UserInfo>) -> PageContext {
    PageContext::new(user, flash::take(session).await)
}
