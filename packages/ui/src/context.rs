use api::UserInfo;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Data every page needs: who is signed in and what to flash.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub user: Option<UserInfo>,
    pub flashes: Vec<FlashMessage>,
    pub year: i32,
    pub version: &'static str,
}

impl PageContext {
    pub fn new(user: Option<UserInfo>, flashes: Vec<FlashMessage>) -> Self {
        Self {
            user,
            flashes,
            year: chrono::Utc::now().year(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
