//! Tracing setup.
//!
//! Events carry `user_id`, `note_id`, `contact_id` and `email` as structured
//! fields and use these targets:
//!
//! | Target | Events |
//! |--------|--------|
//! | `notes::activity` | note created, updated, deleted |
//! | `auth::session` | session established, destroyed |
//! | `auth::login` | every sign-in attempt with its outcome |
//! | `contact` | contact stored, notification sent or degraded |

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::Log;

/// Install the global subscriber.
///
/// Logs go to stdout; when `settings.dir` is set they are also appended to a
/// daily rolling `notas.log` there. The returned guard flushes the file writer
/// on drop and must be kept alive for the life of the process.
pub fn init(settings: &Log) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer());

    if settings.dir.is_empty() {
        registry.init();
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&settings.dir, "notas.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    registry
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();
    Some(guard)
}
