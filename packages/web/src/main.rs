use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use api::db::{self, PgStore};
use api::{mailer, ContactService, Credentials, Dispatcher, NoteRepository, Settings};
use tokio::net::TcpListener;
use tokio::signal;
use tower_sessions::cookie::SameSite;
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use web::AppState;

const EXPIRED_SESSION_SWEEP: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Failed to load settings")?;
    let _log_guard = api::logging::init(&settings.log);

    let pool = db::connect(&settings.database)
        .await
        .context("Failed to connect to database")?;
    db::migrate(&pool).await.context("Failed to run migrations")?;

    // Session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;
    let sweeper = tokio::spawn(delete_expired_sessions(session_store.clone()));

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.server.is_production())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(settings.session.hours)));

    let store = PgStore::new(pool.clone());
    let timeout = settings.database.timeout();
    let dispatcher = Dispatcher::new(mailer::from_settings(&settings.mail), &settings.mail);
    let state = AppState::new(
        Credentials::new(Arc::new(store.clone()), timeout),
        NoteRepository::new(Arc::new(store.clone()), timeout),
        ContactService::new(Arc::new(store), dispatcher, timeout),
        settings.clone(),
    );

    let router = web::app(state, session_layer);

    let addr = settings.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(environment = %settings.server.environment, "Server listening on {}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    sweeper.abort();
    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn delete_expired_sessions(store: PostgresStore) {
    let mut interval = tokio::time::interval(EXPIRED_SESSION_SWEEP);
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            tracing::warn!(error = %e, "failed to delete expired sessions");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
