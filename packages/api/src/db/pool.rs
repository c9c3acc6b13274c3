//! Connection pool setup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::settings::Database;

/// Open a pool against the configured database.
pub async fn connect(settings: &Database) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.connections)
        .acquire_timeout(settings.timeout())
        .connect(&settings.url())
        .await?;
    tracing::info!(host = %settings.host, database = %settings.name, "database pool ready");
    Ok(pool)
}

/// Apply pending schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
