pub mod models;
pub mod outcome;
pub mod pagination;
pub mod repositories;
pub mod seed;

pub use outcome::{Listing, WriteOutcome};
pub use pagination::{PageRequest, Paginated};

use std::{str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    Sqlite, SqlitePool,
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Create a SQLite connection pool.
///
/// In-memory databases live only as long as their connection, so for those the pool
/// never recycles idle connections.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url: {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
    if database_url.contains(":memory:") {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Ensure the database exists and run migrations in this crate's `migrations/` folder.
pub async fn ensure_db_and_migrate(database_url: &str, pool: &SqlitePool) -> anyhow::Result<()> {
    // Ensure database exists (no-op if it already does)
    let exists = Sqlite::database_exists(database_url).await?;
    if !exists {
        Sqlite::create_database(database_url).await?;
    }

    // Run migrations bundled at compile time from `migrations/`
    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    /// Fresh migrated in-memory database.
    pub(crate) async fn pool() -> SqlitePool {
        let pool = crate::create_pool("sqlite::memory:", 1)
            .await
            .expect("failed to open in-memory database");
        crate::ensure_db_and_migrate("sqlite::memory:", &pool)
            .await
            .expect("failed to migrate in-memory database");
        pool
    }
}
