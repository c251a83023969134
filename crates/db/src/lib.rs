//! SQLite connection factory and migration runner for SHELF services.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use shelf_kernel::settings::DatabaseSettings;
use shelf_kernel::Migration;

const MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS shelf_migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (module, id)
    )
"#;

/// Open the file-backed pool for `service`, creating the file on first run.
pub async fn connect(settings: &DatabaseSettings, service: &str) -> anyhow::Result<SqlitePool> {
    let db_path = settings.path_for(service);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create database directory at {:?}", parent))?;
    }

    tracing::info!(target: "shelf-db", service, path = ?db_path, "opening database");

    connect_file(&db_path, settings.max_connections).await
}

async fn connect_file(path: &Path, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to create SQLite pool at {:?}", path))
}

/// Open a private in-memory database.
///
/// Every SQLite memory connection is its own database, so the pool is capped
/// at a single connection that is never recycled.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .context("invalid in-memory SQLite url")?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
        .context("failed to create in-memory SQLite pool")
}

/// Apply every migration not yet recorded for its module.
///
/// Returns the number of migrations executed by this call.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<usize> {
    sqlx::query(MIGRATIONS_TABLE)
        .execute(pool)
        .await
        .context("failed to create migrations table")?;

    let mut applied = 0;

    for (module, migration) in migrations {
        let seen: Option<(String,)> =
            sqlx::query_as("SELECT id FROM shelf_migrations WHERE module = ? AND id = ?")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await
                .with_context(|| format!("failed to read migration state for '{module}'"))?;

        if seen.is_some() {
            tracing::debug!(target: "shelf-db", module = %module, migration = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool.begin().await.context("failed to open migration transaction")?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;

        sqlx::query("INSERT INTO shelf_migrations (module, id) VALUES (?, ?)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to record migration '{}/{}'", module, migration.id))?;

        tx.commit().await.context("failed to commit migration")?;

        tracing::info!(target: "shelf-db", module = %module, migration = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
