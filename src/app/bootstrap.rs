//! Process-wide store initialization: connect, verify, create schema, seed.

use crate::infra::config::{AppConfig, DatabaseConfig};
use crate::storage::{ensure_schema, load_seed_data, SeedReport};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use tokio::sync::OnceCell;
use tracing::info;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Initializes the catalog store once per process and returns the shared pool.
///
/// Concurrent callers wait for the first one to finish. If initialization
/// fails the error is returned and a later call may try again; callers are
/// expected to treat any error here as fatal.
pub async fn initialize(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = POOL
        .get_or_try_init(|| async {
            let pool = connect(&config.database).await?;
            bootstrap(&pool, &config.seed_path).await?;
            Ok::<_, anyhow::Error>(pool)
        })
        .await?;
    Ok(pool.clone())
}

/// Opens a connection pool using the configured credentials.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let options = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to open DB connection")?;
    Ok(pool)
}

/// Liveness check against the store.
pub async fn ping(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Failed to connect to DB")?;
    Ok(())
}

/// Verifies connectivity, creates the schema and loads the seed dataset on an
/// existing pool. Does not touch the process-wide guard.
pub async fn bootstrap(pool: &PgPool, seed_path: &Path) -> anyhow::Result<SeedReport> {
    ping(pool).await?;
    info!("Connected to PostgreSQL successfully");

    ensure_schema(pool).await?;
    load_seed_data(pool, seed_path).await
}
