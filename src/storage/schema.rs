//! The persisted catalog schema.
//!
//! Column names, types, nullability and constraints here are the service's
//! compatibility contract with existing databases; change them only together
//! with a data migration.

use anyhow::Context;
use sqlx::PgPool;

pub const BRANDS_TABLE: &str = "brands";
pub const MODELS_TABLE: &str = "models";

/// Name Postgres gives the primary key of `models`.
pub const MODELS_PRIMARY_KEY: &str = "models_pkey";

pub const CREATE_BRANDS_TABLE: &str = "CREATE TABLE IF NOT EXISTS brands (
    id SERIAL PRIMARY KEY,
    name TEXT UNIQUE NOT NULL,
    average_price DOUBLE PRECISION
)";

pub const CREATE_MODELS_TABLE: &str = "CREATE TABLE IF NOT EXISTS models (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    brand_id INTEGER NOT NULL REFERENCES brands(id) ON DELETE CASCADE,
    average_price DOUBLE PRECISION,
    UNIQUE (name, brand_id)
)";

/// Creates both tables if absent. `brands` must exist before `models` references it.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(CREATE_BRANDS_TABLE)
        .execute(pool)
        .await
        .context("Could not create brands table")?;

    sqlx::query(CREATE_MODELS_TABLE)
        .execute(pool)
        .await
        .context("Could not create models table")?;

    Ok(())
}

/// Whether `table` exists in the connection's current schema.
pub async fn table_exists(pool: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
         )",
    )
    .bind(table)
    .fetch_one(pool)
    .await
}
