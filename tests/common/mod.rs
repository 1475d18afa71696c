//! Shared helpers for tests that need a live PostgreSQL.
//!
//! Tests run only when `TEST_DATABASE_URL` (or `DATABASE_URL`) points at a
//! reachable server; otherwise they print a note and pass. Each test gets its
//! own schema through `search_path` so tests can run in parallel.

#![allow(dead_code)]

use rand::Rng;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::io::Write;
use std::str::FromStr;

pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

pub fn database_url() -> Option<String> {
    dotenv::dotenv().ok();
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

impl TestDb {
    /// Creates an isolated schema, or returns `None` when no database is available.
    pub async fn create() -> anyhow::Result<Option<Self>> {
        let Some(url) = database_url() else {
            eprintln!("skipping: TEST_DATABASE_URL / DATABASE_URL not set");
            return Ok(None);
        };

        let base = PgConnectOptions::from_str(&url)?;
        let admin = match PgPoolOptions::new()
            .max_connections(1)
            .connect_with(base.clone())
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("skipping: database not reachable ({})", e);
                return Ok(None);
            }
        };

        let schema = format!("catalog_test_{:016x}", rand::thread_rng().gen::<u64>());
        sqlx::query(&format!("CREATE SCHEMA {}", schema))
            .execute(&admin)
            .await?;

        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect_with(base.options([("search_path", schema.as_str())]))
            .await?;

        Ok(Some(Self {
            pool,
            admin,
            schema,
        }))
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await?;
        self.admin.close().await;
        Ok(())
    }
}

/// Writes a seed dataset to a temporary file.
pub fn seed_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp seed file");
    file.write_all(json.as_bytes()).expect("write temp seed file");
    file
}

/// Path of the dataset shipped with the service.
pub fn bundled_seed_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/json/models.json")
}
