//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POSTGRES_HOST: &str = "db";
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SEED_DATA_PATH: &str = "config/json/models.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Connection settings for the catalog store.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL. When present it wins over the individual fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<set>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// Builds sqlx connect options. The discrete form always disables TLS,
    /// matching the compose setup the service ships with.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid Postgres connection string");
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable))
    }
}

/// Everything the service reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub seed_path: PathBuf,
    pub bind_addr: String,
    pub shutdown_grace: Duration,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// Callers are expected to have loaded `.env` already (see the binaries).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = get("DATABASE_URL");
        let required = |key: &str| -> anyhow::Result<String> {
            match get(key) {
                Some(v) => Ok(v),
                // A full URL carries the credentials itself.
                None if url.is_some() => Ok(String::new()),
                None => Err(anyhow!("{} must be set (or provide DATABASE_URL)", key)),
            }
        };

        let database = DatabaseConfig {
            host: get("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_POSTGRES_HOST.to_string()),
            port: parse_or("POSTGRES_PORT", get("POSTGRES_PORT"), DEFAULT_POSTGRES_PORT)?,
            user: required("POSTGRES_USER")?,
            password: required("POSTGRES_PASSWORD")?,
            database: required("POSTGRES_DB")?,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?
            .max(1),
            url,
        };

        let grace_secs = parse_or(
            "SHUTDOWN_GRACE_SECS",
            get("SHUTDOWN_GRACE_SECS"),
            DEFAULT_SHUTDOWN_GRACE_SECS,
        )?;

        Ok(Self {
            database,
            seed_path: get("SEED_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_DATA_PATH)),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            shutdown_grace: Duration::from_secs(grace_secs),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number (got {:?})", key, v)),
        None => Ok(default),
    }
}
