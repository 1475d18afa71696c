//! Seed loader: populates the catalog from the bundled models dataset.
//!
//! The dataset is a JSON array of models, each naming its brand. Brands are
//! upserted by name (so re-running is harmless) and models are inserted with
//! their dataset ids only when no model with that id exists yet. Nothing here
//! runs in a transaction; a crash mid-load is repaired by the next run.

use anyhow::Context;
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// One element of the seed dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedEntry {
    pub id: i32,
    pub name: String,
    pub brand_name: String,
    #[serde(default)]
    pub average_price: Option<f64>,
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub brands_resolved: usize,
    pub models_inserted: usize,
    pub models_present: usize,
    pub models_failed: usize,
}

/// Parses a seed dataset.
pub fn parse_seed_data(bytes: &[u8]) -> anyhow::Result<Vec<SeedEntry>> {
    serde_json::from_slice(bytes).context("Failed to parse seed dataset")
}

/// Reads and parses the dataset at `path`.
pub async fn read_seed_file(path: &Path) -> anyhow::Result<Vec<SeedEntry>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read seed dataset {}", path.display()))?;
    parse_seed_data(&bytes).with_context(|| format!("Invalid seed dataset {}", path.display()))
}

/// Distinct brand names in order of first appearance.
pub fn distinct_brand_names(entries: &[SeedEntry]) -> Vec<&str> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| e.brand_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Reads the dataset at `path` and seeds it into the store.
pub async fn load_seed_data(pool: &PgPool, path: &Path) -> anyhow::Result<SeedReport> {
    let entries = read_seed_file(path).await?;
    info!(
        "Loading {} seed models from {}",
        entries.len(),
        path.display()
    );
    seed_entries(pool, &entries).await
}

/// Seeds already-parsed entries.
///
/// Brand upsert failures abort the run; per-model failures are logged and skipped.
pub async fn seed_entries(pool: &PgPool, entries: &[SeedEntry]) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    let mut brand_ids: HashMap<&str, i32> = HashMap::new();
    for name in distinct_brand_names(entries) {
        let id = upsert_brand(pool, name)
            .await
            .with_context(|| format!("Failed to insert brand {}", name))?;
        brand_ids.insert(name, id);
    }
    report.brands_resolved = brand_ids.len();

    for entry in entries {
        // Every name was resolved above.
        let Some(&brand_id) = brand_ids.get(entry.brand_name.as_str()) else {
            continue;
        };

        let lookup = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM models WHERE id = $1)",
        )
        .bind(entry.id)
        .fetch_one(pool)
        .await;

        let exists = match lookup {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Error checking if model {} exists: {}", entry.id, e);
                report.models_failed += 1;
                continue;
            }
        };

        if exists {
            report.models_present += 1;
            continue;
        }

        let inserted = sqlx::query(
            "INSERT INTO models (id, name, brand_id, average_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(entry.id)
        .bind(&entry.name)
        .bind(brand_id)
        .bind(entry.average_price)
        .execute(pool)
        .await;

        match inserted {
            Ok(_) => {
                debug!("Seeded model {} ({})", entry.id, entry.name);
                report.models_inserted += 1;
            }
            Err(e) => {
                warn!("Could not insert model {}: {}", entry.name, e);
                report.models_failed += 1;
            }
        }
    }

    info!(
        brands = report.brands_resolved,
        inserted = report.models_inserted,
        present = report.models_present,
        failed = report.models_failed,
        "Seed data loaded"
    );
    Ok(report)
}

/// Insert-or-reaffirm by name, returning the brand id either way.
async fn upsert_brand(pool: &PgPool, name: &str) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO brands (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}
