//! Startup bootstrap and seeding against a live PostgreSQL (skipped when none is configured).

mod common;

use brand_catalog::storage::seed::{parse_seed_data, seed_entries};
use brand_catalog::{bootstrap, CatalogService, NewModel, PriceRange, SeedReport};
use common::{bundled_seed_path, seed_file, TestDb};
use std::path::Path;

async fn counts(catalog: &CatalogService) -> anyhow::Result<(usize, usize)> {
    Ok((
        catalog.list_brands().await?.len(),
        catalog.list_models(PriceRange::unbounded()).await?.len(),
    ))
}

#[tokio::test]
async fn single_entry_dataset_seeds_one_brand_and_model() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };
    let file = seed_file(r#"[{"id": 1, "name": "X", "brand_name": "Acme", "average_price": 50000}]"#);

    let report = bootstrap(&db.pool, file.path()).await?;
    assert_eq!(
        report,
        SeedReport {
            brands_resolved: 1,
            models_inserted: 1,
            models_present: 0,
            models_failed: 0,
        }
    );

    let catalog = CatalogService::new(db.pool.clone());
    let brands = catalog.list_brands().await?;
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].name, "Acme");
    assert_eq!(brands[0].average_price, None);

    let models = catalog.list_models_by_brand(brands[0].id).await?;
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].id, 1);
    assert_eq!(models[0].name, "X");
    assert_eq!(models[0].average_price, Some(50_000.0));

    db.cleanup().await
}

#[tokio::test]
async fn reseeding_is_a_no_op() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };
    let path = bundled_seed_path();
    let catalog = CatalogService::new(db.pool.clone());

    let first = bootstrap(&db.pool, &path).await?;
    assert_eq!(first.models_failed, 0);
    assert_eq!(first.models_present, 0);
    let after_first = counts(&catalog).await?;
    assert_eq!(after_first, (first.brands_resolved, first.models_inserted));

    let second = bootstrap(&db.pool, &path).await?;
    assert_eq!(second.brands_resolved, first.brands_resolved);
    assert_eq!(second.models_inserted, 0);
    assert_eq!(second.models_present, first.models_inserted);
    assert_eq!(second.models_failed, 0);
    assert_eq!(counts(&catalog).await?, after_first);

    db.cleanup().await
}

#[tokio::test]
async fn brands_are_resolved_once_per_name() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };
    let file = seed_file(
        r#"[
            {"id": 1, "name": "A", "brand_name": "Acme", "average_price": 1},
            {"id": 2, "name": "B", "brand_name": "Globex", "average_price": 2},
            {"id": 3, "name": "C", "brand_name": "Acme"}
        ]"#,
    );

    let report = bootstrap(&db.pool, file.path()).await?;
    assert_eq!(report.brands_resolved, 2);
    assert_eq!(report.models_inserted, 3);

    let catalog = CatalogService::new(db.pool.clone());
    let brands = catalog.list_brands().await?;
    let acme = brands.iter().find(|b| b.name == "Acme").expect("Acme seeded");
    let acme_models = catalog.list_models_by_brand(acme.id).await?;
    let ids: Vec<i32> = acme_models.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);

    db.cleanup().await
}

#[tokio::test]
async fn failing_rows_are_skipped_not_fatal() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };
    // Ids 1 and 2 share (name, brand); the second insert violates uniqueness.
    let file = seed_file(
        r#"[
            {"id": 1, "name": "X", "brand_name": "Acme", "average_price": 100},
            {"id": 2, "name": "X", "brand_name": "Acme", "average_price": 200},
            {"id": 3, "name": "Y", "brand_name": "Acme", "average_price": 300}
        ]"#,
    );

    let report = bootstrap(&db.pool, file.path()).await?;
    assert_eq!(report.models_inserted, 2);
    assert_eq!(report.models_failed, 1);

    let catalog = CatalogService::new(db.pool.clone());
    let ids: Vec<i32> = catalog
        .list_models(PriceRange::unbounded())
        .await?
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);

    db.cleanup().await
}

#[tokio::test]
async fn application_models_continue_after_seeded_ids() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };
    let file = seed_file(
        r#"[
            {"id": 7, "name": "Seven", "brand_name": "Acme"},
            {"id": 3, "name": "Three", "brand_name": "Acme"}
        ]"#,
    );
    bootstrap(&db.pool, file.path()).await?;

    let catalog = CatalogService::new(db.pool.clone());
    let acme = catalog.list_brands().await?.remove(0);
    let created = catalog.insert_model(acme.id, NewModel::new("Eight", None)).await?;
    assert_eq!(created.id, 8);

    db.cleanup().await
}

#[tokio::test]
async fn seeding_parsed_entries_directly() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };
    brand_catalog::storage::ensure_schema(&db.pool).await?;

    let entries = parse_seed_data(br#"[{"id": 1, "name": "X", "brand_name": "Acme"}]"#)?;
    let report = seed_entries(&db.pool, &entries).await?;
    assert_eq!(report.models_inserted, 1);

    db.cleanup().await
}

#[tokio::test]
async fn unreadable_or_malformed_dataset_is_fatal() -> anyhow::Result<()> {
    let Some(db) = TestDb::create().await? else {
        return Ok(());
    };

    let missing = bootstrap(&db.pool, Path::new("/nonexistent/models.json")).await;
    assert!(missing.is_err());

    let malformed = seed_file(r#"{"not": "an array"}"#);
    assert!(bootstrap(&db.pool, malformed.path()).await.is_err());

    // Schema creation ran before the dataset failed; nothing was seeded.
    let catalog = CatalogService::new(db.pool.clone());
    assert_eq!(counts(&catalog).await?, (0, 0));

    db.cleanup().await
}
