//! Row mappers from Postgres rows to transfer objects.

use crate::domain::{Brand, Model};
use sqlx::postgres::PgRow;
use sqlx::Row;

pub const BRAND_COLUMNS: &str = "id, name, average_price";
pub const MODEL_COLUMNS: &str = "id, name, brand_id, average_price";

pub fn brand_from_row(row: &PgRow) -> Result<Brand, sqlx::Error> {
    Ok(Brand {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        average_price: row.try_get("average_price")?,
    })
}

/// Maps a model row. `brand_name` is optional: only joined queries select it.
pub fn model_from_row(row: &PgRow) -> Result<Model, sqlx::Error> {
    let brand_name = match row.try_get::<String, _>("brand_name") {
        Ok(name) => Some(name),
        Err(sqlx::Error::ColumnNotFound(_)) => None,
        Err(e) => return Err(e),
    };

    Ok(Model {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        average_price: row.try_get("average_price")?,
        brand_id: row.try_get("brand_id")?,
        brand_name,
    })
}
