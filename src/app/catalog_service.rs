//! The catalog repository.
//!
//! Every operation is a single statement (or, for model inserts, an id lookup
//! followed by one insert) against the shared pool. There are no transactions:
//! uniqueness and foreign-key constraints in the store are what reject invalid
//! concurrent outcomes.

use crate::domain::{validate_price_update, Brand, Model, NewBrand, NewModel, PriceRange};
use crate::storage::rows::{brand_from_row, model_from_row, BRAND_COLUMNS, MODEL_COLUMNS};
use crate::storage::schema::MODELS_PRIMARY_KEY;
use crate::storage::{constraint_violation, ConstraintViolation, RepositoryError};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

/// How many times a model insert re-allocates its id after losing a race
/// for the same `max(id) + 1` to a concurrent insert.
pub const MAX_ID_ALLOCATION_ATTEMPTS: u32 = 3;

/// Typed access to brands and models.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a brand. Fails with `Conflict` if the name is taken.
    pub async fn insert_brand(&self, brand: NewBrand) -> Result<Brand, RepositoryError> {
        brand.validate().map_err(RepositoryError::Validation)?;

        let sql = format!(
            "INSERT INTO brands (name, average_price) VALUES ($1, $2) RETURNING {}",
            BRAND_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&brand.name)
            .bind(brand.average_price)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::Unique(_)) => {
                    RepositoryError::Conflict("brand name already exists".to_string())
                }
                _ => RepositoryError::Store(e),
            })?;

        Ok(brand_from_row(&row)?)
    }

    /// The id the next application-created model would receive.
    pub async fn next_model_id(&self) -> Result<i32, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>("SELECT COALESCE(MAX(id), 0) + 1 FROM models")
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Creates a model under `brand_id` with id `max(id) + 1`.
    ///
    /// Fails with `Conflict` if the brand already has a model with this name and
    /// with `NotFound` if the brand does not exist.
    pub async fn insert_model(
        &self,
        brand_id: i32,
        model: NewModel,
    ) -> Result<Model, RepositoryError> {
        model.validate().map_err(RepositoryError::Validation)?;

        let sql = format!(
            "INSERT INTO models (id, name, brand_id, average_price) VALUES ($1, $2, $3, $4) RETURNING {}",
            MODEL_COLUMNS
        );

        let mut attempt = 1;
        loop {
            let id = self.next_model_id().await?;
            let result = sqlx::query(&sql)
                .bind(id)
                .bind(&model.name)
                .bind(brand_id)
                .bind(model.average_price)
                .fetch_one(&self.pool)
                .await;

            let err = match result {
                Ok(row) => return Ok(model_from_row(&row)?),
                Err(e) => e,
            };

            match constraint_violation(&err) {
                Some(ConstraintViolation::Unique(Some(constraint)))
                    if constraint == MODELS_PRIMARY_KEY =>
                {
                    if attempt >= MAX_ID_ALLOCATION_ATTEMPTS {
                        return Err(RepositoryError::Conflict(format!(
                            "model id {} was taken by a concurrent insert",
                            id
                        )));
                    }
                    debug!("Model id {} taken concurrently, retrying (attempt {})", id, attempt);
                    attempt += 1;
                }
                Some(ConstraintViolation::Unique(_)) => {
                    return Err(RepositoryError::Conflict(
                        "model name already exists for this brand".to_string(),
                    ));
                }
                Some(ConstraintViolation::ForeignKey) => {
                    return Err(RepositoryError::NotFound(format!(
                        "brand {} not found",
                        brand_id
                    )));
                }
                None => return Err(RepositoryError::Store(err)),
            }
        }
    }

    /// All brands, ascending by name.
    pub async fn list_brands(&self) -> Result<Vec<Brand>, RepositoryError> {
        let sql = format!("SELECT {} FROM brands ORDER BY name ASC", BRAND_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let brands = rows
            .iter()
            .map(brand_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(brands)
    }

    /// Models within `range`, ascending by average price.
    pub async fn list_models(&self, range: PriceRange) -> Result<Vec<Model>, RepositoryError> {
        let mut qb = list_models_query(&range);
        debug!("list_models: {}", qb.sql());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let models = rows
            .iter()
            .map(model_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(models)
    }

    /// Models of one brand, ascending by name, with `brand_name` filled in.
    pub async fn list_models_by_brand(&self, brand_id: i32) -> Result<Vec<Model>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT m.id, m.name, m.brand_id, m.average_price, b.name AS brand_name
             FROM models m
             JOIN brands b ON b.id = m.brand_id
             WHERE m.brand_id = $1
             ORDER BY m.name ASC",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        let models = rows
            .iter()
            .map(model_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(models)
    }

    /// Sets a model's average price. The row is untouched if the price is
    /// missing or below the floor.
    pub async fn update_model_price(
        &self,
        id: i32,
        average_price: Option<f64>,
    ) -> Result<Model, RepositoryError> {
        let price = validate_price_update(average_price).map_err(RepositoryError::Validation)?;

        let sql = format!(
            "UPDATE models SET average_price = $1 WHERE id = $2 RETURNING {}",
            MODEL_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(price)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(model_from_row(&row)?),
            None => Err(RepositoryError::NotFound("model not found".to_string())),
        }
    }
}

/// Builds the filtered model listing. Each present bound is a strict inequality.
fn list_models_query(range: &PriceRange) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
    qb.push(MODEL_COLUMNS).push(" FROM models");

    let mut first = true;
    let mut push_condition = |qb: &mut QueryBuilder<'static, Postgres>, op: &str, bound: f64| {
        qb.push(if first { " WHERE " } else { " AND " });
        first = false;
        qb.push("average_price ").push(op).push(" ").push_bind(bound);
    };

    if let Some(greater) = range.greater_than {
        push_condition(&mut qb, ">", greater);
    }
    if let Some(lower) = range.less_than {
        push_condition(&mut qb, "<", lower);
    }

    qb.push(" ORDER BY average_price, id");
    qb
}
