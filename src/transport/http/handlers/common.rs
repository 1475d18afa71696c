use crate::domain::PriceRange;
use crate::transport::http::error::HttpError;
use crate::transport::http::types::ModelFilterQuery;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

pub fn path_id(id: Result<Path<i32>, PathRejection>, entity: &str) -> Result<i32, HttpError> {
    id.map(|Path(id)| id)
        .map_err(|_| HttpError::BadRequest(format!("Invalid {} ID", entity)))
}

pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    body.map(|Json(v)| v)
        .map_err(|e| HttpError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

/// Parses an optional numeric query value; an empty string counts as absent.
pub fn price_bound(name: &str, raw: Option<&str>) -> Result<Option<f64>, HttpError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .map(Some)
            .ok_or_else(|| HttpError::BadRequest(format!("Invalid {} value", name))),
    }
}

pub fn price_range(query: &ModelFilterQuery) -> Result<PriceRange, HttpError> {
    Ok(PriceRange {
        greater_than: price_bound("greater", query.greater.as_deref())?,
        less_than: price_bound("lower", query.lower.as_deref())?,
    })
}
