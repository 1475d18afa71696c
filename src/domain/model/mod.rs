//! Model records and the rules that apply to them before they reach the store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lowest average price a model may be updated to.
pub const MIN_MODEL_PRICE: f64 = 100_000.0;

/// A product belonging to exactly one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Model {
    pub id: i32,
    pub name: String,
    pub average_price: Option<f64>,
    pub brand_id: i32,
    /// Only filled in on read paths that join the owning brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
}

/// Payload for creating a model under a brand. The id is allocated by the repository.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewModel {
    pub name: String,
    #[serde(default)]
    pub average_price: Option<f64>,
}

impl NewModel {
    pub fn new(name: impl Into<String>, average_price: Option<f64>) -> Self {
        Self {
            name: name.into(),
            average_price,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        super::validate_name("model", &self.name)
    }
}

/// Body of a price update. An absent price is rejected, not treated as "clear".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct PriceUpdate {
    #[serde(default)]
    pub average_price: Option<f64>,
}

/// Exclusive price bounds for listing models. Either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub greater_than: Option<f64>,
    pub less_than: Option<f64>,
}

impl PriceRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn above(price: f64) -> Self {
        Self {
            greater_than: Some(price),
            less_than: None,
        }
    }

    pub fn below(price: f64) -> Self {
        Self {
            greater_than: None,
            less_than: Some(price),
        }
    }

    pub fn between(greater_than: f64, less_than: f64) -> Self {
        Self {
            greater_than: Some(greater_than),
            less_than: Some(less_than),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.greater_than.is_none() && self.less_than.is_none()
    }
}

/// Checks a requested price update against the floor and returns the price to persist.
pub fn validate_price_update(average_price: Option<f64>) -> Result<f64, String> {
    match average_price {
        Some(price) if price.is_finite() && price >= MIN_MODEL_PRICE => Ok(price),
        _ => Err(format!(
            "average_price must be at least {}",
            MIN_MODEL_PRICE as u64
        )),
    }
}
