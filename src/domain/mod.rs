//! Transfer objects exchanged between the repository and the HTTP layer.

pub mod brand;
pub mod model;

pub use brand::{Brand, NewBrand};
pub use model::{validate_price_update, Model, NewModel, PriceRange, PriceUpdate, MIN_MODEL_PRICE};

/// Required names must contain something other than whitespace.
pub(crate) fn validate_name(entity: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{} name is required", entity));
    }
    Ok(())
}
