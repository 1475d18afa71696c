use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A manufacturer/label owning zero or more models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub average_price: Option<f64>,
}

/// Payload for creating a brand. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub average_price: Option<f64>,
}

impl NewBrand {
    pub fn new(name: impl Into<String>, average_price: Option<f64>) -> Self {
        Self {
            name: name.into(),
            average_price,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        super::validate_name("brand", &self.name)
    }
}
