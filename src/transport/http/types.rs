use crate::app::catalog_service::CatalogService;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

/// Error body returned by every failing route.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Price filters for `GET /models`. Raw strings so malformed numbers can be
/// reported as a 400 with a specific message.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ModelFilterQuery {
    /// Only models priced strictly above this value.
    #[param(value_type = Option<f64>)]
    pub greater: Option<String>,
    /// Only models priced strictly below this value.
    #[param(value_type = Option<f64>)]
    pub lower: Option<String>,
}
