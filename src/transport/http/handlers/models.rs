use crate::domain::{Model, PriceUpdate};
use crate::transport::http::error::HttpError;
use crate::transport::http::handlers::common::{json_body, path_id, price_range};
use crate::transport::http::types::{AppState, ModelFilterQuery};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/models",
    params(ModelFilterQuery),
    responses(
        (status = 200, description = "Models within the bounds, ascending by average price", body = [Model]),
        (status = 400, description = "Invalid bound", body = ErrorBody),
        (status = 404, description = "There are no models", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_models_handler(
    State(state): State<AppState>,
    query: Result<Query<ModelFilterQuery>, QueryRejection>,
) -> Result<Json<Vec<Model>>, HttpError> {
    let Query(query) =
        query.map_err(|e| HttpError::BadRequest(format!("Invalid query: {}", e.body_text())))?;
    let range = price_range(&query)?;

    let models = state.catalog.list_models(range).await?;
    if models.is_empty() {
        return Err(HttpError::NotFound("There are no models".to_string()));
    }
    Ok(Json(models))
}

#[utoipa::path(
    put,
    path = "/models/{id}",
    params(
        ("id" = i32, Path, description = "Model id")
    ),
    request_body = PriceUpdate,
    responses(
        (status = 200, description = "Updated model", body = Model),
        (status = 400, description = "Invalid model ID, body, or price below 100000", body = ErrorBody),
        (status = 404, description = "Model not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn update_model_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    request: Result<Json<PriceUpdate>, JsonRejection>,
) -> Result<Json<Model>, HttpError> {
    let model_id = path_id(id, "model")?;
    let update = json_body(request)?;
    let updated = state
        .catalog
        .update_model_price(model_id, update.average_price)
        .await?;
    Ok(Json(updated))
}
