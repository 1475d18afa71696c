use crate::domain::{Brand, Model, NewBrand, NewModel};
use crate::transport::http::error::HttpError;
use crate::transport::http::handlers::common::{json_body, path_id};
use crate::transport::http::types::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/brands",
    responses(
        (status = 200, description = "All brands, ascending by name", body = [Brand]),
        (status = 404, description = "There are no brands", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_brands_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Brand>>, HttpError> {
    let brands = state.catalog.list_brands().await?;
    if brands.is_empty() {
        return Err(HttpError::NotFound("There are no brands".to_string()));
    }
    Ok(Json(brands))
}

#[utoipa::path(
    post,
    path = "/brands",
    request_body = NewBrand,
    responses(
        (status = 201, description = "Brand created", body = Brand),
        (status = 400, description = "Invalid request body", body = ErrorBody),
        (status = 409, description = "Brand name already exists", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_brand_handler(
    State(state): State<AppState>,
    request: Result<Json<NewBrand>, JsonRejection>,
) -> Result<(StatusCode, Json<Brand>), HttpError> {
    let brand = json_body(request)?;
    let created = state.catalog.insert_brand(brand).await?;
    debug!("Created brand {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/brands/{id}/models",
    params(
        ("id" = i32, Path, description = "Brand id")
    ),
    responses(
        (status = 200, description = "Models of the brand, ascending by name", body = [Model]),
        (status = 400, description = "Invalid brand ID", body = ErrorBody),
        (status = 404, description = "There are no models", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_brand_models_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Model>>, HttpError> {
    let brand_id = path_id(id, "brand")?;
    let models = state.catalog.list_models_by_brand(brand_id).await?;
    if models.is_empty() {
        return Err(HttpError::NotFound("There are no models".to_string()));
    }
    Ok(Json(models))
}

#[utoipa::path(
    post,
    path = "/brands/{id}/models",
    params(
        ("id" = i32, Path, description = "Brand id")
    ),
    request_body = NewModel,
    responses(
        (status = 201, description = "Model created", body = Model),
        (status = 400, description = "Invalid brand ID or request body", body = ErrorBody),
        (status = 404, description = "Brand not found", body = ErrorBody),
        (status = 409, description = "Model name already exists for this brand", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_brand_model_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    request: Result<Json<NewModel>, JsonRejection>,
) -> Result<(StatusCode, Json<Model>), HttpError> {
    let brand_id = path_id(id, "brand")?;
    let model = json_body(request)?;
    let created = state.catalog.insert_model(brand_id, model).await?;
    debug!("Created model {} under brand {}", created.id, brand_id);
    Ok((StatusCode::CREATED, Json(created)))
}
