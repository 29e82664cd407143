//! Handlers for the five list routes. Mutating routes answer a bare 200 with
//! no body. Request bodies are any JSON string or `null`.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::error::ApiError;
use crate::middleware::ResolvedResource;
use crate::store::Item;

pub async fn list_items(
    Extension(resource): Extension<ResolvedResource>,
) -> Json<Vec<Item>> {
    Json(resource.store.list())
}

pub async fn get_item(
    Extension(resource): Extension<ResolvedResource>,
    Path((_, id)): Path<(String, i64)>,
) -> Result<Json<Item>, ApiError> {
    resource
        .store
        .get(id)
        .map(Json)
        .map_err(|e| ApiError::from_store(&resource.name, e))
}

pub async fn append_item(
    Extension(resource): Extension<ResolvedResource>,
    Json(value): Json<Item>,
) -> StatusCode {
    resource.store.append(value);
    StatusCode::OK
}

pub async fn replace_item(
    Extension(resource): Extension<ResolvedResource>,
    Path((_, id)): Path<(String, i64)>,
    Json(value): Json<Item>,
) -> Result<StatusCode, ApiError> {
    resource
        .store
        .replace(id, value)
        .map_err(|e| ApiError::from_store(&resource.name, e))?;
    Ok(StatusCode::OK)
}

pub async fn remove_item(
    Extension(resource): Extension<ResolvedResource>,
    Path((_, id)): Path<(String, i64)>,
) -> Result<StatusCode, ApiError> {
    resource
        .store
        .remove(id)
        .map_err(|e| ApiError::from_store(&resource.name, e))?;
    Ok(StatusCode::OK)
}
