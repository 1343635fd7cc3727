//! Product handlers: map HTTP requests to service calls and service results
//! to status codes. Absence maps to 404, validation failures to 400.

use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::product::{Product, ProductDraft};
use crate::service::{DraftValidator, ProductService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

/// Unwrap the body extraction and run boundary validation. A malformed or
/// incomplete body (missing field, wrong type, bad JSON) is a validation
/// failure, not the extractor's default 422.
fn valid_draft(body: Result<Json<ProductDraft>, JsonRejection>) -> Result<ProductDraft, AppError> {
    let Json(draft) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    DraftValidator::validate(&draft)?;
    Ok(draft)
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductService::get_all(state.store.as_ref()).await?;
    Ok(Json(products))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::get_by_id(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(Json(product))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let draft = valid_draft(body)?;
    let product = ProductService::add(state.store.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let draft = valid_draft(body)?;
    let product = ProductService::update(state.store.as_ref(), id, &draft)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(Json(product))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if ProductService::delete(state.store.as_ref(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(id.to_string()))
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductService::search(state.store.as_ref(), &filter).await?;
    Ok(Json(products))
}
