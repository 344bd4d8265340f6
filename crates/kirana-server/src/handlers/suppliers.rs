//! Supplier handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use kirana_core::models::{NewSupplier, Supplier};
use kirana_core::validate;

fn check_ratings(supplier: &NewSupplier) -> Result<(), AppError> {
    validate::validate_rating(supplier.reliability_score as i64, "Reliability score")
        .map_err(|e| AppError::bad_request(&e.to_string()))?;
    validate::validate_rating(supplier.quality_rating as i64, "Quality rating")
        .map_err(|e| AppError::bad_request(&e.to_string()))?;
    Ok(())
}

/// GET /api/shops/:id/suppliers - List a shop's suppliers, most reliable first
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(state.db.list_suppliers(shop_id)?))
}

/// POST /api/shops/:id/suppliers - Create a supplier
pub async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    Json(body): Json<NewSupplier>,
) -> Result<Json<Supplier>, AppError> {
    state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("Supplier name is required"));
    }
    check_ratings(&body)?;

    let id = state.db.create_supplier(shop_id, &body)?;
    let created = state
        .db
        .get_supplier(id)?
        .ok_or_else(|| AppError::not_found("Supplier not found after create"))?;

    Ok(Json(created))
}

/// GET /api/suppliers/:id - Get a supplier
pub async fn get_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Supplier>, AppError> {
    let supplier = state
        .db
        .get_supplier(id)?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;
    Ok(Json(supplier))
}

/// PUT /api/suppliers/:id - Update a supplier
pub async fn update_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewSupplier>,
) -> Result<Json<Supplier>, AppError> {
    check_ratings(&body)?;

    state.db.update_supplier(id, &body).map_err(|e| match e {
        kirana_core::Error::NotFound(_) => AppError::not_found("Supplier not found"),
        other => other.into(),
    })?;

    let updated = state
        .db
        .get_supplier(id)?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;
    Ok(Json(updated))
}

/// DELETE /api/suppliers/:id - Delete a supplier and its product links
pub async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_supplier(id).map_err(|e| match e {
        kirana_core::Error::NotFound(_) => AppError::not_found("Supplier not found"),
        other => other.into(),
    })?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/suppliers/:id/products/:product_id - Link a product
pub async fn link_supplier_product(
    State(state): State<Arc<AppState>>,
    Path((supplier_id, product_id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .db
        .get_supplier(supplier_id)?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;
    state
        .db
        .get_product(product_id)?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    state.db.link_supplier_product(supplier_id, product_id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/suppliers/:id/products/:product_id - Unlink a product
pub async fn unlink_supplier_product(
    State(state): State<Arc<AppState>>,
    Path((supplier_id, product_id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.unlink_supplier_product(supplier_id, product_id)?;
    Ok(Json(SuccessResponse { success: true }))
}
