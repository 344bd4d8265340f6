//! Product handlers: CRUD plus CSV import/export

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState, SuccessResponse, MAX_IMPORT_SIZE};
use kirana_core::models::{NewProduct, Product};
use kirana_core::{export, import, validate};

/// Normalize and sanity-check product fields shared by create and update
fn normalize(mut product: NewProduct) -> Result<NewProduct, AppError> {
    product.name = validate::validate_product_name(&product.name)
        .map_err(|e| AppError::bad_request(&e.to_string()))?;
    product.unit = validate::normalize_unit(&product.unit);
    product.category = product
        .category
        .as_deref()
        .map(validate::normalize_category)
        .filter(|c| !c.is_empty());

    if product.quantity_on_hand < 0.0 || product.reorder_level < 0.0 {
        return Err(AppError::bad_request("Quantities cannot be negative"));
    }
    if product.selling_price < 0.0 || product.cost_price < 0.0 {
        return Err(AppError::bad_request("Prices cannot be negative"));
    }
    Ok(product)
}

/// GET /api/shops/:id/products - List a shop's products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.db.list_products(shop_id)?))
}

/// POST /api/shops/:id/products - Create a product
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    Json(body): Json<NewProduct>,
) -> Result<Json<Product>, AppError> {
    state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    let product = normalize(body)?;

    if state.db.get_product_by_name(shop_id, &product.name)?.is_some() {
        return Err(AppError::conflict("A product with this name already exists"));
    }

    let id = state.db.create_product(shop_id, &product)?;
    let created = state
        .db
        .get_product(id)?
        .ok_or_else(|| AppError::not_found("Product not found after create"))?;

    Ok(Json(created))
}

/// GET /api/products/:id - Get a product
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .db
        .get_product(id)?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

/// PUT /api/products/:id - Update a product
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewProduct>,
) -> Result<Json<Product>, AppError> {
    let product = normalize(body)?;

    state.db.update_product(id, &product).map_err(|e| match e {
        kirana_core::Error::NotFound(_) => AppError::not_found("Product not found"),
        other => other.into(),
    })?;

    let updated = state
        .db
        .get_product(id)?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(updated))
}

/// DELETE /api/products/:id - Delete a product
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_product(id).map_err(|e| match e {
        kirana_core::Error::NotFound(_) => AppError::not_found("Product not found"),
        other => other.into(),
    })?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Response for a CSV import
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub errors: Vec<String>,
}

/// POST /api/shops/:id/products/import - Bulk import products from a CSV body
///
/// Bad rows are reported back, good rows are inserted. Duplicate names are
/// reported as errors rather than overwriting existing products.
pub async fn import_products(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    if body.len() > MAX_IMPORT_SIZE {
        return Err(AppError::bad_request("Import file too large"));
    }

    let parsed = match import::parse_products_csv(body.as_bytes()) {
        Ok(parsed) => parsed,
        // Structural problems (no name column, unreadable header) are the
        // caller's to fix, not a server fault
        Err(kirana_core::Error::Import(msg)) => return Err(AppError::bad_request(&msg)),
        Err(kirana_core::Error::Csv(e)) => return Err(AppError::bad_request(&e.to_string())),
        Err(e) => return Err(e.into()),
    };
    let mut imported = 0;
    let mut errors = parsed.errors;

    for product in &parsed.products {
        if state.db.get_product_by_name(shop_id, &product.name)?.is_some() {
            errors.push(format!("{}: product already exists", product.name));
            continue;
        }
        state.db.create_product(shop_id, product)?;
        imported += 1;
    }

    Ok(Json(ImportResponse { imported, errors }))
}

/// GET /api/shops/:id/export/products - Products as CSV
pub async fn export_products(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.db.list_products(shop_id)?;

    let mut buf = Vec::new();
    export::write_products_csv(&mut buf, &products)?;

    Ok(([(header::CONTENT_TYPE, "text/csv")], buf))
}

/// GET /api/shops/:id/export/sales - Sales as CSV
pub async fn export_sales(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sales = state.db.list_sales(shop_id, None)?;

    let mut buf = Vec::new();
    export::write_sales_csv(&mut buf, &sales)?;

    Ok(([(header::CONTENT_TYPE, "text/csv")], buf))
}
