//! Sale handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use kirana_core::models::{NewSale, SaleTransaction};

/// Query parameters for listing sales
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    /// Most-recent-first cap on the result size
    pub limit: Option<usize>,
}

/// Response for a recorded sale
#[derive(Debug, Serialize)]
pub struct RecordSaleResponse {
    pub id: i64,
    pub revenue: f64,
}

/// GET /api/shops/:id/sales - List a shop's sales
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    Query(params): Query<SalesQuery>,
) -> Result<Json<Vec<SaleTransaction>>, AppError> {
    Ok(Json(state.db.list_sales(shop_id, params.limit)?))
}

/// POST /api/shops/:id/sales - Record a sale
///
/// Decrements the matched product's stock; the sale is recorded even when
/// no product matches the name (the ledger is the source of truth).
pub async fn record_sale(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    Json(body): Json<NewSale>,
) -> Result<Json<RecordSaleResponse>, AppError> {
    state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    if body.product_name.trim().is_empty() {
        return Err(AppError::bad_request("Product name is required"));
    }
    if body.quantity <= 0.0 {
        return Err(AppError::bad_request("Quantity must be positive"));
    }
    if body.unit_price < 0.0 {
        return Err(AppError::bad_request("Unit price cannot be negative"));
    }

    let revenue = body.revenue();
    let id = state.db.record_sale(shop_id, &body)?;

    Ok(Json(RecordSaleResponse { id, revenue }))
}
