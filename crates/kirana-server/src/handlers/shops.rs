//! Shop handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use kirana_core::models::{DashboardStats, Shop};

/// Request body for creating a shop
#[derive(Debug, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    pub business_type: String,
    /// Display currency symbol, ₹ if omitted
    pub currency: Option<String>,
}

/// GET /api/shops - List all shops
pub async fn list_shops(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Shop>>, AppError> {
    Ok(Json(state.db.list_shops()?))
}

/// POST /api/shops - Create a shop
pub async fn create_shop(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateShopRequest>,
) -> Result<Json<Shop>, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Shop name is required"));
    }

    let currency = body.currency.as_deref().unwrap_or("₹");
    let id = state.db.create_shop(name, body.business_type.trim(), currency)?;

    let shop = state
        .db
        .get_shop(id)?
        .ok_or_else(|| AppError::not_found("Shop not found after create"))?;

    Ok(Json(shop))
}

/// GET /api/shops/:id - Get a shop
pub async fn get_shop(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Shop>, AppError> {
    let shop = state
        .db
        .get_shop(id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;
    Ok(Json(shop))
}

/// GET /api/shops/:id/dashboard - Canned stats for the overview screen
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DashboardStats>, AppError> {
    state
        .db
        .get_shop(id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    Ok(Json(state.db.dashboard_stats(id)?))
}
