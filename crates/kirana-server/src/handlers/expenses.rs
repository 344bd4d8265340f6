//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use kirana_core::models::{Expense, NewExpense};

/// GET /api/shops/:id/expenses - List a shop's expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Expense>>, AppError> {
    Ok(Json(state.db.list_expenses(shop_id)?))
}

/// POST /api/shops/:id/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    Json(body): Json<NewExpense>,
) -> Result<Json<Expense>, AppError> {
    state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    if body.amount <= 0.0 {
        return Err(AppError::bad_request("Amount must be positive"));
    }

    let id = state.db.create_expense(shop_id, &body)?;
    let created = state
        .db
        .list_expenses(shop_id)?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::not_found("Expense not found after create"))?;

    Ok(Json(created))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_expense(id).map_err(|e| match e {
        kirana_core::Error::NotFound(_) => AppError::not_found("Expense not found"),
        other => other.into(),
    })?;

    Ok(Json(SuccessResponse { success: true }))
}
