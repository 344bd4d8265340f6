//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use kirana_core::insights::Insight;
use kirana_core::snapshot::SnapshotStore;

/// GET /api/shops/:id/insights - Generate insights for a shop
///
/// Loads a fresh snapshot and runs the full rule set. Insights are never
/// persisted; every call reflects the data as of right now.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<Insight>>, AppError> {
    state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    let snapshot = state.db.load_snapshot(shop_id)?;
    let insights = state.engine.generate(&snapshot);

    Ok(Json(insights))
}
