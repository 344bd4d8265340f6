//! Chat assistant handler

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use kirana_core::snapshot::SnapshotStore;
use kirana_core::{ChatReply, ShopContext};

/// Request body for a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/shops/:id/chat - Answer a question over the shop's live data
///
/// Stateless: no transcript is stored server-side; the client keeps the
/// chat history for display.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<i64>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let shop = state
        .db
        .get_shop(shop_id)?
        .ok_or_else(|| AppError::not_found("Shop not found"))?;

    if body.message.trim().is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }

    let ctx = ShopContext {
        shop_name: shop.name,
        business_type: shop.business_type,
        currency: shop.currency,
    };
    let snapshot = state.db.load_snapshot(shop_id)?;

    let reply = state
        .assistant
        .respond(&body.message, &ctx, &snapshot.products, &snapshot.sales);

    Ok(Json(reply))
}
