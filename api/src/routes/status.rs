//! Refresh status route

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use radar_db::MarketBoard;
use radar_scoring::views;

use crate::{error::ApiResult, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshStatus {
    pub last_updated: Option<String>,
    pub refresh_label: Option<String>,
    pub coins: usize,
}

/// GET /api/status
/// Returns when the market board was last refreshed
pub async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshStatus>> {
    let status = match MarketBoard::find_latest(state.store.as_ref()).await? {
        Some(board) => RefreshStatus {
            last_updated: Some(board.updated_at.to_rfc3339()),
            refresh_label: Some(views::refresh_label(board.age_secs(Utc::now()))),
            coins: board.coins.len(),
        },
        None => RefreshStatus {
            last_updated: None,
            refresh_label: None,
            coins: 0,
        },
    };

    Ok(Json(status))
}
