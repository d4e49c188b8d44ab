//! Watchlist API routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use radar_db::{MarketBoard, Watchlist};
use radar_scoring::views;

use super::items::WatchItem;
use crate::{error::ApiResult, AppState};

/// Result of a watchlist change
#[derive(Debug, Serialize)]
pub struct WatchState {
    pub id: String,
    pub watching: bool,
}

/// GET /api/watchlist
/// Returns watched coins present on the latest board
pub async fn get_watchlist(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<WatchItem>>> {
    let watchlist = Watchlist::load(state.store.as_ref()).await?;
    let coins = MarketBoard::latest_coins(state.store.as_ref()).await?;

    let items: Vec<WatchItem> = views::watchlist_rows(&coins, &watchlist)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(items))
}

/// POST /api/watchlist/:id
/// Adds the coin if absent, removes it if present
pub async fn toggle_watch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<WatchState>> {
    let _guard = state.watchlist_lock.lock().await;

    let mut watchlist = Watchlist::load(state.store.as_ref()).await?;
    let watching = watchlist.toggle(&id);
    watchlist.save(state.store.as_ref()).await?;

    tracing::debug!("Watchlist toggle {} -> {}", id, watching);
    Ok(Json(WatchState { id, watching }))
}

/// DELETE /api/watchlist/:id
/// Removes the coin, a no-op when it was not watched
pub async fn unwatch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<WatchState>> {
    let _guard = state.watchlist_lock.lock().await;

    let mut watchlist = Watchlist::load(state.store.as_ref()).await?;
    if watchlist.remove(&id) {
        watchlist.save(state.store.as_ref()).await?;
    }

    Ok(Json(WatchState {
        id,
        watching: false,
    }))
}
