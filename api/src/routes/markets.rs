//! Market API routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use radar_db::MarketBoard;
use radar_scoring::views::{self, limits, SortKey};

use super::items::{CoinItem, ExplodingItem, ListParams, TrendItem};
use crate::{error::ApiResult, AppState};

/// Largest page a list endpoint will return
pub(crate) const MAX_LIMIT: usize = 150;

/// Query params for the trending table
#[derive(Debug, Deserialize)]
pub struct MarketParams {
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

/// Query params for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/markets
/// Returns coins ranked by trend score, volume or market cap
pub async fn get_markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarketParams>,
) -> ApiResult<Json<Vec<TrendItem>>> {
    let limit = params.limit.unwrap_or(limits::TRENDING).min(MAX_LIMIT);
    let sort_key = SortKey::from_param(params.sort.as_deref());

    let coins = MarketBoard::latest_coins(state.store.as_ref()).await?;
    let items: Vec<TrendItem> = views::rank_trending(&coins, sort_key, limit)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(items))
}

/// GET /api/markets/exploding
/// Returns small caps with abnormal volume and strong daily gains
pub async fn get_new_and_exploding(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ExplodingItem>>> {
    let limit = params.limit.unwrap_or(limits::NEW_AND_EXPLODING).min(MAX_LIMIT);

    let coins = MarketBoard::latest_coins(state.store.as_ref()).await?;
    let items: Vec<ExplodingItem> = views::new_and_exploding(&coins, limit)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(items))
}

/// GET /api/markets/focus
/// Returns the strongest intraday movers
pub async fn get_daily_focus(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<TrendItem>>> {
    let limit = params.limit.unwrap_or(limits::DAILY_FOCUS).min(MAX_LIMIT);

    let coins = MarketBoard::latest_coins(state.store.as_ref()).await?;
    let items: Vec<TrendItem> = views::daily_focus(&coins, limit)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(items))
}

/// GET /api/search
/// Returns coins matching `q` by name or symbol
pub async fn search_coins(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<CoinItem>>> {
    let limit = params.limit.map(|l| l.min(MAX_LIMIT));
    let query = params.q.unwrap_or_default();

    let coins = MarketBoard::latest_coins(state.store.as_ref()).await?;
    let items: Vec<CoinItem> = views::search(&coins, &query, limit)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(items))
}

/// GET /api/trending
/// Proxies CoinGecko's trending searches
pub async fn get_trending(State(state): State<Arc<AppState>>) -> ApiResult<Json<serde_json::Value>> {
    let trending = state.coingecko.fetch_trending().await?;
    Ok(Json(trending))
}
