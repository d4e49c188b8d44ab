//! Sector API routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use radar_db::{CategoryBoard, CoinMarket, MarketBoard};
use radar_scoring::views::{self, limits, ScoredCoin, SectorHeat};

use super::{
    items::{ListParams, TrendItem},
    markets::MAX_LIMIT,
};
use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// Heatmap tile
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorItem {
    pub id: String,
    pub name: String,
    pub market_cap: f64,
    pub volume24h: f64,
    pub avg_change: f64,
    pub vol_ratio: f64,
    pub heat: i32,
    pub basis: String,
}

impl From<SectorHeat> for SectorItem {
    fn from(s: SectorHeat) -> Self {
        Self {
            id: s.category.id,
            name: s.category.name,
            market_cap: s.category.market_cap,
            volume24h: s.category.volume_24h,
            avg_change: s.avg_change,
            vol_ratio: s.vol_ratio,
            heat: s.heat,
            basis: s.basis,
        }
    }
}

/// Where a sector's coin list came from
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CoinSource {
    /// Fresh per-category listing from CoinGecko
    Live,
    /// Top-three coins matched against the stored market board
    Board,
}

/// Sector overview with its member coins
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorDetail {
    #[serde(flatten)]
    pub sector: SectorItem,
    pub source: CoinSource,
    pub coins: Vec<TrendItem>,
}

/// GET /api/sectors
/// Returns heatmap tiles for the first categories
pub async fn get_sectors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<SectorItem>>> {
    let limit = params.limit.unwrap_or(limits::SECTORS).min(MAX_LIMIT);

    let categories = CategoryBoard::latest_categories(state.store.as_ref()).await?;
    let items: Vec<SectorItem> = views::sector_heatmap(&categories, limit)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(items))
}

/// GET /api/sectors/:id
/// Returns the sector's heat, commentary and scored member coins
pub async fn get_sector(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SectorDetail>> {
    let categories = CategoryBoard::latest_categories(state.store.as_ref()).await?;
    let category = categories
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(ApiError::NotFound("Sector"))?;

    let live = match state.coingecko.fetch_sector_markets(&category.id).await {
        Ok(coins) => coins,
        Err(e) => {
            tracing::warn!("Sector fetch for {} failed, using board: {}", category.id, e);
            Vec::new()
        }
    };

    let (source, coins) = if live.is_empty() {
        let markets = MarketBoard::latest_coins(state.store.as_ref()).await?;
        (
            CoinSource::Board,
            views::sector_members_fallback(&category, &markets),
        )
    } else {
        let coins: Vec<CoinMarket> = live.into_iter().map(CoinMarket::sanitized).collect();
        (CoinSource::Live, coins)
    };

    let coins: Vec<TrendItem> = coins
        .into_iter()
        .map(|c| ScoredCoin::new(c).into())
        .collect();

    Ok(Json(SectorDetail {
        sector: SectorHeat::new(category).into(),
        source,
        coins,
    }))
}
