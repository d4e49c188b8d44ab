//! Response items shared by the route modules

use radar_db::CoinMarket;
use radar_scoring::views::{ExplodingCoin, ScoredCoin, WatchBadge, WatchRow};
use serde::Serialize;

/// Coin fields as the frontend reads them
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinItem {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub price_change1h: f64,
    pub price_change24h: f64,
    pub volume24h: f64,
    pub market_cap: f64,
}

impl From<CoinMarket> for CoinItem {
    fn from(c: CoinMarket) -> Self {
        Self {
            price_change1h: c.change_1h(),
            price_change24h: c.change_24h(),
            id: c.id,
            symbol: c.symbol,
            name: c.name,
            image: c.image,
            price: c.current_price,
            volume24h: c.total_volume,
            market_cap: c.market_cap,
        }
    }
}

/// Trending table and daily focus row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItem {
    #[serde(flatten)]
    pub coin: CoinItem,
    pub score: i32,
    pub label: &'static str,
    pub reason: String,
}

impl From<ScoredCoin> for TrendItem {
    fn from(s: ScoredCoin) -> Self {
        Self {
            coin: s.coin.into(),
            score: s.score,
            label: s.label.as_str(),
            reason: s.reason,
        }
    }
}

/// New & exploding card
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplodingItem {
    #[serde(flatten)]
    pub coin: CoinItem,
    pub score: i32,
    pub vol_ratio: f64,
}

impl From<ExplodingCoin> for ExplodingItem {
    fn from(e: ExplodingCoin) -> Self {
        Self {
            coin: e.coin.into(),
            score: e.score,
            vol_ratio: e.vol_ratio,
        }
    }
}

/// Watchlist row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchItem {
    #[serde(flatten)]
    pub coin: CoinItem,
    pub badge: Option<WatchBadge>,
}

impl From<WatchRow> for WatchItem {
    fn from(w: WatchRow) -> Self {
        Self {
            coin: w.coin.into(),
            badge: w.badge,
        }
    }
}

/// Query params for list endpoints
#[derive(Debug, serde::Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}
