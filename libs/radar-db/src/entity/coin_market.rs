use serde::{Deserialize, Serialize};

use super::{finite_or_zero, null_as_default};

/// One coin from a CoinGecko `/coins/markets` listing
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CoinMarket {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,
    #[serde(rename = "price_change_percentage_1h_in_currency", default)]
    pub price_change_pct_1h: Option<f64>,
    #[serde(rename = "price_change_percentage_24h_in_currency", default)]
    pub price_change_pct_24h: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_volume: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,
}

impl CoinMarket {
    /// 1h change, absent counts as flat
    pub fn change_1h(&self) -> f64 {
        self.price_change_pct_1h.unwrap_or(0.0)
    }

    /// 24h change, absent counts as flat
    pub fn change_24h(&self) -> f64 {
        self.price_change_pct_24h.unwrap_or(0.0)
    }

    /// Market cap with zero floored to 1 so it can be divided by
    pub fn market_cap_floor(&self) -> f64 {
        if self.market_cap == 0.0 {
            1.0
        } else {
            self.market_cap
        }
    }

    /// Uncapped 24h volume / market cap
    pub fn volume_ratio(&self) -> f64 {
        self.total_volume / self.market_cap_floor()
    }

    /// True when every numeric field is a finite number
    pub fn is_finite(&self) -> bool {
        self.current_price.is_finite()
            && self.total_volume.is_finite()
            && self.market_cap.is_finite()
            && self.price_change_pct_1h.map_or(true, f64::is_finite)
            && self.price_change_pct_24h.map_or(true, f64::is_finite)
    }

    /// Drop non-finite percentages and zero out non-finite amounts
    pub fn sanitized(mut self) -> Self {
        self.current_price = finite_or_zero(self.current_price);
        self.total_volume = finite_or_zero(self.total_volume);
        self.market_cap = finite_or_zero(self.market_cap);
        self.price_change_pct_1h = self.price_change_pct_1h.filter(|v| v.is_finite());
        self.price_change_pct_24h = self.price_change_pct_24h.filter(|v| v.is_finite());
        self
    }
}
