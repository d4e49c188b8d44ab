use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{category::Category, coin_market::CoinMarket};
use crate::{
    error::StoreError,
    store::{keys, KeyValueStore},
};

/// Latest market listing written by the poller
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MarketBoard {
    pub coins: Vec<CoinMarket>,
    pub updated_at: DateTime<Utc>,
}

/// Latest category aggregates written by the poller
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryBoard {
    pub categories: Vec<Category>,
    pub updated_at: DateTime<Utc>,
}

impl MarketBoard {
    pub fn new(coins: Vec<CoinMarket>) -> Self {
        Self {
            coins,
            updated_at: Utc::now(),
        }
    }

    /// Load the latest board, `None` before the first poll
    pub async fn find_latest(store: &dyn KeyValueStore) -> Result<Option<MarketBoard>, StoreError> {
        match store.get(keys::MARKETS).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Coins of the latest board, empty before the first poll
    pub async fn latest_coins(store: &dyn KeyValueStore) -> Result<Vec<CoinMarket>, StoreError> {
        Ok(Self::find_latest(store)
            .await?
            .map(|board| board.coins)
            .unwrap_or_default())
    }

    /// Replace the stored board
    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let payload = serde_json::to_string(self)?;
        store.set(keys::MARKETS, &payload).await
    }

    /// Seconds elapsed between the board's fetch time and `now`, never negative
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.updated_at).num_seconds().max(0)
    }
}

impl CategoryBoard {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            updated_at: Utc::now(),
        }
    }

    pub async fn find_latest(
        store: &dyn KeyValueStore,
    ) -> Result<Option<CategoryBoard>, StoreError> {
        match store.get(keys::CATEGORIES).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn latest_categories(
        store: &dyn KeyValueStore,
    ) -> Result<Vec<Category>, StoreError> {
        Ok(Self::find_latest(store)
            .await?
            .map(|board| board.categories)
            .unwrap_or_default())
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let payload = serde_json::to_string(self)?;
        store.set(keys::CATEGORIES, &payload).await
    }
}
