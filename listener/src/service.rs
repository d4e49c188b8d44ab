use std::sync::Arc;

use async_trait::async_trait;
use coingecko::{CoinGeckoClient, CoinGeckoError};
use radar_db::{
    store::channels, Category, CategoryBoard, CoinMarket, KeyValueStore, MarketBoard,
};

use crate::error::AppError;

/// Where market batches come from
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn markets(&self, per_page: u32) -> Result<Vec<CoinMarket>, CoinGeckoError>;
    async fn categories(&self) -> Result<Vec<Category>, CoinGeckoError>;
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn markets(&self, per_page: u32) -> Result<Vec<CoinMarket>, CoinGeckoError> {
        self.fetch_markets(per_page).await
    }

    async fn categories(&self) -> Result<Vec<Category>, CoinGeckoError> {
        self.fetch_categories().await
    }
}

/// What one tick wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    pub coins: usize,
    pub sanitized: usize,
    pub categories: Option<usize>,
}

pub struct PollerService<S: MarketSource> {
    pub source: S,
    pub store: Arc<dyn KeyValueStore>,
    pub per_page: u32,
    /// Categories refresh on the first tick and every N ticks after
    pub category_every: u64,
    ticks: u64,
    /// Set on a category tick, cleared once a refresh is stored
    categories_due: bool,
}

impl<S: MarketSource> PollerService<S> {
    pub fn new(source: S, store: Arc<dyn KeyValueStore>, per_page: u32, category_every: u64) -> Self {
        Self {
            source,
            store,
            per_page,
            category_every: category_every.max(1),
            ticks: 0,
            categories_due: false,
        }
    }

    /// Fetch, sanitize and store the latest boards.
    ///
    /// A failed market fetch leaves the previous board in place and fails
    /// the tick. Categories are attempted on every due tick either way, and
    /// stay due until a refresh is stored.
    pub async fn poll_once(&mut self) -> Result<PollSummary, AppError> {
        if self.ticks % self.category_every == 0 {
            self.categories_due = true;
        }
        self.ticks += 1;

        let markets = self.refresh_markets().await;

        let categories = if self.categories_due {
            self.refresh_categories().await
        } else {
            None
        };
        if categories.is_some() {
            self.categories_due = false;
        }

        let (coins, sanitized) = markets?;
        Ok(PollSummary {
            coins,
            sanitized,
            categories,
        })
    }

    /// Store a fresh market board, returning its size and the sanitized count
    async fn refresh_markets(&self) -> Result<(usize, usize), AppError> {
        let raw = self.source.markets(self.per_page).await?;
        let (coins, sanitized) = sanitize_coins(raw);
        if sanitized > 0 {
            tracing::warn!("Sanitized non-finite fields on {} coins", sanitized);
        }

        let board = MarketBoard::new(coins);
        board.save(self.store.as_ref()).await?;

        let count = board.coins.len();
        if let Err(e) = self
            .store
            .publish(channels::MARKETS_UPDATED, &count.to_string())
            .await
        {
            // Subscribers are optional, the board is already stored
            tracing::warn!("Publish to {} failed: {}", channels::MARKETS_UPDATED, e);
        }
        tracing::info!("Stored market board with {} coins", count);

        Ok((count, sanitized))
    }

    async fn refresh_categories(&self) -> Option<usize> {
        let raw = match self.source.categories().await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("Category fetch failed: {}", e);
                return None;
            }
        };

        let categories: Vec<Category> = raw.into_iter().map(Category::sanitized).collect();
        let count = categories.len();

        match CategoryBoard::new(categories).save(self.store.as_ref()).await {
            Ok(()) => {
                tracing::info!("Stored {} categories", count);
                Some(count)
            }
            Err(e) => {
                tracing::error!("Category store failed: {}", e);
                None
            }
        }
    }
}

/// Sanitize a batch, returning it with the number of coins that needed it
pub fn sanitize_coins(coins: Vec<CoinMarket>) -> (Vec<CoinMarket>, usize) {
    let mut sanitized = 0;
    let coins: Vec<CoinMarket> = coins
        .into_iter()
        .map(|coin| {
            if coin.is_finite() {
                coin
            } else {
                sanitized += 1;
                coin.sanitized()
            }
        })
        .collect();
    (coins, sanitized)
}
