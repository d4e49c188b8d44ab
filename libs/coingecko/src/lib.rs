//! CoinGecko REST client
//!
//! Thin wrapper over the public API with exponential backoff on 429s.

use std::{env, time::Duration};

use radar_db::{Category, CoinMarket};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

mod error;

pub use error::CoinGeckoError;

mod defaults {
    pub const COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";
    pub const HTTP_RETRY_DELAY_MS: &str = "1000";
    pub const MAX_RETRIES: &str = "5";
    pub const MARKETS_PER_PAGE: u32 = 150;
    pub const SECTOR_PER_PAGE: u32 = 50;
}

/// Client settings
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    pub retry_delay_ms: u64,
    pub max_retries: u32,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::COINGECKO_BASE.to_string(),
            retry_delay_ms: 1000,
            max_retries: 5,
        }
    }
}

impl CoinGeckoConfig {
    /// Read `COINGECKO_BASE`, `HTTP_RETRY_DELAY_MS` and `MAX_RETRIES`
    pub fn from_env() -> Result<Self, CoinGeckoError> {
        let base_url =
            env::var("COINGECKO_BASE").unwrap_or_else(|_| defaults::COINGECKO_BASE.to_string());

        let retry_delay = env::var("HTTP_RETRY_DELAY_MS")
            .unwrap_or_else(|_| defaults::HTTP_RETRY_DELAY_MS.to_string());
        let retry_delay_ms =
            retry_delay
                .parse::<u64>()
                .map_err(|_| CoinGeckoError::InvalidSetting {
                    name: "HTTP_RETRY_DELAY_MS",
                    value: retry_delay.clone(),
                })?;

        let max_retries_env =
            env::var("MAX_RETRIES").unwrap_or_else(|_| defaults::MAX_RETRIES.to_string());
        let max_retries =
            max_retries_env
                .parse::<u32>()
                .map_err(|_| CoinGeckoError::InvalidSetting {
                    name: "MAX_RETRIES",
                    value: max_retries_env.clone(),
                })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_delay_ms,
            max_retries,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: reqwest::Client,
}

impl CoinGeckoClient {
    pub fn new(config: CoinGeckoConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Top coins by market cap with 1h and 24h changes
    pub async fn fetch_markets(&self, per_page: u32) -> Result<Vec<CoinMarket>, CoinGeckoError> {
        let per_page = per_page.to_string();
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "1h,24h"),
            ],
        )
        .await
    }

    /// Default-sized market listing
    pub async fn fetch_top_markets(&self) -> Result<Vec<CoinMarket>, CoinGeckoError> {
        self.fetch_markets(defaults::MARKETS_PER_PAGE).await
    }

    /// Largest coins inside one category
    pub async fn fetch_sector_markets(
        &self,
        category_id: &str,
    ) -> Result<Vec<CoinMarket>, CoinGeckoError> {
        let per_page = defaults::SECTOR_PER_PAGE.to_string();
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", "usd"),
                ("category", category_id),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "1h,24h"),
            ],
        )
        .await
    }

    /// Category aggregates with market cap, 24h change and volume
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CoinGeckoError> {
        self.get_json("/coins/categories", &[]).await
    }

    /// Trending search payload, passed through untouched
    pub async fn fetch_trending(&self) -> Result<serde_json::Value, CoinGeckoError> {
        self.get_json("/search/trending", &[]).await
    }

    /// GET with retry logic and exponential backoff on rate limits
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoinGeckoError> {
        let max_retries = self.config.max_retries.max(1);
        let base_delay_ms = self.config.retry_delay_ms;

        for attempt in 0..max_retries {
            match self.get_once(endpoint, query).await {
                Err(CoinGeckoError::RateLimited) if attempt + 1 == max_retries => {
                    tracing::warn!(
                        "Rate limited on {} (attempt {}/{}), giving up",
                        endpoint,
                        attempt + 1,
                        max_retries
                    );
                }
                Err(CoinGeckoError::RateLimited) => {
                    let backoff_ms = base_delay_ms.saturating_mul(2_u64.saturating_pow(attempt));
                    tracing::warn!(
                        "Rate limited on {} (attempt {}/{}), backing off for {}ms",
                        endpoint,
                        attempt + 1,
                        max_retries,
                        backoff_ms
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;
                }
                // Anything other than a rate limit returns immediately
                result => return result,
            }
        }

        Err(CoinGeckoError::MaxRetriesExceeded(max_retries))
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoinGeckoError> {
        let url = format!("{}{}", self.config.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(CoinGeckoError::RateLimited),
            status if !status.is_success() => Err(CoinGeckoError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            }),
            _ => Ok(response.json::<T>().await?),
        }
    }
}
