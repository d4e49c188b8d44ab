use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoinGeckoError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CoinGecko returned {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Rate limited by CoinGecko (429), will retry")]
    RateLimited,

    #[error("Max retries ({0}) exceeded")]
    MaxRetriesExceeded(u32),

    #[error("Invalid `{name}` setting: `{value}`")]
    InvalidSetting { name: &'static str, value: String },
}
