use std::fmt::Debug;
use thiserror::Error;

use coingecko::CoinGeckoError;
use radar_db::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid `{name}` setting: `{value}`")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] CoinGeckoError),
}
