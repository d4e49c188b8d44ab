// Upstream snapshots
pub mod category;
pub mod coin_market;

// Stored records
pub mod market_board;
pub mod notes;
pub mod watchlist;

// Re-exports for convenience
pub use category::Category;
pub use coin_market::CoinMarket;
pub use market_board::{CategoryBoard, MarketBoard};
pub use notes::Notes;
pub use watchlist::Watchlist;

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit JSON `null` as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Replace NaN and infinities with zero
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
