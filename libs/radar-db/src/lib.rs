use std::{env, sync::Arc};

pub mod entity;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use entity::{Category, CategoryBoard, CoinMarket, MarketBoard, Notes, Watchlist};
pub use error::StoreError;
pub use store::{KeyValueStore, MemoryStore, RedisStore};

mod defaults {
    pub const STORE_BACKEND: &str = "redis";
}

/// Build the key-value store selected by `STORE_BACKEND` (`redis` or `memory`).
pub async fn initialize_store() -> Result<Arc<dyn KeyValueStore>, StoreError> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let backend =
        env::var("STORE_BACKEND").unwrap_or_else(|_| String::from(defaults::STORE_BACKEND));

    match backend.as_str() {
        "redis" => {
            let redis_url = env::var("REDIS_URL")
                .map_err(|_| StoreError::MissingEnvVar("REDIS_URL".to_string()))?;
            let store = RedisStore::connect(&redis_url).await?;
            Ok(Arc::new(store))
        }
        "memory" => {
            tracing::warn!("Using in-memory store; watchlist and notes will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        other => Err(StoreError::UnknownBackend(other.to_string())),
    }
}
