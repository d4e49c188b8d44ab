//! Key-value persistence port
//!
//! Everything the dashboard keeps between requests (the latest market
//! board, the watchlist, the notes) goes through [`KeyValueStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::sync::{Mutex, RwLock};

use crate::error::StoreError;

/// String-keyed, string-valued store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never set
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Announce a change on a channel. Stores without pub/sub drop the message.
    async fn publish(&self, _channel: &str, _payload: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Redis-backed store
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client =
            Client::open(redis_url).map_err(|e| StoreError::RedisConnection(e.to_string()))?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::RedisConnection(e.to_string()))?;

        tracing::info!("Connected to Redis at {}", redis_url);
        Ok(Self { connection })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| StoreError::RedisCommand(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| StoreError::RedisCommand(e.to_string()))
    }

    async fn publish(&self, channel: &str, payload: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.publish::<_, _, ()>(channel, payload)
            .await
            .map_err(|e| StoreError::RedisCommand(e.to_string()))
    }
}

/// In-process store for local runs and tests
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    published: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages passed to `publish`, oldest first
    pub async fn published(&self) -> Vec<(String, String)> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn publish(&self, channel: &str, payload: &str) -> Result<(), StoreError> {
        self.published
            .lock()
            .await
            .push((channel.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Key-value layout
pub mod keys {
    /// Latest market listing batch
    pub const MARKETS: &str = "radar:markets:latest";
    /// Latest category aggregates
    pub const CATEGORIES: &str = "radar:categories:latest";
    /// Watched coin ids
    pub const WATCHLIST: &str = "radar:watchlist:v1";
    /// Free-form notes
    pub const NOTES: &str = "radar:notes:v1";
}

/// Pub/sub channels
pub mod channels {
    /// Fired after each market board write, payload is the coin count
    pub const MARKETS_UPDATED: &str = "radar:events:markets";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_memory_store_records_publish() {
        let store = MemoryStore::new();
        store.publish(channels::MARKETS_UPDATED, "150").await.unwrap();

        assert_eq!(
            store.published().await,
            vec![(channels::MARKETS_UPDATED.to_string(), "150".to_string())]
        );
    }
}
