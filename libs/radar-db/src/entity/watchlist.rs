use serde::{Deserialize, Serialize};

use crate::{
    error::StoreError,
    store::{keys, KeyValueStore},
};

/// Coin ids the user follows, in the order they were added
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Watchlist {
    pub ids: Vec<String>,
}

impl Watchlist {
    /// Load the watchlist. A missing or unreadable value is an empty list.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Watchlist, StoreError> {
        let Some(raw) = store.get(keys::WATCHLIST).await? else {
            return Ok(Watchlist::default());
        };

        match serde_json::from_str::<Watchlist>(&raw) {
            Ok(watchlist) => Ok(watchlist),
            Err(e) => {
                tracing::warn!("Ignoring unreadable watchlist: {}", e);
                Ok(Watchlist::default())
            }
        }
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let payload = serde_json::to_string(self)?;
        store.set(keys::WATCHLIST, &payload).await
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    /// Add the id if absent, remove it if present. Returns whether it is now watched.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.ids.retain(|x| x != id);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Returns whether the id was on the list
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|x| x != id);
        self.ids.len() != before
    }
}
