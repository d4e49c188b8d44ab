use serde::{Deserialize, Serialize};

use crate::{
    error::StoreError,
    store::{keys, KeyValueStore},
};

/// Free-form trading notes, stored verbatim
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Notes {
    pub body: String,
}

impl Notes {
    pub async fn load(store: &dyn KeyValueStore) -> Result<Notes, StoreError> {
        let body = store.get(keys::NOTES).await?.unwrap_or_default();
        Ok(Notes { body })
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::NOTES, &self.body).await
    }
}
