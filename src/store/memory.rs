//! In-process settings store. Contents vanish with the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::traits::SettingsStore;

/// `HashMap`-backed [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete_setting(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.values.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get_setting("k").await.unwrap(), None);

        store.set_setting("k", &json!([1, 2])).await.unwrap();
        assert_eq!(store.get_setting("k").await.unwrap(), Some(json!([1, 2])));

        store.set_setting("k", &json!(3)).await.unwrap();
        assert_eq!(store.get_setting("k").await.unwrap(), Some(json!(3)));

        assert!(store.delete_setting("k").await.unwrap());
        assert!(!store.delete_setting("k").await.unwrap());
        assert_eq!(store.get_setting("k").await.unwrap(), None);
    }
}
