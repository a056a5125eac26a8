//! Store double that reads as empty and refuses every write.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::store::traits::SettingsStore;

pub(crate) struct FailingStore;

#[async_trait]
impl SettingsStore for FailingStore {
    async fn get_setting(&self, _key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(None)
    }

    async fn set_setting(&self, _key: &str, _value: &serde_json::Value) -> Result<(), StorageError> {
        Err(StorageError::Query("set_setting: disk full".into()))
    }

    async fn delete_setting(&self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Query("delete_setting: disk full".into()))
    }
}
