//! `SettingsStore` trait: client-local key-value storage for UI state.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic settings store. Values are JSON.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a setting, `None` if the key was never written or was deleted.
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Insert or replace a setting.
    async fn set_setting(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;

    /// Remove a setting. Returns whether a value was present.
    async fn delete_setting(&self, key: &str) -> Result<bool, StorageError>;
}
