//! Record storage backed by `tauri-plugin-store`.

use std::sync::Arc;

use serde_json::Value;
use tauri::{Runtime, Wry};
use tauri_plugin_store::Store;

use crate::storage::KeyValueStorage;
use crate::utils::StorageError;

/// Keeps each blob as a JSON string value inside a plugin store file.
///
/// Every write is flushed to disk immediately.
pub struct TauriStoreStorage<R: Runtime = Wry> {
    store: Arc<Store<R>>,
}

impl<R: Runtime> TauriStoreStorage<R> {
    pub fn new(store: Arc<Store<R>>) -> Self {
        Self { store }
    }
}

impl<R: Runtime> KeyValueStorage for TauriStoreStorage<R> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(key).map(|value| match value {
            Value::String(blob) => blob,
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.set(key, Value::String(value.to_string()));
        self.store
            .save()
            .map_err(|e| StorageError::write(format!("Store save failed: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store.delete(key);
        self.store
            .save()
            .map_err(|e| StorageError::write(format!("Store save failed: {e}")))
    }
}
