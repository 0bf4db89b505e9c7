//! In-memory storage backend.
//!
//! Thread-safe implementation of [`StorageProvider`] over nested `HashMap`s
//! behind a tokio `RwLock`. Intended for tests, development and embedding
//! where persistence is not required.
//!
//! * PUT/GET/DELETE: O(1) average case
//! * FIND_BY_ATTRIBUTE: O(n log n) with a JSON walk per document

use crate::storage::{StorageError, StorageKey, StoragePrefix, StorageProvider};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Collections = HashMap<String, HashMap<String, HashMap<String, Value>>>;

/// Thread-safe in-memory storage.
///
/// Layout: `tenant_id` → `collection` → `id` → document. Clones share the
/// same underlying data.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<Collections>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk a dot-separated path and render the final scalar as a string.
    fn extract_attribute_value(data: &Value, attribute_path: &str) -> Option<String> {
        let mut current = data;

        for part in attribute_path.split('.') {
            current = match part.parse::<usize>() {
                Ok(index) => current.get(index)?,
                Err(_) => current.get(part)?,
            };
        }

        match current {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl StorageProvider for InMemoryStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, data: Value) -> Result<Value, Self::Error> {
        let mut data_guard = self.data.write().await;

        data_guard
            .entry(key.tenant_id().to_string())
            .or_default()
            .entry(key.collection().to_string())
            .or_default()
            .insert(key.id().to_string(), data.clone());

        Ok(data)
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, Self::Error> {
        let data_guard = self.data.read().await;

        Ok(data_guard
            .get(key.tenant_id())
            .and_then(|tenant_data| tenant_data.get(key.collection()))
            .and_then(|collection| collection.get(key.id()))
            .cloned())
    }

    async fn delete(&self, key: StorageKey) -> Result<bool, Self::Error> {
        let mut data_guard = self.data.write().await;

        let existed = data_guard
            .get_mut(key.tenant_id())
            .and_then(|tenant_data| tenant_data.get_mut(key.collection()))
            .is_some_and(|collection| collection.remove(key.id()).is_some());

        Ok(existed)
    }

    async fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        if attribute.is_empty() {
            return Err(StorageError::invalid_attribute(
                attribute,
                "attribute path cannot be empty",
            ));
        }

        let data_guard = self.data.read().await;

        let Some(collection) = data_guard
            .get(prefix.tenant_id())
            .and_then(|tenant_data| tenant_data.get(prefix.collection()))
        else {
            return Ok(Vec::new());
        };

        let mut results: Vec<(StorageKey, Value)> = collection
            .iter()
            .filter(|(_, document)| {
                Self::extract_attribute_value(document, attribute).as_deref() == Some(value)
            })
            .map(|(id, document)| (prefix.key(id.as_str()), document.clone()))
            .collect();

        results.sort_by(|a, b| a.0.id().cmp(b.0.id()));

        Ok(results)
    }

    async fn exists(&self, key: StorageKey) -> Result<bool, Self::Error> {
        Ok(self.get(key).await?.is_some())
    }
}
