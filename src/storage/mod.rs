//! Storage abstraction for form documents.
//!
//! The `StorageProvider` trait defines plain document storage operations with
//! no knowledge of templates, records or validation. Everything
//! form-specific lives in the [`repository`](crate::repository) layer on top.
//!
//! Documents are JSON values addressed by a hierarchical key:
//! `tenant_id` → `collection` → `id`. At this level create and update are the
//! same operation: a `put` at a key.
//!
//! # Example Usage
//!
//! ```rust
//! use form_records::storage::{StorageProvider, StorageKey, InMemoryStorage};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let key = StorageKey::new("acme", "FormTemplate", "t1");
//! storage.put(key.clone(), json!({"id": "t1", "owner": "alice"})).await?;
//!
//! let owned = storage
//!     .find_by_attribute(StorageKey::prefix("acme", "FormTemplate"), "owner", "alice")
//!     .await?;
//! assert_eq!(owned.len(), 1);
//!
//! assert!(storage.delete(key).await?);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;


pub use errors::StorageError;
pub use in_memory::InMemoryStorage;

use serde_json::Value;
use std::fmt;
use std::future::Future;

/// A hierarchical key identifying one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    tenant_id: String,
    collection: String,
    id: String,
}

impl StorageKey {
    pub fn new(
        tenant_id: impl Into<String>,
        collection: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Prefix addressing every document of a collection within a tenant.
    pub fn prefix(tenant_id: impl Into<String>, collection: impl Into<String>) -> StoragePrefix {
        StoragePrefix {
            tenant_id: tenant_id.into(),
            collection: collection.into(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.tenant_id, self.collection, self.id)
    }
}

/// A tenant + collection prefix for searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePrefix {
    tenant_id: String,
    collection: String,
}

impl StoragePrefix {
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Key for a document under this prefix.
    pub fn key(&self, id: impl Into<String>) -> StorageKey {
        StorageKey::new(&self.tenant_id, &self.collection, id)
    }
}

impl fmt::Display for StoragePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.collection)
    }
}

/// Document storage with tenant isolation.
///
/// - `put` replaces whatever is stored at the key and returns the stored data
/// - `delete` reports whether the document existed
/// - searching is scoped to a [`StoragePrefix`] and ordered by id
pub trait StorageProvider: Send + Sync {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `data` at `key`, replacing any existing document.
    fn put(
        &self,
        key: StorageKey,
        data: Value,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Retrieve the document at `key`, if any.
    fn get(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send;

    /// Delete the document at `key`; `false` if nothing was stored there.
    fn delete(&self, key: StorageKey) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Find documents whose attribute at `attribute` (dot notation, numeric
    /// segments index arrays) renders to exactly `value`.
    fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &str,
    ) -> impl Future<Output = Result<Vec<(StorageKey, Value)>, Self::Error>> + Send;

    fn exists(&self, key: StorageKey) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
