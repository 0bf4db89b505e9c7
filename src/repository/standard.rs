//! Form repository over a pluggable storage backend.
//!
//! Templates and records are stored as JSON documents in the
//! `FormTemplate` and `Employee` collections of the caller's tenant.
//! Ownership and template lookups are attribute searches on `owner` and
//! `template_id`.
//!
//! # Example Usage
//!
//! ```rust
//! use form_records::repository::{FormRepository, StandardFormRepository};
//! use form_records::schema::Template;
//! use form_records::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = StandardFormRepository::new(InMemoryStorage::new());
//!
//! let template = Template::new("Onboarding", "alice");
//! repository.save_template("acme", &template).await?;
//!
//! let owned = repository.find_templates_by_owner("acme", "alice").await?;
//! assert_eq!(owned.len(), 1);
//! # Ok(())
//! # }
//! ```

use super::{CascadeOutcome, FormRepository, RECORD_COLLECTION, TEMPLATE_COLLECTION};
use crate::error::{FormError, FormResult};
use crate::record::Record;
use crate::schema::Template;
use crate::storage::{StorageError, StorageKey, StoragePrefix, StorageProvider};
use log::{debug, info, trace, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Repository that maps templates and records onto a [`StorageProvider`].
#[derive(Debug, Clone)]
pub struct StandardFormRepository<S: StorageProvider> {
    storage: S,
}

impl<S: StorageProvider> StandardFormRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn encode<T: Serialize>(collection: &str, document: &T) -> FormResult<Value> {
        serde_json::to_value(document)
            .map_err(|e| FormError::storage(StorageError::serialization(collection, e.to_string())))
    }

    fn decode<T: DeserializeOwned>(collection: &str, data: Value) -> FormResult<T> {
        serde_json::from_value(data)
            .map_err(|e| FormError::storage(StorageError::serialization(collection, e.to_string())))
    }

    /// Decode search results, skipping documents that no longer parse.
    fn decode_all<T: DeserializeOwned>(
        collection: &str,
        results: Vec<(StorageKey, Value)>,
    ) -> Vec<T> {
        results
            .into_iter()
            .filter_map(|(key, data)| match Self::decode(collection, data) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!("Skipping undecodable document {}: {}", key, e);
                    None
                }
            })
            .collect()
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        tenant_id: &str,
        collection: &str,
        id: &str,
    ) -> FormResult<Option<T>> {
        let key = StorageKey::new(tenant_id, collection, id);
        debug!("Loading {}", key);

        match self.storage.get(key).await.map_err(FormError::storage)? {
            Some(data) => Self::decode(collection, data).map(Some),
            None => Ok(None),
        }
    }

    async fn find_documents<T: DeserializeOwned>(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &str,
    ) -> FormResult<Vec<T>> {
        let collection = prefix.collection().to_string();
        let results = self
            .storage
            .find_by_attribute(prefix, attribute, value)
            .await
            .map_err(FormError::storage)?;

        Ok(Self::decode_all(&collection, results))
    }
}

impl<S: StorageProvider> FormRepository for StandardFormRepository<S> {
    async fn save_template(&self, tenant_id: &str, template: &Template) -> FormResult<Template> {
        let key = StorageKey::new(tenant_id, TEMPLATE_COLLECTION, &template.id);
        let data = Self::encode(TEMPLATE_COLLECTION, template)?;
        trace!("Storing template {}: {}", key, data);

        let stored = self.storage.put(key, data).await.map_err(FormError::storage)?;
        Self::decode(TEMPLATE_COLLECTION, stored)
    }

    async fn get_template(
        &self,
        tenant_id: &str,
        template_id: &str,
    ) -> FormResult<Option<Template>> {
        self.get_document(tenant_id, TEMPLATE_COLLECTION, template_id)
            .await
    }

    async fn find_templates_by_owner(
        &self,
        tenant_id: &str,
        owner: &str,
    ) -> FormResult<Vec<Template>> {
        let prefix = StorageKey::prefix(tenant_id, TEMPLATE_COLLECTION);
        self.find_documents(prefix, "owner", owner).await
    }

    async fn delete_template_cascade(
        &self,
        tenant_id: &str,
        template_id: &str,
    ) -> FormResult<CascadeOutcome> {
        let key = StorageKey::new(tenant_id, TEMPLATE_COLLECTION, template_id);
        if !self.storage.exists(key.clone()).await.map_err(FormError::storage)? {
            return Ok(CascadeOutcome::default());
        }

        let bound = self
            .storage
            .find_by_attribute(
                StorageKey::prefix(tenant_id, RECORD_COLLECTION),
                "template_id",
                template_id,
            )
            .await
            .map_err(FormError::storage)?;

        let mut records_deleted = 0;
        for (record_key, _) in bound {
            if self.storage.delete(record_key).await.map_err(FormError::storage)? {
                records_deleted += 1;
            }
        }

        let template_deleted = self.storage.delete(key).await.map_err(FormError::storage)?;
        info!(
            "Deleted template '{}' in tenant '{}' with {} bound records",
            template_id, tenant_id, records_deleted
        );

        Ok(CascadeOutcome {
            template_deleted,
            records_deleted,
        })
    }

    async fn save_record(&self, tenant_id: &str, record: &Record) -> FormResult<Record> {
        let key = StorageKey::new(tenant_id, RECORD_COLLECTION, &record.id);
        let data = Self::encode(RECORD_COLLECTION, record)?;
        trace!("Storing record {}: {}", key, data);

        let stored = self.storage.put(key, data).await.map_err(FormError::storage)?;
        Self::decode(RECORD_COLLECTION, stored)
    }

    async fn get_record(&self, tenant_id: &str, record_id: &str) -> FormResult<Option<Record>> {
        self.get_document(tenant_id, RECORD_COLLECTION, record_id).await
    }

    async fn find_records_by_owner(&self, tenant_id: &str, owner: &str) -> FormResult<Vec<Record>> {
        let prefix = StorageKey::prefix(tenant_id, RECORD_COLLECTION);
        self.find_documents(prefix, "owner", owner).await
    }

    async fn find_records_by_template(
        &self,
        tenant_id: &str,
        template_id: &str,
    ) -> FormResult<Vec<Record>> {
        let prefix = StorageKey::prefix(tenant_id, RECORD_COLLECTION);
        self.find_documents(prefix, "template_id", template_id).await
    }

    async fn delete_record(&self, tenant_id: &str, record_id: &str) -> FormResult<bool> {
        let key = StorageKey::new(tenant_id, RECORD_COLLECTION, record_id);
        self.storage.delete(key).await.map_err(FormError::storage)
    }
}
