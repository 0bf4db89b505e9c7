//! Repository interface for templates and records.
//!
//! The service layer never builds queries itself: ownership-scoped lookups
//! and cascading deletes are explicit calls on a [`FormRepository`], injected
//! at construction. [`StandardFormRepository`] implements the interface over
//! any [`StorageProvider`](crate::storage::StorageProvider).

pub mod standard;

pub use standard::StandardFormRepository;

use crate::error::FormResult;
use crate::record::Record;
use crate::schema::Template;
use std::future::Future;

/// Collection name under which templates are stored.
pub const TEMPLATE_COLLECTION: &str = "FormTemplate";
/// Collection name under which records are stored.
pub const RECORD_COLLECTION: &str = "Employee";

/// Outcome of deleting a template together with everything bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    /// Whether the template existed
    pub template_deleted: bool,
    /// Records removed because they were bound to the template
    pub records_deleted: usize,
}

/// Persistence operations the form service depends on.
///
/// Every operation is scoped to a tenant. Ownership filtering is explicit
/// (`*_by_owner`); plain lookups by id see every document in the tenant.
pub trait FormRepository: Send + Sync {
    /// Store a template, replacing any previous version.
    fn save_template(
        &self,
        tenant_id: &str,
        template: &Template,
    ) -> impl Future<Output = FormResult<Template>> + Send;

    fn get_template(
        &self,
        tenant_id: &str,
        template_id: &str,
    ) -> impl Future<Output = FormResult<Option<Template>>> + Send;

    /// Templates created by `owner`, in no particular order.
    fn find_templates_by_owner(
        &self,
        tenant_id: &str,
        owner: &str,
    ) -> impl Future<Output = FormResult<Vec<Template>>> + Send;

    /// Delete a template, its fields and every record bound to it.
    fn delete_template_cascade(
        &self,
        tenant_id: &str,
        template_id: &str,
    ) -> impl Future<Output = FormResult<CascadeOutcome>> + Send;

    fn save_record(
        &self,
        tenant_id: &str,
        record: &Record,
    ) -> impl Future<Output = FormResult<Record>> + Send;

    fn get_record(
        &self,
        tenant_id: &str,
        record_id: &str,
    ) -> impl Future<Output = FormResult<Option<Record>>> + Send;

    /// Records created by `owner`, in no particular order.
    fn find_records_by_owner(
        &self,
        tenant_id: &str,
        owner: &str,
    ) -> impl Future<Output = FormResult<Vec<Record>>> + Send;

    /// Records bound to `template_id`, regardless of owner.
    fn find_records_by_template(
        &self,
        tenant_id: &str,
        template_id: &str,
    ) -> impl Future<Output = FormResult<Vec<Record>>> + Send;

    /// Delete a record; `false` if it did not exist.
    fn delete_record(
        &self,
        tenant_id: &str,
        record_id: &str,
    ) -> impl Future<Output = FormResult<bool>> + Send;
}
