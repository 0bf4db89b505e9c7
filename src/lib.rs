//! Multi-tenant form builder and records library for Rust.
//!
//! Users define form templates (ordered sets of typed fields) and create
//! records whose data is validated against a template at write time.
//!
//! # Core Components
//!
//! - [`validate_record_data`] - The template-driven validation engine
//! - [`FormService`] - Template and record operations with ownership rules
//! - [`FormRepository`] - Trait the service persists through
//! - [`StorageProvider`] - Pluggable document storage backends
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use form_records::{FormService, RequestContext, StandardFormRepository};
//! use form_records::schema::{FieldDraft, TemplateDraft};
//! use form_records::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = FormService::new(StandardFormRepository::new(InMemoryStorage::new()));
//! let context = RequestContext::for_user("alice");
//!
//! let template = service
//!     .create_template(
//!         &context,
//!         TemplateDraft::new("Onboarding")
//!             .with_field(FieldDraft::new("TEXT", "Full Name").required())
//!             .with_field(FieldDraft::new("SELECT", "Dept").with_options(["IT", "HR"])),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod record;
pub mod repository;
pub mod schema;
pub mod service;
pub mod storage;

// Re-export commonly used types for convenience
pub use context::RequestContext;
pub use error::{FormError, FormResult, SchemaError, SchemaResult, ValidationError};
pub use record::{Record, RecordPatch, RecordView, display_name};
pub use repository::{CascadeOutcome, FormRepository, StandardFormRepository};
pub use schema::{
    FieldDefinition, FieldDraft, FieldType, RecordData, Template, TemplateDraft, TemplatePatch,
    validate_field_definition, validate_record_data,
};
pub use service::{FormService, FormServiceBuilder, FormServiceConfig, RecordFilter, TemplateFilter};
pub use storage::{InMemoryStorage, StorageError, StorageKey, StorageProvider};
