//! Form schemas and the template-driven validation engine.
//!
//! # Key Types
//!
//! - [`FieldType`] - The closed set of field types
//! - [`FieldDefinition`] - One typed, labelled slot of a template
//! - [`Template`] - Ordered collection of field definitions
//!
//! # Examples
//!
//! ```rust
//! use form_records::schema::{validate_field_definition, FieldDraft, RecordData, Template};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut template = Template::new("Onboarding", "alice");
//! let email = validate_field_definition(&FieldDraft::new("EMAIL", "Email").required())?;
//! let email_id = template.add_field(email)?.id.clone();
//!
//! let mut data = RecordData::new();
//! data.insert(email_id, json!("not-an-email"));
//! let errors = template.validate(&data);
//! assert_eq!(errors, vec!["Email must be a valid email".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod definition;
pub mod template;
pub mod types;
pub mod validation;


pub use definition::{normalize_options, validate_field_definition};
pub use template::{Template, TemplateDraft, TemplatePatch, normalize_template_name};
pub use types::{FieldDefinition, FieldDraft, FieldType, NormalizedField};
pub use validation::{FieldValue, RecordData, check_field, validate_record_data};
