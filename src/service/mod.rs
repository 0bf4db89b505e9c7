//! Form service: the operation layer over templates and records.
//!
//! # Module Organization
//!
//! * [`core`] - FormService struct, construction and shared guards
//! * [`builder`] - Service configuration and builder
//! * [`templates`] - Template and field operations
//! * [`records`] - Record operations with all-or-nothing validation

pub mod builder;
pub mod core;
pub mod records;
pub mod templates;


pub use builder::{DEFAULT_TENANT, FormServiceBuilder, FormServiceConfig};
pub use self::core::FormService;
pub use records::RecordFilter;
pub use templates::TemplateFilter;
