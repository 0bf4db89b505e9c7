//! Error types for form template and record operations.
//!
//! Errors are layered the same way the operations are: [`SchemaError`] for a
//! malformed template or field definition, [`ValidationError`] for record data
//! that does not conform to an otherwise valid template, and [`FormError`] for
//! everything the service layer can report.

/// A template or field definition is malformed.
///
/// Always surfaced synchronously and never retried; the mutating request must
/// be rejected in full.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// SELECT field without any option at all
    #[error("SELECT fields must have at least one option.")]
    MissingOptions,

    /// SELECT field whose options are all blank after trimming
    #[error("Options cannot be empty or whitespace.")]
    BlankOptions,

    /// Field type outside the recognized set
    #[error("Invalid field type: '{value}'")]
    UnknownFieldType { value: String },

    /// Field label is empty or whitespace
    #[error("Field label cannot be empty")]
    EmptyLabel,

    /// Another field in the same template already uses the label
    #[error("A field labelled '{label}' already exists in this template")]
    DuplicateLabel { label: String },

    /// Template name is empty or whitespace
    #[error("Name cannot be empty or whitespace.")]
    EmptyTemplateName,

    /// Template created without fields
    #[error("At least one field is required.")]
    NoFields,

    /// Template would exceed the configured field limit
    #[error("Template cannot have more than {limit} fields")]
    TooManyFields { limit: usize },

    /// No order is left after the highest one in use
    #[error("Field order cannot exceed {}", u32::MAX)]
    OrderOverflow,

    /// An initial field of a new template is invalid (1-based position)
    #[error("Field {position}: {source}")]
    InvalidField {
        position: usize,
        #[source]
        source: Box<SchemaError>,
    },
}

/// Record data failed validation against its template.
///
/// Carries every message the validation engine produced, in template field
/// order. The write must be rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", .messages.join("; "))]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    /// Wrap the engine's messages.
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// The accumulated messages, in template field order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Main error type for form service operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Template or field definition is malformed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Record data does not conform to its template
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Another active template of the same owner already has this name
    #[error("A form template with this name already exists: '{name}'")]
    Conflict { name: String },

    /// The acting user may not modify the target resource
    #[error("Permission denied: {message}")]
    Authorization { message: String },

    /// Resource does not exist or is not visible to the acting user
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },

    /// Malformed request payload or parameters
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Errors from the underlying repository or storage backend
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FormError {
    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create a name conflict error
    pub fn conflict(name: impl Into<String>) -> Self {
        Self::Conflict { name: name.into() }
    }

    /// Create an authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Wrap a storage error
    pub fn storage<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(error))
    }

    /// Validation messages, when this is a record validation failure.
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::Validation(err) => Some(err.messages()),
            _ => None,
        }
    }
}

impl SchemaError {
    /// Attach the 1-based position of an initial field to its error.
    pub fn at_position(self, position: usize) -> Self {
        Self::InvalidField {
            position,
            source: Box::new(self),
        }
    }
}

pub type FormResult<T> = Result<T, FormError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
