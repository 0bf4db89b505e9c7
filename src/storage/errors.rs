//! Storage-specific error types.
//!
//! These errors describe failures of the document store itself and carry no
//! knowledge of templates, records or validation rules.

use std::fmt;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Invalid query parameters or search criteria.
    InvalidQuery { message: String, attribute: String },

    /// Serialization or deserialization of a stored document failed.
    Serialization { message: String, collection: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidQuery { message, attribute } => {
                write!(f, "Invalid query on '{}': {}", attribute, message)
            }
            StorageError::Serialization {
                message,
                collection,
            } => write!(f, "Serialization error in {}: {}", collection, message),
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
            attribute: attribute.into(),
        }
    }

    pub fn serialization(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            collection: collection.into(),
        }
    }

    /// Whether the caller supplied bad input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StorageError::InvalidQuery { .. })
    }
}
