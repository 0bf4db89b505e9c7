//! Core field type definitions for form templates.
//!
//! This module contains the closed set of field types, the raw field draft
//! accepted from callers, and the normalized and persisted field shapes.

use crate::error::SchemaError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The type of a form field.
///
/// Serialized as the upper-case names used on the wire (`"TEXT"`, `"SELECT"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    /// Single-line free text
    Text,
    /// Anything that parses as a floating-point number
    Number,
    /// Calendar date in `YYYY-MM-DD` form
    Date,
    /// `local@domain.tld` shaped address
    Email,
    /// One of a fixed list of options
    Select,
    /// Free text rendered masked
    Password,
    /// Multi-line free text
    Textarea,
}

impl FieldType {
    /// Every recognized field type, in declaration order.
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Date,
        FieldType::Email,
        FieldType::Select,
        FieldType::Password,
        FieldType::Textarea,
    ];

    /// The wire name of this field type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Date => "DATE",
            FieldType::Email => "EMAIL",
            FieldType::Select => "SELECT",
            FieldType::Password => "PASSWORD",
            FieldType::Textarea => "TEXTAREA",
        }
    }

    /// Whether the type carries an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| SchemaError::UnknownFieldType {
                value: value.to_string(),
            })
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

/// A field definition as submitted by a caller, before any validation.
///
/// The type is kept as a raw string so that unrecognized types can be
/// reported as a [`SchemaError`] rather than a deserialization failure, and
/// options are kept as raw JSON values so that non-string entries can be
/// discarded during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDraft {
    #[serde(alias = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, alias = "is_required")]
    pub required: bool,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub options: Vec<Value>,
}

impl FieldDraft {
    /// Create a draft with the given type and label.
    pub fn new(field_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Set string options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|option| Value::String(option.into()))
            .collect();
        self
    }

    /// Set raw option values, including non-string entries.
    pub fn with_raw_options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }
}

/// A field draft that passed validation.
///
/// Options are trimmed and blank-filtered for SELECT fields. The order stays
/// optional until the field is placed in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedField {
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub order: Option<u32>,
    pub options: Vec<String>,
}

/// One typed slot of a persisted template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Stable identifier, unique within the owning template
    pub id: String,
    #[serde(rename = "type", alias = "field_type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, alias = "is_required")]
    pub required: bool,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub options: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FieldDefinition {
    /// Create a definition from already-trusted parts.
    ///
    /// No normalization is applied; use
    /// [`validate_field_definition`](crate::schema::validate_field_definition)
    /// for untrusted input.
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            order: 0,
            options: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a definition from a normalized draft, falling back to `default_order`.
    pub fn from_normalized(
        id: impl Into<String>,
        field: NormalizedField,
        default_order: u32,
    ) -> Self {
        let mut definition = Self::new(id, field.field_type, field.label);
        definition.placeholder = field.placeholder;
        definition.required = field.required;
        definition.order = field.order.unwrap_or(default_order);
        definition.options = field.options;
        definition
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}
