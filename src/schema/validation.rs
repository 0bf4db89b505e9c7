//! Validation of record data against form templates.
//!
//! The engine is a pure function of `(template, data)`: it walks the fields
//! in template order, applies the required/blank rules and then one
//! type-specific check, and collects a human-readable message for every
//! failing field. It never stops at the first failure.
//!
//! All type checks run on the string rendering of a value, so `"12.5"` and
//! `12.5` are both valid NUMBER values.

use super::template::Template;
use super::types::{FieldDefinition, FieldType};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Record payload: field id to loosely-typed value.
pub type RecordData = Map<String, Value>;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Borrowed view of one payload value.
///
/// Payload values arrive as arbitrary JSON; this is the shape the engine
/// reasons about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Key not present in the payload
    Absent,
    Null,
    Bool(bool),
    Number(&'a Number),
    Text(&'a str),
    /// Arrays and objects
    Composite(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Read the value stored under `field_id`.
    pub fn lookup(data: &'a RecordData, field_id: &str) -> Self {
        data.get(field_id).map_or(Self::Absent, Self::from_value)
    }

    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            Value::Array(_) | Value::Object(_) => Self::Composite(value),
        }
    }

    /// Missing, null, an empty string, or an empty array/object.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent | Self::Null => true,
            Self::Bool(_) | Self::Number(_) => false,
            Self::Text(s) => s.is_empty(),
            Self::Composite(Value::Array(items)) => items.is_empty(),
            Self::Composite(Value::Object(entries)) => entries.is_empty(),
            Self::Composite(_) => false,
        }
    }

    /// Empty, or rendering to whitespace only.
    pub fn is_blank(&self) -> bool {
        self.is_empty() || self.render().trim().is_empty()
    }

    /// The string form every type check operates on.
    pub fn render(&self) -> Cow<'a, str> {
        match *self {
            Self::Absent | Self::Null => Cow::Borrowed(""),
            Self::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Composite(value) => Cow::Owned(value.to_string()),
        }
    }
}

/// Validate a payload against a template.
///
/// Returns one message per failing field, in template field order. An empty
/// vector means the payload is valid.
pub fn validate_record_data(template: &Template, data: &RecordData) -> Vec<String> {
    template
        .ordered_fields()
        .into_iter()
        .filter_map(|field| check_field(field, FieldValue::lookup(data, &field.id)))
        .collect()
}

/// Check a single value against its field definition.
pub fn check_field(field: &FieldDefinition, value: FieldValue<'_>) -> Option<String> {
    if value.is_blank() {
        return field
            .required
            .then(|| format!("{} is required", field.label));
    }

    let rendered = value.render();
    let label = &field.label;

    match field.field_type {
        FieldType::Email => {
            (!is_valid_email(&rendered)).then(|| format!("{label} must be a valid email"))
        }
        FieldType::Number => {
            (!is_valid_number(&rendered)).then(|| format!("{label} must be a valid number"))
        }
        FieldType::Date => (!is_valid_date(&rendered))
            .then(|| format!("{label} must be a valid date (YYYY-MM-DD)")),
        FieldType::Select => (!is_valid_option(&field.options, &rendered))
            .then(|| format!("{label} must be one of: {}", field.options.join(", "))),
        FieldType::Text | FieldType::Textarea | FieldType::Password => None,
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Anything `f64` parses, ignoring surrounding whitespace.
pub fn is_valid_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// Zero-padded `YYYY-MM-DD` naming a real calendar date.
pub fn is_valid_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });

    shaped && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

// A SELECT without stored options accepts anything; the incoming value is
// compared untrimmed.
fn is_valid_option(options: &[String], value: &str) -> bool {
    options.is_empty() || options.iter().any(|option| option == value)
}

impl Template {
    /// Validate a payload against this template.
    pub fn validate(&self, data: &RecordData) -> Vec<String> {
        validate_record_data(self, data)
    }
}
