//! Validation and normalization of field definitions.
//!
//! Runs whenever a field is created or updated. Normalization is pure: the
//! draft is never modified, a new [`NormalizedField`] is returned instead.

use super::types::{FieldDraft, FieldType, NormalizedField};
use crate::error::{SchemaError, SchemaResult};
use serde_json::Value;

/// Validate a field draft and return its normalized form.
///
/// Fails when the type is not recognized, when the label is blank, or when a
/// SELECT field has no usable option.
pub fn validate_field_definition(draft: &FieldDraft) -> SchemaResult<NormalizedField> {
    let field_type: FieldType = draft.field_type.parse()?;

    if draft.label.trim().is_empty() {
        return Err(SchemaError::EmptyLabel);
    }

    let options = if field_type.has_options() {
        normalize_options(&draft.options)?
    } else {
        string_options(&draft.options)
    };

    Ok(NormalizedField {
        field_type,
        label: draft.label.clone(),
        placeholder: draft.placeholder.clone(),
        required: draft.required,
        order: draft.order,
        options,
    })
}

/// Trim SELECT options and drop blank or non-string entries.
///
/// An empty input is [`SchemaError::MissingOptions`]; an input where nothing
/// survives trimming is [`SchemaError::BlankOptions`].
pub fn normalize_options(options: &[Value]) -> SchemaResult<Vec<String>> {
    if options.is_empty() {
        return Err(SchemaError::MissingOptions);
    }

    let cleaned: Vec<String> = options
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_owned)
        .collect();

    if cleaned.is_empty() {
        return Err(SchemaError::BlankOptions);
    }

    Ok(cleaned)
}

// Options on non-SELECT fields are kept as given; the engine ignores them.
fn string_options(options: &[Value]) -> Vec<String> {
    options
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}
