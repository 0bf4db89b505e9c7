//! Form templates: named, ordered collections of field definitions.
//!
//! A [`Template`] owns its fields exclusively and enforces the two schema
//! invariants that span fields: labels are unique within the template, and
//! iteration follows the `order` of each field.

use super::types::{FieldDefinition, FieldDraft, NormalizedField};
use crate::error::{SchemaError, SchemaResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// User that created the template
    pub owner: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

fn default_active() -> bool {
    true
}

impl Template {
    /// Create an empty, active template with a generated id.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            owner: owner.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
            fields: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Fields in template order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Fields sorted by `order`, ties kept in stored position.
    ///
    /// Mutations keep `fields()` sorted already; this also holds for
    /// snapshots deserialized from elsewhere.
    pub fn ordered_fields(&self) -> Vec<&FieldDefinition> {
        let mut fields: Vec<&FieldDefinition> = self.fields.iter().collect();
        fields.sort_by_key(|field| field.order);
        fields
    }

    /// Look up a field by id.
    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id == field_id)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn required_field_count(&self) -> usize {
        self.fields.iter().filter(|field| field.required).count()
    }

    /// The order the next appended field receives: current maximum plus one.
    ///
    /// Fails with [`SchemaError::OrderOverflow`] once a field already holds
    /// `u32::MAX`.
    pub fn next_order(&self) -> SchemaResult<u32> {
        let max = self.fields.iter().map(|field| field.order).max().unwrap_or(0);
        max.checked_add(1).ok_or(SchemaError::OrderOverflow)
    }

    /// Fail if another field (other than `exclude_id`) already uses `label`.
    pub fn ensure_unique_label(&self, label: &str, exclude_id: Option<&str>) -> SchemaResult<()> {
        let taken = self
            .fields
            .iter()
            .any(|field| field.label == label && Some(field.id.as_str()) != exclude_id);

        if taken {
            return Err(SchemaError::DuplicateLabel {
                label: label.to_string(),
            });
        }
        Ok(())
    }

    /// Insert an already-built definition at its ordered position.
    pub fn push_field(&mut self, field: FieldDefinition) -> SchemaResult<&FieldDefinition> {
        self.ensure_unique_label(&field.label, None)?;
        let position = self.insert_position(field.order);
        self.fields.insert(position, field);
        Ok(&self.fields[position])
    }

    /// Add a normalized field, generating its id and defaulting its order.
    pub fn add_field(&mut self, field: NormalizedField) -> SchemaResult<&FieldDefinition> {
        let order = match field.order {
            Some(order) => order,
            None => self.next_order()?,
        };
        let definition =
            FieldDefinition::from_normalized(uuid::Uuid::new_v4().to_string(), field, order);
        self.push_field(definition)
    }

    /// Replace the definition of an existing field, keeping its id and
    /// creation time. The order is kept when the replacement leaves it unset.
    ///
    /// Returns `Ok(None)` when no field has the given id.
    pub fn replace_field(
        &mut self,
        field_id: &str,
        field: NormalizedField,
    ) -> SchemaResult<Option<&FieldDefinition>> {
        let Some(index) = self.fields.iter().position(|f| f.id == field_id) else {
            return Ok(None);
        };
        self.ensure_unique_label(&field.label, Some(field_id))?;

        let existing = self.fields.remove(index);
        let mut replacement = FieldDefinition::from_normalized(existing.id, field, existing.order);
        replacement.created_at = existing.created_at;

        let position = self.insert_position(replacement.order);
        self.fields.insert(position, replacement);
        Ok(Some(&self.fields[position]))
    }

    /// Remove a field by id.
    pub fn remove_field(&mut self, field_id: &str) -> Option<FieldDefinition> {
        let index = self.fields.iter().position(|field| field.id == field_id)?;
        Some(self.fields.remove(index))
    }

    /// Refresh the modification time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // After every field with an order less than or equal to `order`, so that
    // equal orders keep insertion order.
    fn insert_position(&self, order: u32) -> usize {
        self.fields.partition_point(|field| field.order <= order)
    }
}

/// Payload for creating a template together with its initial fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldDraft) -> Self {
        self.fields.push(field);
        self
    }
}

/// Partial update of a template's own attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TemplatePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Trim a template name, rejecting blank names.
pub fn normalize_template_name(name: &str) -> SchemaResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::EmptyTemplateName);
    }
    Ok(trimmed.to_string())
}
