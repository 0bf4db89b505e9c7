//! Employee records: payloads bound to a form template.
//!
//! A [`Record`] holds a flat JSON object keyed by field id. Conformance to
//! its template is checked by the validation engine, never enforced by the
//! record itself, so stored data may drift from a template edited later.

use crate::schema::{FieldValue, RecordData, Template, validate_record_data};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label fragments that mark a field as holding the record's name.
pub const NAME_LABEL_KEYWORDS: [&str; 4] = ["name", "full_name", "first_name", "employee_name"];

/// A data payload bound to one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    /// Template the data is validated against; fixed after creation
    pub template_id: String,
    #[serde(default)]
    pub data: RecordData,
    /// User that created the record
    pub owner: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Record {
    /// Create an active record with a generated id.
    pub fn new(template_id: impl Into<String>, owner: impl Into<String>, data: RecordData) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: template_id.into(),
            data,
            owner: owner.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn field_value(&self, field_id: &str) -> Option<&Value> {
        self.data.get(field_id)
    }

    pub fn set_field_value(&mut self, field_id: impl Into<String>, value: Value) {
        self.data.insert(field_id.into(), value);
    }

    /// Validate this record's data against `template`.
    pub fn validate_against(&self, template: &Template) -> Vec<String> {
        validate_record_data(template, &self.data)
    }

    /// Best-effort human-readable name; see [`display_name`].
    pub fn display_name(&self, template: &Template) -> String {
        display_name(self, template)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Derive a display name for a record.
///
/// The first non-empty value among fields whose lower-cased label contains a
/// name keyword wins, scanning in template order. Falls back to
/// `"Employee #{id}"`. Not unique and not validated.
pub fn display_name(record: &Record, template: &Template) -> String {
    template
        .ordered_fields()
        .into_iter()
        .filter(|field| is_name_label(&field.label))
        .map(|field| FieldValue::lookup(&record.data, &field.id))
        .find(|value| !value.is_empty())
        .map(|value| value.render().into_owned())
        .unwrap_or_else(|| format!("Employee #{}", record.id))
}

fn is_name_label(label: &str) -> bool {
    let label = label.to_lowercase();
    NAME_LABEL_KEYWORDS
        .iter()
        .any(|keyword| label.contains(keyword))
}

/// Partial update of a record.
///
/// `template_id` is accepted for wire compatibility but never applied: a
/// record stays bound to the template it was created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, alias = "form_template")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl RecordPatch {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// A record together with the values derived from its template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: Record,
    pub template_name: String,
    pub display_name: String,
}

impl RecordView {
    pub fn new(record: Record, template: &Template) -> Self {
        let display_name = display_name(&record, template);
        Self {
            record,
            template_name: template.name.clone(),
            display_name,
        }
    }
}
