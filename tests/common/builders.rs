//! Test data builders for templates and record payloads.

use form_records::schema::{
    FieldDefinition, FieldDraft, FieldType, RecordData, Template, TemplateDraft,
};
use serde_json::Value;

/// Builder for template snapshots with fluent API for validation tests.
///
/// Fields get explicit ids so payloads can address them directly; each new
/// field is appended after the current last one.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    template: Template,
}

impl TemplateBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            template: Template::new(name, "tester"),
        }
    }

    /// Append an optional field
    pub fn field(self, id: &str, field_type: FieldType, label: &str) -> Self {
        self.push(FieldDefinition::new(id, field_type, label))
    }

    /// Append a required field
    pub fn required(self, id: &str, field_type: FieldType, label: &str) -> Self {
        self.push(FieldDefinition::new(id, field_type, label).required())
    }

    /// Append a SELECT field with the given options
    pub fn select(self, id: &str, label: &str, options: &[&str], required: bool) -> Self {
        let mut field = FieldDefinition::new(id, FieldType::Select, label)
            .with_options(options.iter().copied());
        if required {
            field = field.required();
        }
        self.push(field)
    }

    /// Append a fully built definition, keeping its own order
    pub fn definition(mut self, field: FieldDefinition) -> Self {
        self.template
            .push_field(field)
            .expect("test templates use unique labels");
        self
    }

    pub fn build(self) -> Template {
        self.template
    }

    fn push(self, field: FieldDefinition) -> Self {
        let order = self
            .template
            .next_order()
            .expect("test templates stay below the order limit");
        self.definition(field.with_order(order))
    }
}

/// Builder for record payloads keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    data: RecordData,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field_id: &str, value: Value) -> Self {
        self.data.insert(field_id.to_string(), value);
        self
    }

    pub fn build(self) -> RecordData {
        self.data
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

/// Payload for a service-created template, keyed by field label.
pub fn payload_by_label(template: &Template, values: &[(&str, Value)]) -> Value {
    let mut builder = PayloadBuilder::new();
    for (label, value) in values {
        builder = builder.with(&field_id(template, label), value.clone());
    }
    builder.into_value()
}

/// Id of the field labelled `label`.
pub fn field_id(template: &Template, label: &str) -> String {
    template
        .fields()
        .iter()
        .find(|field| field.label == label)
        .map(|field| field.id.clone())
        .unwrap_or_else(|| panic!("template has no field labelled '{}'", label))
}

/// A staff template draft: required Full Name, optional Email, Dept SELECT.
pub fn staff_draft(name: &str) -> TemplateDraft {
    TemplateDraft::new(name)
        .with_description("Employee onboarding")
        .with_field(FieldDraft::new("TEXT", "Full Name").required())
        .with_field(FieldDraft::new("EMAIL", "Email"))
        .with_field(FieldDraft::new("SELECT", "Dept").with_options(["IT", "HR"]))
}
