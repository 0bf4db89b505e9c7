//! Per-type acceptance and rejection tests.
//!
//! Every check runs on the string rendering of a value, so numbers and
//! booleans are tested both as JSON scalars and as strings.

use serde_json::{Value, json};

use crate::common::builders::{PayloadBuilder, TemplateBuilder};

use form_records::schema::{FieldType, validate_field_definition, validate_record_data};
use form_records::{FieldDraft, SchemaError};

/// Messages produced by a single optional field of `field_type` holding `value`.
fn check(field_type: FieldType, value: Value) -> Vec<String> {
    let template = TemplateBuilder::new("Single")
        .field("x", field_type, "Value")
        .build();
    let data = PayloadBuilder::new().with("x", value).build();
    validate_record_data(&template, &data)
}

fn accepts(field_type: FieldType, value: Value) {
    let errors = check(field_type, value.clone());
    assert!(errors.is_empty(), "{} should accept {}: {:?}", field_type, value, errors);
}

fn rejects(field_type: FieldType, value: Value) {
    let errors = check(field_type, value.clone());
    assert_eq!(errors.len(), 1, "{} should reject {}", field_type, value);
}

#[test]
fn test_email_values() {
    for value in ["a@b.co", "first.last+tag@mail.example.org"] {
        accepts(FieldType::Email, json!(value));
    }
    for value in ["plain", "a@b", "a b@c.de", "a@@b.co", "@b.co", "a@b.c d"] {
        rejects(FieldType::Email, json!(value));
    }
    assert_eq!(
        check(FieldType::Email, json!("x")),
        vec!["Value must be a valid email"]
    );
}

#[test]
fn test_number_values() {
    for value in [json!(12), json!(-3.5), json!("12.5"), json!(" 7 "), json!("1e3")] {
        accepts(FieldType::Number, value);
    }
    for value in [json!("12a"), json!("twelve"), json!(true), json!([1])] {
        rejects(FieldType::Number, value);
    }
    assert_eq!(
        check(FieldType::Number, json!("abc")),
        vec!["Value must be a valid number"]
    );
}

#[test]
fn test_date_values() {
    for value in ["2024-02-29", "1999-12-31", "0001-01-01"] {
        accepts(FieldType::Date, json!(value));
    }
    for value in [
        "2023-02-29",
        "2024-13-01",
        "2024-1-05",
        "24-01-05",
        "2024/01/05",
        "2024-01-05T00:00:00",
        " 2024-01-05",
    ] {
        rejects(FieldType::Date, json!(value));
    }
    rejects(FieldType::Date, json!(20240105));
    assert_eq!(
        check(FieldType::Date, json!("soon")),
        vec!["Value must be a valid date (YYYY-MM-DD)"]
    );
}

#[test]
fn test_select_values_are_exact() {
    let template = TemplateBuilder::new("Select")
        .select("s", "Dept", &["IT", "HR", "42"], false)
        .build();
    let run = |value: Value| {
        validate_record_data(&template, &PayloadBuilder::new().with("s", value).build())
    };

    assert!(run(json!("IT")).is_empty());
    assert!(run(json!(42)).is_empty());
    assert_eq!(run(json!("it")), vec!["Dept must be one of: IT, HR, 42"]);
    assert_eq!(run(json!(" IT")).len(), 1);
}

#[test]
fn test_select_without_stored_options_accepts_anything() {
    // snapshot written before options were enforced
    accepts(FieldType::Select, json!("anything"));
}

#[test]
fn test_free_text_types_never_fail_on_format() {
    for field_type in [FieldType::Text, FieldType::Textarea, FieldType::Password] {
        for value in [json!("anything"), json!(12), json!({"nested": true})] {
            accepts(field_type, value);
        }
    }
}

#[test]
fn test_field_definition_rules() {
    let normalized = validate_field_definition(
        &FieldDraft::new("SELECT", "Dept").with_options(["  IT ", "", "HR"]),
    )
    .unwrap();
    assert_eq!(normalized.options, vec!["IT", "HR"]);

    let error = validate_field_definition(&FieldDraft::new("SELECT", "Dept")).unwrap_err();
    assert_eq!(error, SchemaError::MissingOptions);

    let error =
        validate_field_definition(&FieldDraft::new("SELECT", "Dept").with_options(["  ", ""]))
            .unwrap_err();
    assert_eq!(error, SchemaError::BlankOptions);

    let error = validate_field_definition(&FieldDraft::new("CHECKBOX", "Agree")).unwrap_err();
    assert!(matches!(error, SchemaError::UnknownFieldType { .. }));

    let error = validate_field_definition(&FieldDraft::new("TEXT", "  ")).unwrap_err();
    assert_eq!(error, SchemaError::EmptyLabel);
}
