//! Worked validation scenarios.
//!
//! Each test builds a small template, validates one payload and checks the
//! exact messages and their order.

use serde_json::json;

use crate::common::builders::{PayloadBuilder, TemplateBuilder};

use form_records::schema::{FieldDefinition, FieldType, Template, validate_record_data};
use form_records::{Record, RecordData};

fn staff_template() -> Template {
    TemplateBuilder::new("Staff")
        .required("f1", FieldType::Text, "Name")
        .required("f2", FieldType::Email, "Email")
        .field("f3", FieldType::Number, "Age")
        .select("f4", "Dept", &["IT", "HR"], false)
        .build()
}

#[test]
fn test_valid_payload_has_no_errors() {
    let template = staff_template();
    let data = PayloadBuilder::new()
        .with("f1", json!("Ann"))
        .with("f2", json!("ann@x.com"))
        .build();

    assert!(validate_record_data(&template, &data).is_empty());
}

#[test]
fn test_multiple_failures_are_reported_in_template_order() {
    let template = staff_template();
    let data = PayloadBuilder::new()
        .with("f1", json!(""))
        .with("f2", json!("not-an-email"))
        .build();

    assert_eq!(
        validate_record_data(&template, &data),
        vec!["Name is required", "Email must be a valid email"]
    );
}

#[test]
fn test_optional_blank_number_is_skipped() {
    let template = staff_template();
    let data = PayloadBuilder::new()
        .with("f1", json!("Ann"))
        .with("f2", json!("ann@x.com"))
        .with("f3", json!(""))
        .build();

    assert!(validate_record_data(&template, &data).is_empty());
}

#[test]
fn test_select_mismatch_lists_options() {
    let template = staff_template();
    let data = PayloadBuilder::new()
        .with("f1", json!("Ann"))
        .with("f2", json!("ann@x.com"))
        .with("f4", json!("Sales"))
        .build();

    assert_eq!(
        validate_record_data(&template, &data),
        vec!["Dept must be one of: IT, HR"]
    );
}

#[test]
fn test_required_blank_forms_are_equivalent() {
    let template = TemplateBuilder::new("Dates")
        .required("d", FieldType::Date, "Start")
        .build();

    let expected = vec!["Start is required".to_string()];
    for value in [json!(""), json!("   "), json!(null), json!([]), json!({})] {
        let data = PayloadBuilder::new().with("d", value.clone()).build();
        assert_eq!(validate_record_data(&template, &data), expected, "{}", value);
    }
    assert_eq!(validate_record_data(&template, &RecordData::new()), expected);
}

#[test]
fn test_zero_and_false_are_present() {
    let template = TemplateBuilder::new("Flags")
        .required("n", FieldType::Number, "Count")
        .required("t", FieldType::Text, "Flag")
        .build();
    let data = PayloadBuilder::new()
        .with("n", json!(0))
        .with("t", json!(false))
        .build();

    assert!(validate_record_data(&template, &data).is_empty());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let template = staff_template();
    let data = PayloadBuilder::new()
        .with("f1", json!("Ann"))
        .with("f2", json!("ann@x.com"))
        .with("stale-field", json!("left over from a removed field"))
        .build();

    assert!(validate_record_data(&template, &data).is_empty());
}

#[test]
fn test_order_field_drives_message_order() {
    let template = TemplateBuilder::new("Reordered")
        .definition(FieldDefinition::new("late", FieldType::Email, "Late").with_order(9))
        .definition(FieldDefinition::new("early", FieldType::Number, "Early").with_order(1))
        .build();
    let data = PayloadBuilder::new()
        .with("late", json!("nope"))
        .with("early", json!("nope"))
        .build();

    assert_eq!(
        validate_record_data(&template, &data),
        vec!["Early must be a valid number", "Late must be a valid email"]
    );
}

#[test]
fn test_record_display_name_fallback() {
    let template = TemplateBuilder::new("Badges")
        .field("b", FieldType::Text, "Badge")
        .build();
    let record = Record::new(&template.id, "tester", RecordData::new()).with_id("42");

    assert_eq!(record.display_name(&template), "Employee #42");
}

#[test]
fn test_record_display_name_prefers_first_name_like_field() {
    let template = TemplateBuilder::new("People")
        .field("e", FieldType::Email, "Email")
        .field("fn", FieldType::Text, "First Name")
        .field("en", FieldType::Text, "Employee_Name")
        .build();
    let data = PayloadBuilder::new()
        .with("fn", json!(""))
        .with("en", json!("Bo"))
        .build();
    let record = Record::new(&template.id, "tester", data);

    assert_eq!(record.display_name(&template), "Bo");
}
