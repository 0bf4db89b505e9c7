//! Property-based tests for the validation engine.
//!
//! Uses proptest to generate templates and payloads and checks the
//! invariants every validation run must hold.

use proptest::prelude::*;
use serde_json::{Value, json};

use crate::common::builders::{PayloadBuilder, TemplateBuilder};

use form_records::schema::{FieldType, Template, validate_record_data};

fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

/// Strategy for generating payload values of any JSON shape
fn json_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(|s| json!(s)),
        "[ a-zA-Z0-9@.\\-]{0,20}".prop_map(|s| json!(s)),
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        Just(Value::Null),
        Just(json!("2024-02-29")),
        Just(json!("IT")),
        Just(json!([])),
        Just(json!({"key": "value"})),
    ]
}

prop_compose! {
    fn template_strategy()
        (specs in prop::collection::vec((field_type_strategy(), any::<bool>()), 1..12))
        -> Template {
        let mut builder = TemplateBuilder::new("Generated");
        for (i, (field_type, required)) in specs.into_iter().enumerate() {
            let id = format!("f{}", i);
            let label = format!("Field {}", i);
            builder = match (field_type, required) {
                (FieldType::Select, _) => builder.select(&id, &label, &["IT", "HR"], required),
                (_, true) => builder.required(&id, field_type, &label),
                (_, false) => builder.field(&id, field_type, &label),
            };
        }
        builder.build()
    }
}

prop_compose! {
    fn scenario_strategy()
        (template in template_strategy())
        (values in prop::collection::vec(
            prop::option::of(json_value_strategy()),
            template.field_count(),
        ), template in Just(template))
        -> (Template, Value) {
        let mut payload = PayloadBuilder::new();
        for (field, value) in template.fields().iter().zip(values) {
            if let Some(value) = value {
                payload = payload.with(&field.id, value);
            }
        }
        (template, payload.into_value())
    }
}

proptest! {
    #[test]
    fn test_validation_is_idempotent((template, payload) in scenario_strategy()) {
        let data = payload.as_object().cloned().unwrap_or_default();
        let first = validate_record_data(&template, &data);
        let second = validate_record_data(&template, &data);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_at_most_one_message_per_field((template, payload) in scenario_strategy()) {
        let data = payload.as_object().cloned().unwrap_or_default();
        let errors = validate_record_data(&template, &data);
        prop_assert!(errors.len() <= template.field_count());

        // messages follow template order: each starts with its field's label
        let mut labels = template.ordered_fields().into_iter().map(|f| f.label.as_str());
        for error in &errors {
            prop_assert!(
                labels.any(|label| error.starts_with(&format!("{} ", label))),
                "message out of order: {}",
                error
            );
        }
    }

    #[test]
    fn test_every_invalid_field_is_reported(count in 1usize..10) {
        let mut builder = TemplateBuilder::new("Numbers");
        let mut payload = PayloadBuilder::new();
        for i in 0..count {
            let id = format!("n{}", i);
            builder = builder.field(&id, FieldType::Number, &format!("Number {}", i));
            payload = payload.with(&id, json!("not a number"));
        }
        let template = builder.build();

        let errors = validate_record_data(&template, &payload.build());
        prop_assert_eq!(errors.len(), count);
        for (i, error) in errors.iter().enumerate() {
            prop_assert_eq!(error, &format!("Number {} must be a valid number", i));
        }
    }

    #[test]
    fn test_optional_fields_accept_absence((template, _payload) in scenario_strategy()) {
        let data = Default::default();
        let errors = validate_record_data(&template, &data);
        prop_assert_eq!(errors.len(), template.required_field_count());
        for error in &errors {
            prop_assert!(error.ends_with(" is required"));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_service_writes_agree_with_engine(
        values in prop::collection::vec(json_value_strategy(), 3)
    ) {
        tokio_test::block_on(async {
            let service = crate::common::create_service();
            let context = crate::common::user_context("prop");
            let template = service
                .create_template(&context, crate::common::builders::staff_draft("Generated"))
                .await
                .unwrap();

            let mut payload = PayloadBuilder::new();
            for (field, value) in template.fields().iter().zip(values) {
                payload = payload.with(&field.id, value);
            }
            let data = payload.build();
            let expected = validate_record_data(&template, &data);

            let result = service
                .create_record(&context, &template.id, Value::Object(data))
                .await;
            match result {
                Ok(_) => assert!(expected.is_empty()),
                Err(error) => assert_eq!(error.validation_messages(), Some(expected.as_slice())),
            }
        });
    }
}
