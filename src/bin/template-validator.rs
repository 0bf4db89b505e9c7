//! # Form Template Validator
//!
//! A command-line utility for checking form template files and, optionally,
//! validating a record data file against a template.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin template-validator templates/onboarding.json
//! cargo run --bin template-validator templates/onboarding.json data/ann.json
//! ```
//!
//! A template file holds a template draft:
//!
//! ```json
//! {
//!   "name": "Onboarding",
//!   "fields": [
//!     {"field_type": "TEXT", "label": "Full Name", "is_required": true},
//!     {"field_type": "SELECT", "label": "Dept", "options": ["IT", "HR"]}
//!   ]
//! }
//! ```
//!
//! A data file is a JSON object keyed by field label.
//!
//! ## Output Examples
//!
//! ```text
//! Validating template file: templates/onboarding.json
//! ✓ Template is valid!
//!
//! Template Summary:
//!   Name: Onboarding
//!   Fields: 2
//!   Required fields: 1
//!     1. Full Name (TEXT, required)
//!     2. Dept (SELECT: IT, HR)
//!
//! Validating data file: data/ann.json
//! ❌ Data is invalid:
//!   - Dept must be one of: IT, HR
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: The template (and data, when given) is valid
//! - `1`: Validation failed or a file could not be read

use form_records::error::SchemaError;
use form_records::schema::{
    FieldDefinition, RecordData, Template, TemplateDraft, normalize_template_name,
    validate_field_definition, validate_record_data,
};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <template.json> [data.json]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} templates/onboarding.json", args[0]);
        eprintln!("  {} templates/onboarding.json data/ann.json", args[0]);
        process::exit(1);
    }

    let template_path = Path::new(&args[1]);
    println!("Validating template file: {}", template_path.display());

    let template = match load_template(template_path) {
        Ok(template) => {
            println!("✓ Template is valid!");
            print_template_summary(&template);
            template
        }
        Err(e) => {
            eprintln!("❌ Template validation failed: {}", e);
            process::exit(1);
        }
    };

    if let Some(data_path) = args.get(2) {
        let data_path = Path::new(data_path);
        println!();
        println!("Validating data file: {}", data_path.display());

        match load_data(data_path) {
            Ok(data) => {
                let errors = validate_record_data(&template, &data);
                if errors.is_empty() {
                    println!("✓ Data is valid!");
                } else {
                    eprintln!("❌ Data is invalid:");
                    for error in &errors {
                        eprintln!("  - {}", error);
                    }
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("❌ Could not read data: {}", e);
                process::exit(1);
            }
        }
    }
}

/// Build a template from a draft file, keying each field by its label.
fn load_template(file_path: &Path) -> Result<Template, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    let draft: TemplateDraft = serde_json::from_str(&content)?;

    let name = normalize_template_name(&draft.name)?;
    if draft.fields.is_empty() {
        return Err(SchemaError::NoFields.into());
    }

    let mut template =
        Template::new(name, "template-validator").with_description(draft.description);
    for (index, field) in draft.fields.iter().enumerate() {
        let position = index + 1;
        let normalized = validate_field_definition(field).map_err(|e| e.at_position(position))?;
        let order = index as u32;
        let definition =
            FieldDefinition::from_normalized(normalized.label.clone(), normalized, order)
                .with_order(order);
        template
            .push_field(definition)
            .map_err(|e| e.at_position(position))?;
    }

    Ok(template)
}

fn load_data(file_path: &Path) -> Result<RecordData, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    match serde_json::from_str(&content)? {
        serde_json::Value::Object(data) => Ok(data),
        _ => Err("Data must be a dictionary".into()),
    }
}

fn print_template_summary(template: &Template) {
    println!();
    println!("Template Summary:");
    println!("  Name: {}", template.name);
    if let Some(description) = &template.description {
        println!("  Description: {}", description);
    }
    println!("  Fields: {}", template.field_count());
    println!("  Required fields: {}", template.required_field_count());

    for (index, field) in template.ordered_fields().into_iter().enumerate() {
        let mut detail = field.field_type.to_string();
        if field.field_type.has_options() {
            detail = format!("{}: {}", detail, field.options.join(", "));
        }
        if field.required {
            detail.push_str(", required");
        }
        println!("    {}. {} ({})", index + 1, field.label, detail);
    }
}
