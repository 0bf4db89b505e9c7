//! Validation engine tests, organized by concern.

pub mod field_types;
pub mod properties;
pub mod scenarios;
