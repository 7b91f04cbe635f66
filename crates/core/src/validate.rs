//! The validator
//!
//! Two entry points with deliberately different failure shapes:
//!
//! - [`validate_field`] runs on every edit for instant feedback, so it is
//!   fail-fast and returns a single message.
//! - [`validate_form`] runs once at submit time and is exhaustive: it
//!   returns the full per-field error map so the user sees every blocking
//!   error at once instead of fixing them one submit at a time.

use serde::Serialize;
use std::collections::HashMap;

use crate::schema::{FieldDescriptor, Schema};
use crate::value::{coerce, FieldValue, RawValue};

/// Per-field error messages in schema declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<(String, String)>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(name, msg)| (name == field).then_some(msg.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, m)| (n.as_str(), m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate one field's raw input against its descriptor.
///
/// Order is fixed: the required check short-circuits with the field's
/// required message, then coercion to the declared type, then the
/// declared constraints in order with the first failure winning.
pub fn validate_field(field: &FieldDescriptor, raw: &RawValue) -> Result<FieldValue, String> {
    if field.is_required() && raw.is_empty() {
        return Err(field.required_message());
    }

    let value = coerce(field.field_type(), raw)?;

    for constraint in field.constraints() {
        if !constraint.predicate.holds(&value) {
            return Err(constraint.message.clone());
        }
    }

    Ok(value)
}

/// Validate every declared field of a schema.
///
/// Fields missing from `raw_values` are validated against their declared
/// default. Succeeds only if every field succeeds; otherwise returns the
/// full error map.
pub fn validate_form(
    schema: &Schema,
    raw_values: &HashMap<String, RawValue>,
) -> Result<Vec<(String, FieldValue)>, ValidationErrors> {
    let mut typed = Vec::with_capacity(schema.fields().len());
    let mut errors = Vec::new();

    for field in schema.fields() {
        let raw = raw_values.get(field.name()).unwrap_or_else(|| field.default());
        match validate_field(field, raw) {
            Ok(value) => typed.push((field.name().to_string(), value)),
            Err(message) => errors.push((field.name().to_string(), message)),
        }
    }

    if errors.is_empty() {
        Ok(typed)
    } else {
        Err(ValidationErrors(errors))
    }
}
