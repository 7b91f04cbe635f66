//! Field values and input coercion
//!
//! The rendering layer hands the core raw input: text from inputs and
//! selects, booleans from checkboxes and switches. Coercion turns a raw
//! value into the closed set of typed variants a schema declares, so the
//! rest of the pipeline never touches untyped data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::FieldType;

/// Raw input as sent by the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Bool(bool),
}

impl RawValue {
    /// The initial raw value for a field of the given type
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text | FieldType::Number => Self::Text(String::new()),
            FieldType::Boolean => Self::Bool(false),
        }
    }

    /// Whether this raw value counts as "not provided" for required checks.
    ///
    /// Checkbox input always carries a value, so only empty text is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A typed field value produced by successful coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Coerce a raw value to the declared field type.
///
/// The error is the fixed, user-facing coercion message; it is surfaced
/// exactly like any other field validation failure.
pub fn coerce(field_type: FieldType, raw: &RawValue) -> Result<FieldValue, String> {
    match (field_type, raw) {
        (FieldType::Text, RawValue::Text(s)) => Ok(FieldValue::Text(s.clone())),
        (FieldType::Text, RawValue::Bool(_)) => Err("must be text".to_string()),
        (FieldType::Number, RawValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(FieldValue::Number)
            .map_err(|_| "must be a number".to_string()),
        (FieldType::Number, RawValue::Bool(_)) => Err("must be a number".to_string()),
        // Checkbox input is already boolean; anything else is a wiring bug
        // on the page and reported with the fixed message.
        (FieldType::Boolean, RawValue::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldType::Boolean, RawValue::Text(_)) => Err("must be a boolean".to_string()),
    }
}
