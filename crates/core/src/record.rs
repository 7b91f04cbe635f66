//! Submitted records
//!
//! A record is produced only by a successful submission and is never
//! mutated afterwards; stores may only append it.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::value::FieldValue;

/// An immutable, schema-shaped value created by a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: String,
    form: String,
    submitted_at: i64,
    // Rendered as a JSON object (the gallery page shows submissions that
    // way), while the in-memory layout keeps declaration order.
    #[serde(serialize_with = "values_as_map")]
    values: Vec<(String, FieldValue)>,
}

fn values_as_map<S: Serializer>(
    values: &[(String, FieldValue)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(values.len()))?;
    for (name, value) in values {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

impl Record {
    /// Create a record from fully validated, typed values.
    ///
    /// `values` must be in schema declaration order; the validator's
    /// form-level output already is.
    pub fn new(form: &str, values: Vec<(String, FieldValue)>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            form: form.to_string(),
            submitted_at: chrono::Utc::now().timestamp(),
            values,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the form the record was submitted from
    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn submitted_at(&self) -> i64 {
        self.submitted_at
    }

    /// Field values in schema declaration order
    pub fn values(&self) -> &[(String, FieldValue)] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}
