//! Form schemas
//!
//! A schema is an immutable, ordered description of a record's fields:
//! each field's type, whether it is required, and the declarative
//! constraints its typed value must satisfy. Every constraint carries
//! exactly one human-readable failure message. Schemas are validated once
//! at construction and shared (behind `Arc`) by every session of a form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::value::{FieldValue, RawValue};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Declarative predicate over a field's typed value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Minimum number of characters in a text value
    MinLength(usize),
    /// Numeric lower bound (inclusive)
    Min(f64),
    /// Boolean must be checked
    MustBeTrue,
    /// Value must be one of an enumerated set of choices
    OneOf(Vec<String>),
    /// Email-shaped text
    Email,
}

impl Predicate {
    /// Whether this predicate can be evaluated against the given type.
    /// Checked once at schema construction.
    fn applies_to(&self, field_type: FieldType) -> bool {
        match self {
            Predicate::MinLength(_) | Predicate::OneOf(_) | Predicate::Email => {
                field_type == FieldType::Text
            }
            Predicate::Min(_) => field_type == FieldType::Number,
            Predicate::MustBeTrue => field_type == FieldType::Boolean,
        }
    }

    /// Evaluate against a typed value. Type mismatches are rejected at
    /// construction, so the fallback arm is unreachable for built schemas.
    pub fn holds(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Predicate::MinLength(n), FieldValue::Text(s)) => s.chars().count() >= *n,
            (Predicate::Min(bound), FieldValue::Number(x)) => x >= bound,
            (Predicate::MustBeTrue, FieldValue::Bool(b)) => *b,
            (Predicate::OneOf(choices), FieldValue::Text(s)) => choices.iter().any(|c| c == s),
            (Predicate::Email, FieldValue::Text(s)) => EMAIL_RE.is_match(s),
            _ => false,
        }
    }
}

/// One predicate paired with its failure message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub predicate: Predicate,
    pub message: String,
}

/// Description of a single field in a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    name: String,
    label: String,
    field_type: FieldType,
    required: bool,
    required_message: Option<String>,
    constraints: Vec<Constraint>,
    default: RawValue,
}

impl FieldDescriptor {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: derive_label(name),
            field_type,
            required: false,
            required_message: None,
            constraints: Vec::new(),
            default: RawValue::default_for(field_type),
        }
    }

    /// A text field
    pub fn text(name: &str) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// A numeric field (raw input parsed as a number)
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// A boolean field (checkbox / switch input)
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Override the derived human-readable label
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Mark the field required; the failure message defaults to
    /// "{label} is required".
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field required with a custom message
    pub fn required_with(mut self, message: &str) -> Self {
        self.required = true;
        self.required_message = Some(message.to_string());
        self
    }

    pub fn min_length(self, min: usize, message: &str) -> Self {
        self.constraint(Predicate::MinLength(min), message)
    }

    pub fn min(self, bound: f64, message: &str) -> Self {
        self.constraint(Predicate::Min(bound), message)
    }

    pub fn must_be_true(self, message: &str) -> Self {
        self.constraint(Predicate::MustBeTrue, message)
    }

    pub fn one_of<I, S>(self, choices: I, message: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        self.constraint(Predicate::OneOf(choices), message)
    }

    pub fn email(self, message: &str) -> Self {
        self.constraint(Predicate::Email, message)
    }

    /// Initial raw value the session starts from (and resets to)
    pub fn default_value(mut self, raw: impl Into<RawValue>) -> Self {
        self.default = raw.into();
        self
    }

    fn constraint(mut self, predicate: Predicate, message: &str) -> Self {
        self.constraints.push(Constraint {
            predicate,
            message: message.to_string(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Message shown when a required field is left empty
    pub fn required_message(&self) -> String {
        self.required_message
            .clone()
            .unwrap_or_else(|| format!("{} is required", self.label))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn default(&self) -> &RawValue {
        &self.default
    }
}

fn derive_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Immutable, ordered description of a form's record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    display_field: Option<String>,
}

impl Schema {
    /// Start building a schema for the named form
    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            name: name.to_string(),
            fields: Vec::new(),
            display_field: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field whose value represents a record in lists and filters
    pub fn display_field(&self) -> Option<&str> {
        self.display_field.as_deref()
    }
}

/// Builder that validates the schema once, at construction
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    display_field: Option<String>,
}

impl SchemaBuilder {
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn display_field(mut self, name: &str) -> Self {
        self.display_field = Some(name.to_string());
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField {
                    name: field.name.clone(),
                });
            }
            for constraint in &field.constraints {
                if !constraint.predicate.applies_to(field.field_type) {
                    return Err(Error::InvalidSchema(format!(
                        "constraint {:?} does not apply to {} field {}",
                        constraint.predicate, field.field_type, field.name
                    )));
                }
                if let Predicate::OneOf(choices) = &constraint.predicate {
                    if choices.is_empty() {
                        return Err(Error::InvalidSchema(format!(
                            "field {} has an empty choice list",
                            field.name
                        )));
                    }
                }
            }
        }

        if let Some(display) = &self.display_field {
            if !seen.contains(display.as_str()) {
                return Err(Error::UnknownField {
                    name: display.clone(),
                });
            }
        }

        Ok(Schema {
            name: self.name,
            fields: self.fields,
            display_field: self.display_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let schema = Schema::builder("login")
            .field(FieldDescriptor::text("username").required())
            .field(FieldDescriptor::text("password").required())
            .field(FieldDescriptor::boolean("remember"))
            .build()
            .unwrap();

        let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["username", "password", "remember"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::builder("bad")
            .field(FieldDescriptor::text("name"))
            .field(FieldDescriptor::text("name"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateField {
                name: "name".to_string()
            }
        );
    }

    #[test]
    fn test_display_field_must_exist() {
        let err = Schema::builder("bad")
            .field(FieldDescriptor::text("name"))
            .display_field("title")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_mismatched_constraint_rejected() {
        let err = Schema::builder("bad")
            .field(FieldDescriptor::text("quantity").min(1.0, "must be at least 1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_empty_choice_list_rejected() {
        let err = Schema::builder("bad")
            .field(FieldDescriptor::text("color").one_of(Vec::<String>::new(), "pick one"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_required_message_defaults_to_label() {
        let field = FieldDescriptor::text("username").required();
        assert_eq!(field.required_message(), "Username is required");

        let field = FieldDescriptor::text("role").required_with("Please select a role");
        assert_eq!(field.required_message(), "Please select a role");
    }

    #[test]
    fn test_email_predicate() {
        let pred = Predicate::Email;
        assert!(pred.holds(&FieldValue::Text("user@example.com".into())));
        assert!(!pred.holds(&FieldValue::Text("not-an-email".into())));
        assert!(!pred.holds(&FieldValue::Text("a@b".into())));
    }
}
