//! Playground Form Core
//!
//! Schema declarations, input coercion, and validation for the testing
//! playground's form pipeline. Everything here is pure, in-memory data:
//! the asynchronous pieces (sessions, gateways, the record store) live in
//! `playground-forms`.

pub mod error;
pub mod record;
pub mod schema;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use error::{Error, Result};
pub use record::Record;
pub use schema::{Constraint, FieldDescriptor, FieldType, Predicate, Schema, SchemaBuilder};
pub use validate::{validate_field, validate_form, ValidationErrors};
pub use value::{FieldValue, RawValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
