//! Page catalog
//!
//! The schemas behind the playground site's forms, with the exact
//! user-facing messages the pages show. Every page shares the same
//! mechanics (session, validator, gateway, store); only the schema
//! differs.

use std::sync::Arc;

use playground_core::{FieldDescriptor, Schema};
use playground_forms::RecordStore;

/// The login page: username/password plus a remember-me checkbox.
///
/// Valid demo credentials are admin / test, checked by the credential
/// gateway rather than the schema.
pub fn login_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("login")
            .field(FieldDescriptor::text("username").required())
            .field(FieldDescriptor::text("password").required())
            .field(FieldDescriptor::boolean("remember").label("Remember me"))
            .display_field("username")
            .build()
            .expect("login schema is well-formed"),
    )
}

/// The product management page: name, quantity, and color
pub fn product_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("product")
            .field(FieldDescriptor::text("name").label("Product Name").required())
            .field(
                FieldDescriptor::number("quantity")
                    .required()
                    .min(1.0, "must be at least 1"),
            )
            .field(
                FieldDescriptor::text("color")
                    .required_with("Select color")
                    .one_of(["red", "green", "blue"], "Select color"),
            )
            .display_field("name")
            .build()
            .expect("product schema is well-formed"),
    )
}

/// The store backing the product page's searchable grid
pub fn product_store() -> Arc<RecordStore> {
    Arc::new(RecordStore::new("name"))
}

/// The components gallery's demo form: every validated element type the
/// site showcases
pub fn settings_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("settings")
            .field(
                FieldDescriptor::text("username")
                    .min_length(2, "Username must be at least 2 characters"),
            )
            .field(FieldDescriptor::text("email").email("Invalid email address"))
            .field(
                FieldDescriptor::number("age")
                    .min(18.0, "Must be at least 18 years old")
                    .default_value("18"),
            )
            .field(
                FieldDescriptor::boolean("terms").must_be_true("You must accept the terms"),
            )
            .field(
                FieldDescriptor::text("role")
                    .required_with("Please select a role")
                    .one_of(["admin", "user", "manager"], "Please select a role"),
            )
            .display_field("username")
            .build()
            .expect("settings schema is well-formed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::{validate_field, RawValue};

    #[test]
    fn test_login_messages() {
        let schema = login_schema();
        assert_eq!(
            validate_field(schema.field("username").unwrap(), &RawValue::from("")),
            Err("Username is required".to_string())
        );
        assert_eq!(
            validate_field(schema.field("password").unwrap(), &RawValue::from("")),
            Err("Password is required".to_string())
        );
    }

    #[test]
    fn test_settings_messages() {
        let schema = settings_schema();
        assert_eq!(
            validate_field(schema.field("username").unwrap(), &RawValue::from("x")),
            Err("Username must be at least 2 characters".to_string())
        );
        assert_eq!(
            validate_field(schema.field("email").unwrap(), &RawValue::from("nope")),
            Err("Invalid email address".to_string())
        );
        assert_eq!(
            validate_field(schema.field("age").unwrap(), &RawValue::from("17")),
            Err("Must be at least 18 years old".to_string())
        );
        assert_eq!(
            validate_field(schema.field("terms").unwrap(), &RawValue::from(false)),
            Err("You must accept the terms".to_string())
        );
        assert_eq!(
            validate_field(schema.field("role").unwrap(), &RawValue::from("")),
            Err("Please select a role".to_string())
        );
    }

    #[test]
    fn test_settings_age_default() {
        let schema = settings_schema();
        assert_eq!(
            schema.field("age").unwrap().default(),
            &RawValue::Text("18".to_string())
        );
    }

    #[test]
    fn test_product_color_choices() {
        let schema = product_schema();
        let color = schema.field("color").unwrap();
        assert!(validate_field(color, &RawValue::from("blue")).is_ok());
        assert_eq!(
            validate_field(color, &RawValue::from("purple")),
            Err("Select color".to_string())
        );
    }
}
