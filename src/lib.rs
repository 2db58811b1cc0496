//! Declarative field-based serialization and validation for JSON mappings
//!
//! This crate maps domain objects to and from flat JSON mappings through an
//! ordered collection of named fields:
//! - Leaf fields convert and validate one value each, reporting every
//!   constraint violation rather than stopping at the first
//! - A [`Serializer`] composes fields (recursively, via nested fields),
//!   runs class-level and object-level validation, and caches each derived
//!   product for its one-shot lifecycle
//! - User-supplied [`persistence::PersistenceHook`]s turn validated data
//!   into stored domain objects, with automatic create/update dispatch
//!
//! Bad input is a reportable validation result; calling operations out of
//! lifecycle order (saving before validating, reading output before it is
//! resolved) is a programmer error and panics.
//!
//! # Examples
//!
//! ```
//! use guimauve::Serializer;
//! use guimauve::fields::{CharField, IntegerField};
//! use serde_json::json;
//!
//! let input = json!({"title": "Swing 42", "rating": 5});
//! let mut serializer = Serializer::<serde_json::Value>::new()
//!     .with_field(CharField::new("title").required().with_max_length(100))
//!     .with_field(IntegerField::new("rating").with_min_value(1).with_max_value(5))
//!     .bind(input.as_object().cloned().unwrap());
//!
//! assert!(serializer.is_valid());
//! assert_eq!(serializer.validated_data()["title"], json!("Swing 42"));
//! ```

pub mod field;
pub mod fields;
pub mod persistence;
pub mod serializer;
pub mod validators;

mod pipeline;

/// Flat JSON mapping; insertion-ordered so outputs keep declaration order
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Error collection keyed by field name (or [`serializer::NON_FIELD_ERRORS`])
pub type ErrorMap = std::collections::HashMap<String, Vec<String>>;

pub use field::{Field, FieldError, FieldResult, get_attribute};
pub use fields::{
	BooleanField, CharField, FloatField, IntegerField, ListField, MethodField, NestedField,
};
pub use persistence::{PersistenceError, PersistenceHook};
pub use serializer::{
	NON_FIELD_ERRORS, ObjectValidationError, Serializer, SerializerError, ValidationState,
};
pub use validators::{
	FieldsEqualValidator, RequiredTogetherValidator, Validator, ValidatorFailure,
};
