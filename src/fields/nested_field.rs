//! Composite-as-field: a field whose converter is itself an ordered field list
//!
//! A `NestedField` lets one mapper embed another, so a domain object can
//! carry structured sub-objects ("author": {"name": ..., "email": ...}).
//! Child validation errors surface on the parent keyed by dotted paths.

use crate::field::{Field, FieldError, FieldResult};
use crate::pipeline::{self, FieldValidatorFn};
use serde_json::Value;
use std::collections::HashMap;

/// A field backed by an ordered list of child fields.
///
/// The deserialize path runs every child field against the nested object and
/// reports child errors under the parent field's name; the serialize path
/// assembles the child representation in declaration order.
///
/// # Examples
///
/// ```
/// use guimauve::field::Field;
/// use guimauve::fields::{CharField, NestedField};
/// use serde_json::json;
///
/// let author = NestedField::new("author")
///     .with_field(CharField::new("name").required())
///     .with_field(CharField::new("email"));
///
/// let value = author.to_internal(&json!({"name": "Ada", "email": "ada@example.com"}));
/// assert!(value.is_ok());
/// ```
pub struct NestedField {
	pub name: String,
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
	pub default: Option<Value>,
	pub source: Option<String>,
	fields: Vec<Box<dyn Field>>,
	// Nested mappers have no same-named custom validators of their own
	no_validators: HashMap<String, FieldValidatorFn>,
}

impl NestedField {
	/// Create a new NestedField with the given name and no child fields
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			read_only: false,
			write_only: false,
			default: None,
			source: None,
			fields: Vec::new(),
			no_validators: HashMap::new(),
		}
	}

	/// Append a child field; child names must be unique
	///
	/// # Panics
	///
	/// Panics if a child field with the same name was already declared.
	pub fn with_field(mut self, field: impl Field + 'static) -> Self {
		if self.fields.iter().any(|f| f.name() == field.name()) {
			panic!("Field '{}' already declared on '{}'", field.name(), self.name);
		}
		self.fields.push(Box::new(field));
		self
	}

	/// Mark the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Mark the field as read-only: present in representations, ignored on input
	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	/// Mark the field as write-only: accepted on input, omitted from representations
	pub fn write_only(mut self) -> Self {
		self.write_only = true;
		self
	}

	/// Set the fallback value used when the input or attribute is missing
	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// Set a dotted attribute path to extract this field from
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	/// The declared child fields, in order
	pub fn fields(&self) -> &[Box<dyn Field>] {
		&self.fields
	}
}

impl Field for NestedField {
	fn name(&self) -> &str {
		&self.name
	}

	fn required(&self) -> bool {
		self.required
	}

	fn read_only(&self) -> bool {
		self.read_only
	}

	fn write_only(&self) -> bool {
		self.write_only
	}

	fn default_value(&self) -> Option<&Value> {
		self.default.as_ref()
	}

	fn source(&self) -> &str {
		self.source.as_deref().unwrap_or(&self.name)
	}

	fn to_internal(&self, value: &Value) -> FieldResult<Value> {
		let object = value
			.as_object()
			.ok_or_else(|| FieldError::Validation("Expected an object".to_string()))?;

		match pipeline::fields_to_internal(&self.fields, object, &self.no_validators) {
			Ok(native) => Ok(Value::Object(native)),
			Err(errors) => Err(FieldError::Nested(errors)),
		}
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		match pipeline::fields_to_representation(&self.fields, value) {
			Ok(output) => Ok(Value::Object(output)),
			Err(errors) => Err(FieldError::Nested(errors)),
		}
	}
}
