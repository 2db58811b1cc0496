//! Boolean field with lenient coercion

use crate::field::{Field, FieldError, FieldResult};
use serde_json::Value;

/// Boolean field accepting JSON booleans plus common textual and numeric forms
#[derive(Debug, Clone)]
pub struct BooleanField {
	pub name: String,
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
	pub default: Option<Value>,
	pub source: Option<String>,
}

impl BooleanField {
	/// Create a new BooleanField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::BooleanField;
	///
	/// let field = BooleanField::new("is_active");
	/// assert_eq!(field.name, "is_active");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			read_only: false,
			write_only: false,
			default: None,
			source: None,
		}
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

	fn coerce(&self, value: &Value) -> FieldResult<bool> {
		match value {
			Value::Bool(b) => Ok(*b),
			Value::String(s) => match s.to_ascii_lowercase().as_str() {
				"true" | "1" | "yes" => Ok(true),
				"false" | "0" | "no" => Ok(false),
				_ => Err(FieldError::Validation("Must be a valid boolean".to_string())),
			},
			Value::Number(n) => match n.as_i64() {
				Some(1) => Ok(true),
				Some(0) => Ok(false),
				_ => Err(FieldError::Validation("Must be a valid boolean".to_string())),
			},
			_ => Err(FieldError::Validation("Must be a valid boolean".to_string())),
		}
	}
}

impl Field for BooleanField {
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
		if value.is_null() {
			if self.required {
				return Err(FieldError::Required);
			}
			return Err(FieldError::Validation("Must be a valid boolean".to_string()));
		}
		self.coerce(value).map(Value::Bool)
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		self.coerce(value).map(Value::Bool)
	}
}
