//! Floating point field with range validation

use crate::field::{Field, FieldError, FieldResult};
use serde_json::Value;

/// Float field accepting JSON numbers and numeric strings
#[derive(Debug, Clone)]
pub struct FloatField {
	pub name: String,
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
	pub default: Option<Value>,
	pub source: Option<String>,
	pub min_value: Option<f64>,
	pub max_value: Option<f64>,
}

impl FloatField {
	/// Create a new FloatField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::FloatField;
	///
	/// let field = FloatField::new("price");
	/// assert_eq!(field.name, "price");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			read_only: false,
			write_only: false,
			default: None,
			source: None,
			min_value: None,
			max_value: None,
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

	/// Set the minimum accepted value (inclusive)
	pub fn with_min_value(mut self, min_value: f64) -> Self {
		self.min_value = Some(min_value);
		self
	}

	/// Set the maximum accepted value (inclusive)
	pub fn with_max_value(mut self, max_value: f64) -> Self {
		self.max_value = Some(max_value);
		self
	}

	fn coerce(&self, value: &Value) -> FieldResult<f64> {
		match value {
			Value::Number(n) => n
				.as_f64()
				.ok_or_else(|| FieldError::Validation("A valid number is required".to_string())),
			Value::String(s) => s
				.trim()
				.parse::<f64>()
				.map_err(|_| FieldError::Validation("A valid number is required".to_string())),
			_ => Err(FieldError::Validation("A valid number is required".to_string())),
		}
	}
}

impl Field for FloatField {
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
			return Err(FieldError::Validation("A valid number is required".to_string()));
		}

		let number = self.coerce(value)?;

		if let Some(min_value) = self.min_value
			&& number < min_value
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is greater than or equal to {}",
				min_value
			)));
		}

		if let Some(max_value) = self.max_value
			&& number > max_value
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is less than or equal to {}",
				max_value
			)));
		}

		serde_json::Number::from_f64(number)
			.map(Value::Number)
			.ok_or_else(|| FieldError::Validation("A valid number is required".to_string()))
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		let number = self.coerce(value)?;
		serde_json::Number::from_f64(number)
			.map(Value::Number)
			.ok_or_else(|| FieldError::Validation("A valid number is required".to_string()))
	}
}
