//! Integer field with range validation

use crate::field::{Field, FieldError, FieldResult};
use serde_json::Value;

/// Integer field accepting JSON numbers and integral strings
#[derive(Debug, Clone)]
pub struct IntegerField {
	pub name: String,
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
	pub default: Option<Value>,
	pub source: Option<String>,
	pub min_value: Option<i64>,
	pub max_value: Option<i64>,
}

impl IntegerField {
	/// Create a new IntegerField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::IntegerField;
	///
	/// let field = IntegerField::new("age");
	/// assert_eq!(field.name, "age");
	/// assert_eq!(field.min_value, None);
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
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::IntegerField;
	///
	/// let field = IntegerField::new("age").with_min_value(0);
	/// assert_eq!(field.min_value, Some(0));
	/// ```
	pub fn with_min_value(mut self, min_value: i64) -> Self {
		self.min_value = Some(min_value);
		self
	}

	/// Set the maximum accepted value (inclusive)
	pub fn with_max_value(mut self, max_value: i64) -> Self {
		self.max_value = Some(max_value);
		self
	}

	fn coerce(&self, value: &Value) -> FieldResult<i64> {
		match value {
			Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					return Ok(i);
				}
				// Accept floats with no fractional part, e.g. 3.0
				if let Some(f) = n.as_f64()
					&& f.fract() == 0.0
					&& f >= i64::MIN as f64
					&& f <= i64::MAX as f64
				{
					return Ok(f as i64);
				}
				Err(FieldError::Validation("A valid integer is required".to_string()))
			}
			Value::String(s) => s
				.trim()
				.parse::<i64>()
				.map_err(|_| FieldError::Validation("A valid integer is required".to_string())),
			_ => Err(FieldError::Validation("A valid integer is required".to_string())),
		}
	}
}

impl Field for IntegerField {
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
			return Err(FieldError::Validation("A valid integer is required".to_string()));
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

		Ok(Value::from(number))
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		let number = self.coerce(value)?;
		Ok(Value::from(number))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_integer_field_accepts_numbers() {
		let field = IntegerField::new("age");
		assert_eq!(field.to_internal(&json!(30)).unwrap(), json!(30));
		assert_eq!(field.to_internal(&json!(3.0)).unwrap(), json!(3));
	}

	#[rstest]
	fn test_integer_field_accepts_integral_strings() {
		let field = IntegerField::new("age");
		assert_eq!(field.to_internal(&json!("42")).unwrap(), json!(42));
		assert_eq!(field.to_internal(&json!(" -7 ")).unwrap(), json!(-7));
	}

	#[rstest]
	#[case(json!(3.5))]
	#[case(json!("abc"))]
	#[case(json!(true))]
	#[case(json!([1]))]
	fn test_integer_field_rejects_non_integers(#[case] value: Value) {
		let field = IntegerField::new("age");
		assert!(field.to_internal(&value).is_err());
	}

	#[rstest]
	fn test_integer_field_range() {
		let field = IntegerField::new("age").with_min_value(0).with_max_value(150);

		assert!(field.to_internal(&json!(0)).is_ok());
		assert!(field.to_internal(&json!(150)).is_ok());
		assert!(field.to_internal(&json!(-1)).is_err());
		assert!(field.to_internal(&json!(151)).is_err());
	}

	#[rstest]
	fn test_integer_field_null() {
		let required = IntegerField::new("age").required();
		assert_eq!(required.to_internal(&json!(null)), Err(FieldError::Required));

		let optional = IntegerField::new("age");
		assert!(optional.to_internal(&json!(null)).is_err());
	}
}
