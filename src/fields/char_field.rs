//! Character field for text values

use crate::field::{Field, FieldError, FieldResult};
use serde_json::Value;

/// Character field with length validation
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
	pub default: Option<Value>,
	pub source: Option<String>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub strip: bool,
}

impl CharField {
	/// Create a new CharField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::CharField;
	///
	/// let field = CharField::new("username");
	/// assert_eq!(field.name, "username");
	/// assert!(!field.required);
	/// assert_eq!(field.max_length, None);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			read_only: false,
			write_only: false,
			default: None,
			source: None,
			max_length: None,
			min_length: None,
			strip: true,
		}
	}

	/// Mark the field as required
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::CharField;
	///
	/// let field = CharField::new("username").required();
	/// assert!(field.required);
	/// ```
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

	/// Set a dotted attribute path to extract this field from, e.g. `"author.name"`
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	/// Set the maximum length for the field
	///
	/// # Examples
	///
	/// ```
	/// use guimauve::fields::CharField;
	///
	/// let field = CharField::new("username").with_max_length(100);
	/// assert_eq!(field.max_length, Some(100));
	/// ```
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Set the minimum length for the field
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	/// Disable whitespace stripping for the field
	pub fn no_strip(mut self) -> Self {
		self.strip = false;
		self
	}
}

impl Field for CharField {
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
		let raw = match value {
			Value::Null => None,
			other => Some(
				other
					.as_str()
					.ok_or_else(|| FieldError::Validation("Value must be a string".to_string()))?,
			),
		};

		let processed = match raw {
			Some(v) => {
				let v = if self.strip { v.trim() } else { v };
				if v.is_empty() {
					if self.required {
						return Err(FieldError::Required);
					}
					return Ok(Value::String(String::new()));
				}
				v.to_string()
			}
			None => {
				if self.required {
					return Err(FieldError::Required);
				}
				return Ok(Value::String(String::new()));
			}
		};

		// Length uses character count (not byte count) for correct
		// multi-byte handling (CJK, emoji, accented characters)
		let char_count = processed.chars().count();
		let mut violations = Vec::new();

		if let Some(max_length) = self.max_length
			&& char_count > max_length
		{
			violations.push(format!(
				"Ensure this value has at most {} characters (it has {})",
				max_length, char_count
			));
		}

		if let Some(min_length) = self.min_length
			&& char_count < min_length
		{
			violations.push(format!(
				"Ensure this value has at least {} characters (it has {})",
				min_length, char_count
			));
		}

		match violations.len() {
			0 => Ok(Value::String(processed)),
			1 => Err(FieldError::Validation(violations.remove(0))),
			_ => Err(FieldError::Messages(violations)),
		}
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		match value {
			Value::String(s) => Ok(Value::String(s.clone())),
			other => Ok(Value::String(other.to_string())),
		}
	}
}
