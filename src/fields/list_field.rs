//! List field applying one item converter to every element

use crate::field::{Field, FieldError, FieldResult};
use serde_json::Value;
use std::collections::HashMap;

/// A field that converts a JSON array element-wise through an item field.
///
/// Item errors are reported under the element index, which the serializer
/// flattens to dotted keys such as `"tags.2"`.
///
/// # Examples
///
/// ```
/// use guimauve::field::Field;
/// use guimauve::fields::{CharField, ListField};
/// use serde_json::json;
///
/// let tags = ListField::new("tags", CharField::new("tag").with_max_length(20));
/// let value = tags.to_internal(&json!(["rust", "serde"])).unwrap();
/// assert_eq!(value, json!(["rust", "serde"]));
/// ```
pub struct ListField {
	pub name: String,
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
	pub default: Option<Value>,
	pub source: Option<String>,
	item: Box<dyn Field>,
}

impl ListField {
	/// Create a new ListField converting each element with `item`
	pub fn new(name: impl Into<String>, item: impl Field + 'static) -> Self {
		Self {
			name: name.into(),
			required: false,
			read_only: false,
			write_only: false,
			default: None,
			source: None,
			item: Box::new(item),
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

	fn convert(
		&self,
		value: &Value,
		apply: impl Fn(&Value) -> FieldResult<Value>,
	) -> FieldResult<Value> {
		let items = value
			.as_array()
			.ok_or_else(|| FieldError::Validation("Expected a list of items".to_string()))?;

		let mut converted = Vec::with_capacity(items.len());
		let mut errors: HashMap<String, Vec<String>> = HashMap::new();

		for (index, item) in items.iter().enumerate() {
			match apply(item) {
				Ok(value) => converted.push(value),
				Err(error) => {
					errors
						.entry(index.to_string())
						.or_default()
						.extend(error.into_messages());
				}
			}
		}

		if errors.is_empty() {
			Ok(Value::Array(converted))
		} else {
			Err(FieldError::Nested(errors))
		}
	}
}

impl Field for ListField {
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
		self.convert(value, |item| self.item.to_internal(item))
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		self.convert(value, |item| self.item.to_representation(item))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{CharField, IntegerField};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_list_field_converts_every_item() {
		let field = ListField::new("scores", IntegerField::new("score"));
		let value = field.to_internal(&json!([1, "2", 3.0])).unwrap();
		assert_eq!(value, json!([1, 2, 3]));
	}

	#[rstest]
	fn test_list_field_errors_keyed_by_index() {
		let field = ListField::new("tags", CharField::new("tag").with_max_length(3));
		let error = field.to_internal(&json!(["ok", "too long", "fine-not"])).unwrap_err();

		let FieldError::Nested(errors) = error else {
			panic!("expected nested errors");
		};
		assert!(!errors.contains_key("0"));
		assert!(errors.contains_key("1"));
		assert!(errors.contains_key("2"));
	}

	#[rstest]
	fn test_list_field_rejects_non_array() {
		let field = ListField::new("tags", CharField::new("tag"));
		assert!(field.to_internal(&json!("rust")).is_err());
	}
}
