//! Field trait and error types shared by all leaf converters

use serde_json::Value;
use std::collections::HashMap;

/// Error produced by a single field during conversion or validation.
///
/// A field may report several simultaneous constraint violations through
/// [`FieldError::Messages`]; callers should treat every variant as a list
/// of messages via [`FieldError::into_messages`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	/// The field is required but no value was supplied
	#[error("This field is required")]
	Required,
	/// A single constraint or coercion failure
	#[error("{0}")]
	Validation(String),
	/// Multiple simultaneous constraint violations on one field
	#[error("{}", .0.join("; "))]
	Messages(Vec<String>),
	/// A nested mapper failed; errors are keyed by the child field name
	#[error("Nested validation failed")]
	Nested(HashMap<String, Vec<String>>),
}

impl FieldError {
	/// Flatten this error into a list of messages.
	///
	/// [`FieldError::Nested`] is not flattened here; the serializer keys
	/// nested errors with dotted paths instead.
	pub fn into_messages(self) -> Vec<String> {
		match self {
			FieldError::Required => vec!["This field is required".to_string()],
			FieldError::Validation(msg) => vec![msg],
			FieldError::Messages(msgs) => msgs,
			FieldError::Nested(map) => map.into_values().flatten().collect(),
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A leaf converter between one primitive value and one native value.
///
/// `to_internal` runs on the deserialize path (raw input to validated
/// native value) and `to_representation` on the serialize path (domain
/// object attribute to output primitive). Each concrete field owns its
/// constraints: required/optional, read/write direction, defaults, and
/// type coercion rules.
///
/// # Examples
///
/// ```
/// use guimauve::fields::CharField;
/// use guimauve::field::Field;
/// use serde_json::json;
///
/// let field = CharField::new("title").required().with_max_length(100);
/// assert_eq!(field.name(), "title");
/// assert_eq!(field.to_internal(&json!("Hello")).unwrap(), json!("Hello"));
/// ```
pub trait Field: Send + Sync {
	/// The field name; also the output key and the default attribute source
	fn name(&self) -> &str;

	/// Whether a missing value is an error on the deserialize path
	fn required(&self) -> bool {
		false
	}

	/// Read-only fields are skipped on the deserialize path
	fn read_only(&self) -> bool {
		false
	}

	/// Write-only fields are omitted from representations entirely
	fn write_only(&self) -> bool {
		false
	}

	/// Fallback value used when the raw input or the attribute is missing
	fn default_value(&self) -> Option<&Value> {
		None
	}

	/// Dotted attribute path used to extract this field from a domain
	/// object; defaults to the field name
	fn source(&self) -> &str {
		self.name()
	}

	/// Convert and validate one primitive value into a native value
	fn to_internal(&self, value: &Value) -> FieldResult<Value>;

	/// Convert one native value into an output primitive
	fn to_representation(&self, value: &Value) -> FieldResult<Value>;

	/// Extract this field's value from the domain object projection.
	///
	/// The default implementation traverses the dotted [`Field::source`]
	/// path. Computed fields override this to see the whole object.
	fn extract(&self, object: &Value) -> Option<Value> {
		get_attribute(object, self.source())
	}
}

/// Traverse a dotted attribute path through nested JSON objects.
///
/// Returns `None` when any segment of the path is missing, which the
/// serialize path turns into "use the field default or skip".
///
/// # Examples
///
/// ```
/// use guimauve::field::get_attribute;
/// use serde_json::json;
///
/// let object = json!({"author": {"name": "Django"}});
/// assert_eq!(get_attribute(&object, "author.name"), Some(json!("Django")));
/// assert_eq!(get_attribute(&object, "author.missing"), None);
/// ```
pub fn get_attribute(object: &Value, source: &str) -> Option<Value> {
	let mut current = object;
	for segment in source.split('.') {
		current = current.as_object()?.get(segment)?;
	}
	Some(current.clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_get_attribute_flat() {
		let object = json!({"name": "Ada"});
		assert_eq!(get_attribute(&object, "name"), Some(json!("Ada")));
	}

	#[rstest]
	fn test_get_attribute_dotted() {
		let object = json!({"profile": {"contact": {"email": "ada@example.com"}}});
		assert_eq!(
			get_attribute(&object, "profile.contact.email"),
			Some(json!("ada@example.com"))
		);
	}

	#[rstest]
	fn test_get_attribute_missing_segment() {
		let object = json!({"profile": {"name": "Ada"}});
		assert_eq!(get_attribute(&object, "profile.email"), None);
		assert_eq!(get_attribute(&object, "settings.theme"), None);
	}

	#[rstest]
	fn test_get_attribute_through_non_object() {
		let object = json!({"name": "Ada"});
		// Cannot traverse into a string
		assert_eq!(get_attribute(&object, "name.first"), None);
	}

	#[rstest]
	fn test_field_error_into_messages() {
		assert_eq!(
			FieldError::Required.into_messages(),
			vec!["This field is required".to_string()]
		);
		assert_eq!(
			FieldError::Validation("bad".to_string()).into_messages(),
			vec!["bad".to_string()]
		);
		assert_eq!(
			FieldError::Messages(vec!["a".to_string(), "b".to_string()]).into_messages(),
			vec!["a".to_string(), "b".to_string()]
		);
	}
}
