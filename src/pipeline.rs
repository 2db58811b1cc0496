//! Shared field-iteration engine for the deserialize and serialize paths.
//!
//! Both [`crate::serializer::Serializer`] and the composite fields in
//! [`crate::fields::nested_field`] run their child fields through these
//! functions so the two levels cannot drift apart semantically.

use crate::field::{Field, FieldError};
use crate::{ErrorMap, JsonMap};
use serde_json::Value;
use std::collections::HashMap;

/// Same-named custom validation function for a single field.
///
/// Receives the field's native value after `to_internal` and may replace
/// it or fail with a field error.
pub type FieldValidatorFn = Box<dyn Fn(Value) -> Result<Value, FieldError> + Send + Sync>;

fn record(errors: &mut ErrorMap, field_name: &str, error: FieldError) {
	match error {
		FieldError::Nested(child) => {
			// Child errors surface under dotted keys, e.g. "author.name"
			for (key, messages) in child {
				errors
					.entry(format!("{}.{}", field_name, key))
					.or_default()
					.extend(messages);
			}
		}
		other => {
			errors
				.entry(field_name.to_string())
				.or_default()
				.extend(other.into_messages());
		}
	}
}

/// Run the deserialize path over an ordered field list.
///
/// Every writable field is evaluated even when earlier fields have already
/// failed, so a single invalid input surfaces all problems at once. A
/// missing key falls back to the field default, is an error for required
/// fields, and is skipped otherwise.
pub(crate) fn fields_to_internal(
	fields: &[Box<dyn Field>],
	raw: &JsonMap,
	field_validators: &HashMap<String, FieldValidatorFn>,
) -> Result<JsonMap, ErrorMap> {
	let mut native = JsonMap::new();
	let mut errors = ErrorMap::new();

	for field in fields {
		if field.read_only() {
			continue;
		}

		let primitive = match raw.get(field.name()) {
			Some(value) => value.clone(),
			None => match field.default_value() {
				Some(default) => default.clone(),
				None => {
					if field.required() {
						record(&mut errors, field.name(), FieldError::Required);
					}
					continue;
				}
			},
		};

		let value = match field.to_internal(&primitive) {
			Ok(value) => value,
			Err(error) => {
				record(&mut errors, field.name(), error);
				continue;
			}
		};

		let value = match field_validators.get(field.name()) {
			Some(validate) => match validate(value) {
				Ok(value) => value,
				Err(error) => {
					record(&mut errors, field.name(), error);
					continue;
				}
			},
			None => value,
		};

		native.insert(field.name().to_string(), value);
	}

	if errors.is_empty() { Ok(native) } else { Err(errors) }
}

/// Run the serialize path over an ordered field list.
///
/// Output keys appear in field-declaration order. A field whose attribute
/// is absent and which carries no default is omitted from the output
/// entirely rather than producing a null entry.
pub(crate) fn fields_to_representation(
	fields: &[Box<dyn Field>],
	object: &Value,
) -> Result<JsonMap, ErrorMap> {
	let mut output = JsonMap::new();
	let mut errors = ErrorMap::new();

	for field in fields {
		if field.write_only() {
			continue;
		}

		let attribute = match field.extract(object) {
			Some(value) => value,
			None => match field.default_value() {
				Some(default) => default.clone(),
				None => continue,
			},
		};

		match field.to_representation(&attribute) {
			Ok(value) => {
				output.insert(field.name().to_string(), value);
			}
			Err(error) => record(&mut errors, field.name(), error),
		}
	}

	if errors.is_empty() { Ok(output) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{CharField, IntegerField};
	use rstest::rstest;
	use serde_json::json;

	fn raw(value: serde_json::Value) -> JsonMap {
		value.as_object().cloned().expect("test input must be an object")
	}

	#[rstest]
	fn test_all_fields_evaluated_despite_failure() {
		let fields: Vec<Box<dyn Field>> = vec![
			Box::new(CharField::new("title").required().with_max_length(3)),
			Box::new(IntegerField::new("count").required().with_min_value(0)),
		];

		let input = raw(json!({"title": "too long", "count": -1}));
		let errors = fields_to_internal(&fields, &input, &HashMap::new()).unwrap_err();

		assert!(errors.contains_key("title"));
		assert!(errors.contains_key("count"));
	}

	#[rstest]
	fn test_missing_key_uses_default() {
		let fields: Vec<Box<dyn Field>> = vec![
			Box::new(IntegerField::new("count").with_default(json!(0))),
		];

		let native = fields_to_internal(&fields, &JsonMap::new(), &HashMap::new()).unwrap();
		assert_eq!(native.get("count"), Some(&json!(0)));
	}

	#[rstest]
	fn test_missing_optional_key_skipped() {
		let fields: Vec<Box<dyn Field>> = vec![Box::new(CharField::new("bio"))];

		let native = fields_to_internal(&fields, &JsonMap::new(), &HashMap::new()).unwrap();
		assert!(!native.contains_key("bio"));
	}

	#[rstest]
	fn test_read_only_field_skipped_on_input() {
		let fields: Vec<Box<dyn Field>> = vec![Box::new(IntegerField::new("id").read_only())];

		let input = raw(json!({"id": 99}));
		let native = fields_to_internal(&fields, &input, &HashMap::new()).unwrap();
		assert!(!native.contains_key("id"));
	}

	#[rstest]
	fn test_field_validator_replaces_value() {
		let fields: Vec<Box<dyn Field>> = vec![Box::new(CharField::new("slug"))];
		let mut validators: HashMap<String, FieldValidatorFn> = HashMap::new();
		validators.insert(
			"slug".to_string(),
			Box::new(|value| {
				let s = value.as_str().unwrap_or_default().to_lowercase();
				Ok(json!(s))
			}),
		);

		let input = raw(json!({"slug": "Hello-World"}));
		let native = fields_to_internal(&fields, &input, &validators).unwrap();
		assert_eq!(native.get("slug"), Some(&json!("hello-world")));
	}

	#[rstest]
	fn test_representation_skips_absent_attribute() {
		let fields: Vec<Box<dyn Field>> = vec![
			Box::new(CharField::new("title")),
			Box::new(CharField::new("subtitle")),
		];

		let object = json!({"title": "Django"});
		let output = fields_to_representation(&fields, &object).unwrap();
		assert_eq!(output.get("title"), Some(&json!("Django")));
		assert!(!output.contains_key("subtitle"));
	}

	#[rstest]
	fn test_representation_skips_write_only() {
		let fields: Vec<Box<dyn Field>> = vec![
			Box::new(CharField::new("username")),
			Box::new(CharField::new("password").write_only()),
		];

		let object = json!({"username": "ada", "password": "hunter2"});
		let output = fields_to_representation(&fields, &object).unwrap();
		assert!(output.contains_key("username"));
		assert!(!output.contains_key("password"));
	}

	#[rstest]
	fn test_representation_declaration_order() {
		let fields: Vec<Box<dyn Field>> = vec![
			Box::new(CharField::new("zeta")),
			Box::new(CharField::new("alpha")),
			Box::new(CharField::new("mid")),
		];

		let object = json!({"alpha": "a", "mid": "m", "zeta": "z"});
		let output = fields_to_representation(&fields, &object).unwrap();
		let keys: Vec<&String> = output.keys().collect();
		assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
	}
}
