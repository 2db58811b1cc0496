//! Class-level validators run against the fully-assembled native mapping
//!
//! Validators run after every field has individually passed and before the
//! object-level hook. A validator either passes silently or contributes
//! error messages. Two failure shapes exist and they propagate differently;
//! see [`ValidatorFailure`].

use crate::{ErrorMap, JsonMap};

/// Failure reported by a class-level validator.
///
/// `Messages` failures from several validators accumulate under the
/// non-field sentinel key. A `PerField` failure is raised immediately:
/// remaining validators do not run and messages accumulated so far are
/// discarded. That asymmetry is part of the contract; callers that need
/// merging must use `Messages`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidatorFailure {
	/// Object-wide messages, accumulated across validators
	#[error("{}", .0.join("; "))]
	Messages(Vec<String>),
	/// Errors keyed per field, raised immediately as the whole error report
	#[error("Validation failed for one or more fields")]
	PerField(ErrorMap),
}

impl ValidatorFailure {
	/// Single object-wide message
	pub fn message(message: impl Into<String>) -> Self {
		Self::Messages(vec![message.into()])
	}

	/// Single message keyed under one field
	pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
		let mut errors = ErrorMap::new();
		errors.insert(field.into(), vec![message.into()]);
		Self::PerField(errors)
	}
}

/// An independent predicate/side-effect check over the native mapping
pub trait Validator: Send + Sync {
	fn check(&self, attrs: &JsonMap) -> Result<(), ValidatorFailure>;
}

impl<F> Validator for F
where
	F: Fn(&JsonMap) -> Result<(), ValidatorFailure> + Send + Sync,
{
	fn check(&self, attrs: &JsonMap) -> Result<(), ValidatorFailure> {
		self(attrs)
	}
}

/// Validates that several fields carry equal values.
///
/// Commonly used for password confirmation. With a target field set the
/// failure is keyed to that field (and therefore raised immediately);
/// without one it accumulates as an object-wide message.
///
/// # Examples
///
/// ```
/// use guimauve::validators::{FieldsEqualValidator, Validator};
/// use serde_json::json;
///
/// let validator = FieldsEqualValidator::new(vec!["password", "confirm"]);
/// let attrs = json!({"password": "secret", "confirm": "secret"});
/// assert!(validator.check(attrs.as_object().unwrap()).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FieldsEqualValidator {
	fields: Vec<String>,
	message: String,
	target_field: Option<String>,
}

impl FieldsEqualValidator {
	/// Create a validator comparing the named fields for equality
	pub fn new(fields: Vec<impl Into<String>>) -> Self {
		Self {
			fields: fields.into_iter().map(Into::into).collect(),
			message: "Fields do not match".to_string(),
			target_field: None,
		}
	}

	/// Set a custom failure message
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}

	/// Key the failure to one field instead of the whole object
	pub fn with_target_field(mut self, field: impl Into<String>) -> Self {
		self.target_field = Some(field.into());
		self
	}
}

impl Validator for FieldsEqualValidator {
	fn check(&self, attrs: &JsonMap) -> Result<(), ValidatorFailure> {
		let values: Vec<Option<&serde_json::Value>> =
			self.fields.iter().map(|name| attrs.get(name.as_str())).collect();
		if values.windows(2).all(|pair| pair[0] == pair[1]) {
			return Ok(());
		}

		match &self.target_field {
			Some(field) => Err(ValidatorFailure::for_field(field.clone(), self.message.clone())),
			None => Err(ValidatorFailure::message(self.message.clone())),
		}
	}
}

/// Validates that a group of fields is supplied all together or not at all.
///
/// # Examples
///
/// ```
/// use guimauve::validators::{RequiredTogetherValidator, Validator};
/// use serde_json::json;
///
/// let validator = RequiredTogetherValidator::new(vec!["street", "city"]);
///
/// let both = json!({"street": "Main St", "city": "Springfield"});
/// assert!(validator.check(both.as_object().unwrap()).is_ok());
///
/// let partial = json!({"street": "Main St"});
/// assert!(validator.check(partial.as_object().unwrap()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RequiredTogetherValidator {
	fields: Vec<String>,
}

impl RequiredTogetherValidator {
	/// Create a validator over the named field group
	pub fn new(fields: Vec<impl Into<String>>) -> Self {
		Self {
			fields: fields.into_iter().map(Into::into).collect(),
		}
	}
}

impl Validator for RequiredTogetherValidator {
	fn check(&self, attrs: &JsonMap) -> Result<(), ValidatorFailure> {
		let present: Vec<&String> = self
			.fields
			.iter()
			.filter(|name| attrs.contains_key(name.as_str()))
			.collect();

		if present.is_empty() || present.len() == self.fields.len() {
			return Ok(());
		}

		let missing: Vec<&str> = self
			.fields
			.iter()
			.filter(|name| !attrs.contains_key(name.as_str()))
			.map(|name| name.as_str())
			.collect();

		Err(ValidatorFailure::message(format!(
			"Fields [{}] must be provided together; missing [{}]",
			self.fields.join(", "),
			missing.join(", ")
		)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn attrs(value: serde_json::Value) -> JsonMap {
		value.as_object().cloned().expect("test input must be an object")
	}

	#[rstest]
	fn test_fields_equal_passes() {
		let validator = FieldsEqualValidator::new(vec!["a", "b"]);
		assert!(validator.check(&attrs(json!({"a": 1, "b": 1}))).is_ok());
	}

	#[rstest]
	fn test_fields_equal_fails_with_object_message() {
		let validator = FieldsEqualValidator::new(vec!["a", "b"]).with_message("must match");
		let failure = validator.check(&attrs(json!({"a": 1, "b": 2}))).unwrap_err();
		assert_eq!(failure, ValidatorFailure::Messages(vec!["must match".to_string()]));
	}

	#[rstest]
	fn test_fields_equal_fails_per_field_with_target() {
		let validator = FieldsEqualValidator::new(vec!["password", "confirm"])
			.with_message("Passwords do not match")
			.with_target_field("confirm");

		let failure = validator
			.check(&attrs(json!({"password": "a", "confirm": "b"})))
			.unwrap_err();
		let ValidatorFailure::PerField(errors) = failure else {
			panic!("expected per-field failure");
		};
		assert!(errors.contains_key("confirm"));
	}

	#[rstest]
	fn test_required_together_all_or_none() {
		let validator = RequiredTogetherValidator::new(vec!["street", "city"]);

		assert!(validator.check(&attrs(json!({}))).is_ok());
		assert!(validator
			.check(&attrs(json!({"street": "Main", "city": "Springfield"})))
			.is_ok());
		assert!(validator.check(&attrs(json!({"city": "Springfield"}))).is_err());
	}

	#[rstest]
	fn test_closure_validator() {
		let validator = |attrs: &JsonMap| {
			let start = attrs.get("start").and_then(|v| v.as_i64());
			let end = attrs.get("end").and_then(|v| v.as_i64());
			if start > end {
				return Err(ValidatorFailure::message("start must not be after end"));
			}
			Ok(())
		};
		assert!(validator.check(&attrs(json!({"start": 1, "end": 2}))).is_ok());
		assert!(validator.check(&attrs(json!({"start": 3, "end": 2}))).is_err());
	}
}
