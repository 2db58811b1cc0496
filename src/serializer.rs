//! Composite mapper: an ordered collection of named fields with a
//! validation state machine and persistence dispatch
//!
//! A [`Serializer`] instance is used for exactly one operation. It is
//! constructed with an existing domain object (serialization intent),
//! bound raw input (deserialization intent), or both (update intent);
//! it produces validated data only after an explicit validation step and
//! a domain object only after an explicit save step. Each derived product
//! is computed at most once and cached for the instance's lifetime.

use crate::field::{Field, FieldError};
use crate::persistence::{PersistenceError, PersistenceHook};
use crate::pipeline::{self, FieldValidatorFn};
use crate::validators::{Validator, ValidatorFailure};
use crate::{ErrorMap, JsonMap};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Sentinel key for whole-object (non-field-specific) errors.
///
/// In Django this is `"__all__"`; a single underscore follows Rust
/// conventions for internal identifiers.
pub const NON_FIELD_ERRORS: &str = "_all";

/// Validation lifecycle of one serializer instance.
///
/// `Valid` and `Invalid` are terminal: once resolved, an instance never
/// re-validates. Construct a fresh serializer to validate new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
	Unvalidated,
	Validating,
	Valid,
	Invalid,
}

/// Runtime error raised while building a representation
#[derive(Debug, Clone, thiserror::Error)]
pub enum SerializerError {
	/// The domain object could not be projected to JSON
	#[error("Failed to project instance for serialization: {0}")]
	Projection(String),
	/// One or more fields failed converting to their output primitive
	#[error("Representation failed for one or more fields")]
	Representation(ErrorMap),
}

/// Error returned by the object-level validation hook
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjectValidationError {
	/// Reject the object with an error keyed to one field
	#[error("Field error in {field}: {message}")]
	Field { field: String, message: String },
	/// Reject the whole object; keyed under [`NON_FIELD_ERRORS`]
	#[error("Validation error: {0}")]
	Object(String),
}

type ObjectValidatorFn = Box<dyn Fn(JsonMap) -> Result<JsonMap, ObjectValidationError> + Send + Sync>;

/// Two-directional mapper between a domain object `T` and a flat JSON
/// mapping, with per-field validation, object-level validation, and
/// create/update persistence dispatch.
///
/// # Examples
///
/// ```
/// use guimauve::Serializer;
/// use guimauve::fields::{CharField, IntegerField};
/// use serde_json::json;
///
/// let mut serializer = Serializer::<serde_json::Value>::new()
///     .with_field(CharField::new("title").required().with_max_length(100))
///     .with_field(IntegerField::new("rating").with_min_value(1).with_max_value(5))
///     .bind(json!({"title": "Minor Swing", "rating": 5}).as_object().cloned().unwrap());
///
/// assert!(serializer.is_valid());
/// assert_eq!(serializer.validated_data()["title"], json!("Minor Swing"));
/// ```
pub struct Serializer<T> {
	fields: Vec<Box<dyn Field>>,
	instance: Option<T>,
	initial_data: Option<JsonMap>,
	state: ValidationState,
	validated: Option<JsonMap>,
	errors: ErrorMap,
	representation: Option<JsonMap>,
	saved: Option<T>,
	field_validators: HashMap<String, FieldValidatorFn>,
	validators: Vec<Box<dyn Validator>>,
	object_validator: Option<ObjectValidatorFn>,
	persistence: Option<Box<dyn PersistenceHook<T>>>,
}

impl<T> Serializer<T> {
	/// Create an empty serializer with no fields and no bound data
	pub fn new() -> Self {
		Self {
			fields: Vec::new(),
			instance: None,
			initial_data: None,
			state: ValidationState::Unvalidated,
			validated: None,
			errors: ErrorMap::new(),
			representation: None,
			saved: None,
			field_validators: HashMap::new(),
			validators: Vec::new(),
			object_validator: None,
			persistence: None,
		}
	}

	/// Append a field; names must be unique and declaration order is the
	/// output order
	///
	/// # Panics
	///
	/// Panics if a field with the same name was already declared.
	pub fn with_field(mut self, field: impl Field + 'static) -> Self {
		if self.fields.iter().any(|f| f.name() == field.name()) {
			panic!("Field '{}' already declared", field.name());
		}
		self.fields.push(Box::new(field));
		self
	}

	/// Attach an existing domain object; `save()` will route to `update`
	pub fn with_instance(mut self, instance: T) -> Self {
		self.instance = Some(instance);
		self
	}

	/// Bind raw input for the deserialize path
	pub fn bind(mut self, data: JsonMap) -> Self {
		self.initial_data = Some(data);
		self
	}

	/// Register a same-named custom validation function for one field.
	///
	/// Runs after the field's own `to_internal` and may replace the native
	/// value or fail with a field error.
	pub fn with_field_validator<F>(mut self, field_name: impl Into<String>, validate: F) -> Self
	where
		F: Fn(Value) -> Result<Value, FieldError> + Send + Sync + 'static,
	{
		self.field_validators.insert(field_name.into(), Box::new(validate));
		self
	}

	/// Register a class-level validator; validators run in registration
	/// order after all fields individually pass
	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.validators.push(Box::new(validator));
		self
	}

	/// Register the object-level validation hook.
	///
	/// Receives the entire validated mapping after class-level validators
	/// pass; it may replace the mapping or reject the whole object.
	/// Default behavior without a hook: pass-through.
	pub fn with_object_validator<F>(mut self, validate: F) -> Self
	where
		F: Fn(JsonMap) -> Result<JsonMap, ObjectValidationError> + Send + Sync + 'static,
	{
		self.object_validator = Some(Box::new(validate));
		self
	}

	/// Install the create/update persistence hook used by `save()`
	pub fn with_persistence(mut self, hook: impl PersistenceHook<T> + 'static) -> Self {
		self.persistence = Some(Box::new(hook));
		self
	}

	/// Current lifecycle state
	pub fn state(&self) -> ValidationState {
		self.state
	}

	/// The declared fields, in order
	pub fn fields(&self) -> &[Box<dyn Field>] {
		&self.fields
	}

	/// The attached domain object, if any
	pub fn instance(&self) -> Option<&T> {
		self.instance.as_ref()
	}

	/// Error collection; empty iff validation has not failed
	pub fn errors(&self) -> &ErrorMap {
		&self.errors
	}

	/// Run validation over the bound input, exactly once.
	///
	/// The first call walks every writable field (collecting all per-field
	/// errors before failing), then class-level validators, then the
	/// object-level hook. Repeated calls return the cached outcome without
	/// re-running anything.
	///
	/// # Panics
	///
	/// Panics when no input data was bound; validating without input is a
	/// defect in the calling code, not a reportable data error.
	pub fn is_valid(&mut self) -> bool {
		match self.state {
			ValidationState::Valid => return true,
			ValidationState::Invalid => return false,
			ValidationState::Validating => {
				panic!("is_valid() re-entered while validation is in progress")
			}
			ValidationState::Unvalidated => {}
		}

		if self.initial_data.is_none() {
			panic!("is_valid() called with no bound input data; call bind() first");
		}

		self.state = ValidationState::Validating;
		tracing::debug!(fields = self.fields.len(), "running field validation");

		let outcome = {
			let raw = self.initial_data.as_ref().expect("input data is bound");
			pipeline::fields_to_internal(&self.fields, raw, &self.field_validators)
		};

		let mut native = match outcome {
			Ok(native) => native,
			Err(errors) => {
				tracing::debug!(error_count = errors.len(), "field validation failed");
				self.errors = errors;
				self.state = ValidationState::Invalid;
				return false;
			}
		};

		// Class-level validators: message failures accumulate; a field-keyed
		// failure is raised as-is and replaces anything accumulated so far.
		let mut messages = Vec::new();
		for validator in &self.validators {
			match validator.check(&native) {
				Ok(()) => {}
				Err(ValidatorFailure::Messages(more)) => messages.extend(more),
				Err(ValidatorFailure::PerField(errors)) => {
					tracing::debug!("class-level validator raised per-field errors");
					self.errors = errors;
					self.state = ValidationState::Invalid;
					return false;
				}
			}
		}
		if !messages.is_empty() {
			self.errors.insert(NON_FIELD_ERRORS.to_string(), messages);
			self.state = ValidationState::Invalid;
			return false;
		}

		if let Some(validate) = &self.object_validator {
			match validate(native) {
				Ok(replaced) => native = replaced,
				Err(ObjectValidationError::Field { field, message }) => {
					self.errors.entry(field).or_default().push(message);
					self.state = ValidationState::Invalid;
					return false;
				}
				Err(ObjectValidationError::Object(message)) => {
					self.errors.entry(NON_FIELD_ERRORS.to_string()).or_default().push(message);
					self.state = ValidationState::Invalid;
					return false;
				}
			}
		}

		tracing::debug!("validation resolved valid");
		self.validated = Some(native);
		self.state = ValidationState::Valid;
		true
	}

	/// The validated mapping, available only after validation resolved valid.
	///
	/// # Panics
	///
	/// Panics when called before `is_valid()` or after validation failed;
	/// both are programmer errors.
	pub fn validated_data(&self) -> &JsonMap {
		match self.state {
			ValidationState::Valid => self.validated.as_ref().expect("state is Valid"),
			ValidationState::Invalid => panic!(
				"validated_data() accessed on a serializer that failed validation; inspect errors()"
			),
			_ => panic!("validated_data() accessed before is_valid() was called"),
		}
	}

	/// Persist with no extra data; see [`Serializer::save_with`]
	pub fn save(&mut self) -> Result<&T, PersistenceError> {
		self.save_with(JsonMap::new())
	}

	/// Turn validated data into a domain object through the persistence hook.
	///
	/// `extra` is merged into (and may override) the validated mapping
	/// before the hook runs. Routes to `update` when an instance was
	/// attached at construction, `create` otherwise. The save product is
	/// computed at most once: repeated calls return the first result and
	/// ignore `extra`.
	///
	/// # Panics
	///
	/// Panics when validation has not resolved valid or when no
	/// persistence hook is installed.
	pub fn save_with(&mut self, extra: JsonMap) -> Result<&T, PersistenceError> {
		if self.saved.is_some() {
			return Ok(self.saved.as_ref().expect("save product is cached"));
		}

		match self.state {
			ValidationState::Valid => {}
			ValidationState::Invalid => {
				panic!("save() called on a serializer that failed validation")
			}
			_ => panic!("save() called before is_valid()"),
		}

		let hook = match &self.persistence {
			Some(hook) => hook,
			None => panic!("save() called without a persistence hook; use with_persistence()"),
		};

		let mut merged = self.validated.clone().expect("state is Valid");
		for (key, value) in extra {
			merged.insert(key, value);
		}

		let object = match &self.instance {
			Some(existing) => {
				tracing::debug!(route = "update", "dispatching save");
				hook.update(existing, &merged)?
			}
			None => {
				tracing::debug!(route = "create", "dispatching save");
				hook.create(&merged)?
			}
		};

		Ok(self.saved.insert(object))
	}
}

impl<T: Serialize> Serializer<T> {
	/// Build the output mapping for the serialize path, cached after the
	/// first computation.
	///
	/// The source object is, in order of precedence: the saved object, the
	/// attached instance, the validated mapping. Output keys appear in
	/// field-declaration order; write-only and absent fields are omitted.
	///
	/// # Panics
	///
	/// Panics when input data was bound but validation has not resolved,
	/// or resolved invalid; rendering unvalidated input is a programmer
	/// error.
	pub fn data(&mut self) -> Result<&JsonMap, SerializerError> {
		if self.initial_data.is_some() {
			match self.state {
				ValidationState::Valid => {}
				ValidationState::Invalid => panic!(
					"data() accessed on a serializer whose input failed validation; inspect errors()"
				),
				_ => panic!("data() accessed before is_valid() resolved the bound input"),
			}
		}

		if self.representation.is_some() {
			return Ok(self.representation.as_ref().expect("representation is cached"));
		}

		let object = if let Some(saved) = &self.saved {
			serde_json::to_value(saved).map_err(|e| SerializerError::Projection(e.to_string()))?
		} else if let Some(instance) = &self.instance {
			serde_json::to_value(instance).map_err(|e| SerializerError::Projection(e.to_string()))?
		} else if let Some(validated) = &self.validated {
			Value::Object(validated.clone())
		} else {
			panic!("data() requires an instance, a saved object, or validated input");
		};

		let output = pipeline::fields_to_representation(&self.fields, &object)
			.map_err(SerializerError::Representation)?;
		Ok(self.representation.insert(output))
	}
}

impl<T> Default for Serializer<T> {
	fn default() -> Self {
		Self::new()
	}
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

	fn post_serializer() -> Serializer<Value> {
		Serializer::new()
			.with_field(CharField::new("title").required().with_max_length(50))
			.with_field(IntegerField::new("rating").with_min_value(1).with_max_value(5))
	}

	#[rstest]
	fn test_valid_input_resolves_valid() {
		let mut serializer = post_serializer().bind(raw(json!({"title": "Ok", "rating": 4})));

		assert_eq!(serializer.state(), ValidationState::Unvalidated);
		assert!(serializer.is_valid());
		assert_eq!(serializer.state(), ValidationState::Valid);
		assert_eq!(serializer.validated_data()["rating"], json!(4));
	}

	#[rstest]
	fn test_invalid_input_resolves_invalid() {
		let mut serializer = post_serializer().bind(raw(json!({"rating": 9})));

		assert!(!serializer.is_valid());
		assert_eq!(serializer.state(), ValidationState::Invalid);
		assert!(serializer.errors().contains_key("title"));
		assert!(serializer.errors().contains_key("rating"));
	}

	#[rstest]
	fn test_is_valid_outcome_is_cached() {
		let mut serializer = post_serializer().bind(raw(json!({"title": "Ok"})));

		assert!(serializer.is_valid());
		assert!(serializer.is_valid());
		assert_eq!(serializer.state(), ValidationState::Valid);
	}

	#[rstest]
	#[should_panic(expected = "no bound input data")]
	fn test_is_valid_without_bound_data_panics() {
		let mut serializer = post_serializer();
		serializer.is_valid();
	}

	#[rstest]
	#[should_panic(expected = "before is_valid()")]
	fn test_validated_data_before_validation_panics() {
		let serializer = post_serializer().bind(raw(json!({"title": "Ok"})));
		serializer.validated_data();
	}

	#[rstest]
	#[should_panic(expected = "failed validation")]
	fn test_validated_data_after_failure_panics() {
		let mut serializer = post_serializer().bind(raw(json!({})));
		assert!(!serializer.is_valid());
		serializer.validated_data();
	}

	#[rstest]
	#[should_panic(expected = "Field 'title' already declared")]
	fn test_duplicate_field_name_panics() {
		let _ = Serializer::<Value>::new()
			.with_field(CharField::new("title"))
			.with_field(CharField::new("title"));
	}

	#[rstest]
	fn test_data_from_instance_without_binding() {
		let mut serializer = post_serializer().with_instance(json!({"title": "Nuages", "rating": 5}));

		let data = serializer.data().unwrap();
		assert_eq!(data.get("title"), Some(&json!("Nuages")));
	}

	#[rstest]
	fn test_object_validator_replaces_mapping() {
		let mut serializer = post_serializer()
			.with_object_validator(|mut attrs| {
				attrs.insert("rating".to_string(), json!(1));
				Ok(attrs)
			})
			.bind(raw(json!({"title": "Ok", "rating": 5})));

		assert!(serializer.is_valid());
		assert_eq!(serializer.validated_data()["rating"], json!(1));
	}

	#[rstest]
	fn test_object_validator_rejects_whole_object() {
		let mut serializer = post_serializer()
			.with_object_validator(|_| {
				Err(ObjectValidationError::Object("rejected".to_string()))
			})
			.bind(raw(json!({"title": "Ok"})));

		assert!(!serializer.is_valid());
		assert_eq!(serializer.errors()[NON_FIELD_ERRORS], vec!["rejected".to_string()]);
	}
}
