//! Computed read-only field backed by a caller-supplied function
//!
//! The Rust rendition of a "callable attribute": instead of looking up an
//! attribute by name, a `MethodField` computes its representation from the
//! whole domain object projection.

use crate::field::{Field, FieldError, FieldResult};
use serde_json::Value;

type ComputeFn = Box<dyn Fn(&Value) -> FieldResult<Value> + Send + Sync>;

/// A read-only field whose value is computed from the whole object.
///
/// Method fields never participate in the deserialize path.
///
/// # Examples
///
/// ```
/// use guimauve::field::Field;
/// use guimauve::fields::MethodField;
/// use serde_json::json;
///
/// let field = MethodField::new("full_name", |object| {
///     let first = object["first_name"].as_str().unwrap_or_default();
///     let last = object["last_name"].as_str().unwrap_or_default();
///     Ok(json!(format!("{} {}", first, last)))
/// });
///
/// let object = json!({"first_name": "Ada", "last_name": "Lovelace"});
/// let value = field.extract(&object).unwrap();
/// assert_eq!(field.to_representation(&value).unwrap(), json!("Ada Lovelace"));
/// ```
pub struct MethodField {
	pub name: String,
	compute: ComputeFn,
}

impl MethodField {
	/// Create a new MethodField computing its value with `compute`
	pub fn new<F>(name: impl Into<String>, compute: F) -> Self
	where
		F: Fn(&Value) -> FieldResult<Value> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			compute: Box::new(compute),
		}
	}
}

impl Field for MethodField {
	fn name(&self) -> &str {
		&self.name
	}

	fn read_only(&self) -> bool {
		true
	}

	fn to_internal(&self, _value: &Value) -> FieldResult<Value> {
		// Never reached through the pipeline; read-only fields are skipped
		Err(FieldError::Validation(format!(
			"Field '{}' is read-only",
			self.name
		)))
	}

	fn to_representation(&self, value: &Value) -> FieldResult<Value> {
		(self.compute)(value)
	}

	fn extract(&self, object: &Value) -> Option<Value> {
		// The computation sees the whole object, not a single attribute
		Some(object.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_method_field_computes_from_object() {
		let field = MethodField::new("display", |object| {
			Ok(json!(format!(
				"{} <{}>",
				object["name"].as_str().unwrap_or_default(),
				object["email"].as_str().unwrap_or_default()
			)))
		});

		let object = json!({"name": "Ada", "email": "ada@example.com"});
		let extracted = field.extract(&object).unwrap();
		assert_eq!(
			field.to_representation(&extracted).unwrap(),
			json!("Ada <ada@example.com>")
		);
	}

	#[rstest]
	fn test_method_field_is_read_only() {
		let field = MethodField::new("computed", |_| Ok(json!(1)));
		assert!(field.read_only());
		assert!(field.to_internal(&json!(1)).is_err());
	}

	#[rstest]
	fn test_method_field_can_fail() {
		let field = MethodField::new("ratio", |object| {
			let total = object["total"].as_f64().unwrap_or(0.0);
			if total == 0.0 {
				return Err(FieldError::Validation("total is zero".to_string()));
			}
			Ok(json!(object["part"].as_f64().unwrap_or(0.0) / total))
		});

		assert!(field.to_representation(&json!({"part": 1.0, "total": 0.0})).is_err());
	}
}
