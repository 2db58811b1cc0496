//! Persistence hooks turning validated data into domain objects
//!
//! The crate never implements `create`/`update` generically: merging
//! nested or related sub-objects on write is ambiguous (which related
//! record should a nested mapping attach to?) and must be supplied per
//! use case.

use crate::JsonMap;

/// User-supplied create/update operations for a domain object type.
///
/// `save()` on a serializer routes to [`PersistenceHook::update`] when the
/// serializer was constructed against an existing object and to
/// [`PersistenceHook::create`] otherwise. Both operations must return the
/// resulting object; failures are runtime errors, not panics.
///
/// # Examples
///
/// ```
/// use guimauve::persistence::{PersistenceHook, PersistenceError};
/// use guimauve::JsonMap;
///
/// #[derive(Clone, serde::Serialize)]
/// struct Note { body: String }
///
/// struct NoteStore;
///
/// impl PersistenceHook<Note> for NoteStore {
///     fn create(&self, validated: &JsonMap) -> Result<Note, PersistenceError> {
///         let body = validated
///             .get("body")
///             .and_then(|v| v.as_str())
///             .ok_or_else(|| PersistenceError::MissingField("body".to_string()))?;
///         Ok(Note { body: body.to_string() })
///     }
///
///     fn update(&self, existing: &Note, validated: &JsonMap) -> Result<Note, PersistenceError> {
///         let mut note = existing.clone();
///         if let Some(body) = validated.get("body").and_then(|v| v.as_str()) {
///             note.body = body.to_string();
///         }
///         Ok(note)
///     }
/// }
/// ```
pub trait PersistenceHook<T>: Send + Sync {
	/// Build and store a new domain object from validated data
	fn create(&self, validated: &JsonMap) -> Result<T, PersistenceError>;

	/// Apply validated data to an existing domain object
	fn update(&self, existing: &T, validated: &JsonMap) -> Result<T, PersistenceError>;
}

/// Runtime failure reported by a persistence hook
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PersistenceError {
	/// A field the hook needs was absent from the validated mapping
	#[error("Missing field '{0}' in validated data")]
	MissingField(String),
	/// A field was present but carried an unusable value
	#[error("Field '{field}' has an unexpected type (expected {expected})")]
	TypeMismatch { field: String, expected: String },
	/// The underlying store rejected the operation
	#[error("Storage error: {0}")]
	Storage(String),
}
