//! Error types for value-model operations.
//!
//! Construction and comparison of [`FieldValue`](super::FieldValue)s never fail.
//! These errors cover the collaborator-facing edges of the model: typed
//! extraction of a payload, and the validated constructors used by callers
//! that must reject malformed input before it becomes a value.

use thiserror::Error;

/// Structured error types for value-model operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A typed extraction was attempted against a value of another type
    #[error("Field value type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Timestamp components outside the supported range
    #[error("Invalid timestamp: seconds={seconds}, nanos={nanos}")]
    InvalidTimestamp { seconds: i64, nanos: i32 },

    /// Geographic coordinates that are not finite or out of range
    #[error("Invalid geo point: latitude={latitude}, longitude={longitude}")]
    InvalidGeoPoint { latitude: f64, longitude: f64 },

    /// The same field name was supplied twice when building an object
    #[error("Duplicate object key: {key}")]
    DuplicateKey { key: String },
}

impl ModelError {
    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, ModelError::TypeMismatch { .. })
    }

    /// Check if this error was raised by input validation
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ModelError::InvalidTimestamp { .. }
                | ModelError::InvalidGeoPoint { .. }
                | ModelError::DuplicateKey { .. }
        )
    }

    /// Get the offending key if this is a duplicate-key error
    pub fn key(&self) -> Option<&str> {
        match self {
            ModelError::DuplicateKey { key } => Some(key),
            _ => None,
        }
    }
}

impl From<ModelError> for crate::Error {
    fn from(err: ModelError) -> Self {
        crate::Error::Model(err)
    }
}
