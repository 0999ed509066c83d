//!
//! Firestore Model: the in-memory value representation of a document
//! database client.
//!
//! ## Core Concepts
//!
//! * **Field values (`model::FieldValue`)**: Every value a document field can hold, from null through
//!   nested arrays and objects, as one closed sum type.
//! * **Types (`model::Type`)**: The closed set of value kinds that collaborators switch over.
//! * **Ordering (`model::ordering`)**: The backend's total sort order across and within types, with
//!   integers and doubles unified and NaN below every number.
//! * **Canonical instances**: Null, true, false and NaN are shared `static` values.
//! * **Server timestamps (`model::ServerTimestamp`)**: Pending server-assigned times, resolved for
//!   readers according to `model::FieldValueOptions`.
//! * **Clocks (`Clock`)**: Time sources for stamping local write times.

pub mod clock;
pub mod model;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::{ClockHold, FixedClock};
pub use model::{FieldValue, Type};

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raised when callers encode or decode values with serde_json. The
    /// library itself never produces it; it exists so `?` converts.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured value-model errors from the model module
    #[error(transparent)]
    Model(model::ModelError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Model(_) => "model",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is a typed-extraction mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Model(model_err) => model_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is validation-related.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Model(model_err) => model_err.is_validation_error(),
            _ => false,
        }
    }
}
