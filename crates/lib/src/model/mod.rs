//! Document field values.
//!
//! This module models every value a document field can hold and the order in
//! which the backend sorts them.
//!
//! # Core Types
//!
//! - [`FieldValue`] - The value of a single field, one variant per kind of payload
//! - [`Type`] - The closed set of value kinds, in sort-group order
//! - [`ArrayValue`] / [`ObjectValue`] - Nested containers with iterative teardown
//! - [`Timestamp`], [`ServerTimestamp`], [`GeoPoint`] - Scalar payloads
//! - [`FieldValueOptions`] - How pending server timestamps are shown to readers
//!
//! Ordering lives in [`ordering`]; `FieldValue` implements `Ord` on top of it.

pub mod containers;
mod double_serde;
pub mod errors;
pub mod field_value;
pub mod geo_point;
pub mod ordering;
pub mod server_timestamp;
pub mod timestamp;

pub use containers::{ArrayValue, ObjectValue};
pub use errors::ModelError;
pub use field_value::{FieldValue, Type};
pub use geo_point::GeoPoint;
pub use server_timestamp::{FieldValueOptions, ServerTimestamp, ServerTimestampBehavior};
pub use timestamp::Timestamp;
