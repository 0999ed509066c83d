//! The value held by a document field.
//!
//! [`FieldValue`] is a closed sum type with one variant per kind of payload a
//! document field can hold. Because the payload lives inside its enum
//! variant, the type tag and the live payload cannot disagree, and assigning
//! a value of another type drops the old payload before the new one takes its
//! place.
//!
//! Values are built through the factory functions on [`FieldValue`]. The
//! null, true, false and NaN values are process-wide `static` instances
//! returned by reference; every other factory returns a fresh value.
//!
//! ```
//! # use firestore_model::model::FieldValue;
//! let three = FieldValue::integer(3);
//! assert_eq!(three, FieldValue::double(3.0));
//! assert!(FieldValue::nan() < &FieldValue::double(f64::NEG_INFINITY));
//! assert!(FieldValue::true_value() < &three);
//! ```

use std::collections::btree_map::Entry;
use std::fmt;

use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::double_serde::non_finite_name;
use super::{
    ArrayValue, FieldValueOptions, GeoPoint, ModelError, ObjectValue, ServerTimestamp, Timestamp,
};
use crate::clock::Clock;

/// The kinds of value a field can hold.
///
/// Variants are declared in the backend's sort order, with the members of an
/// order class kept adjacent. New kinds belong next to the kinds they sort
/// with, not at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Null,
    Boolean,
    // Numbers
    Long,
    Double,
    // Timestamps
    Timestamp,
    ServerTimestamp,
    String,
    Blob,
    /// Document reference. Reserved: no [`FieldValue`] carries it yet.
    Reference,
    GeoPoint,
    Array,
    Object,
}

impl Type {
    /// Lowercase name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Long => "long",
            Type::Double => "double",
            Type::Timestamp => "timestamp",
            Type::ServerTimestamp => "server_timestamp",
            Type::String => "string",
            Type::Blob => "blob",
            Type::Reference => "reference",
            Type::GeoPoint => "geo_point",
            Type::Array => "array",
            Type::Object => "object",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable data value as stored in a document field.
///
/// Comparison follows the backend's sort order (see
/// [`ordering`](super::ordering)); equality means "neither sorts before the
/// other", so `FieldValue::integer(1) == FieldValue::double(1.0)` and NaN
/// equals NaN.
///
/// Dropping a value is iterative and handles any nesting depth. Cloning,
/// comparison, [`resolve`](FieldValue::resolve), rendering and serde recurse
/// once per nesting level; they are supported to a depth of a few thousand
/// levels on a default 2 MiB thread stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum FieldValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Double(#[serde(with = "super::double_serde")] f64),
    Timestamp(Timestamp),
    ServerTimestamp(ServerTimestamp),
    String(String),
    Blob(#[serde(with = "serde_bytes")] Vec<u8>),
    GeoPoint(GeoPoint),
    Array(ArrayValue),
    Object(ObjectValue),
}

static NULL_VALUE: FieldValue = FieldValue::Null;
static TRUE_VALUE: FieldValue = FieldValue::Boolean(true);
static FALSE_VALUE: FieldValue = FieldValue::Boolean(false);
static NAN_VALUE: FieldValue = FieldValue::Double(f64::NAN);

impl FieldValue {
    /// The shared null value
    pub fn null() -> &'static FieldValue {
        &NULL_VALUE
    }

    /// The shared `true` value
    pub fn true_value() -> &'static FieldValue {
        &TRUE_VALUE
    }

    /// The shared `false` value
    pub fn false_value() -> &'static FieldValue {
        &FALSE_VALUE
    }

    /// The shared boolean value for `value`
    pub fn boolean(value: bool) -> &'static FieldValue {
        if value { &TRUE_VALUE } else { &FALSE_VALUE }
    }

    /// The shared NaN value
    pub fn nan() -> &'static FieldValue {
        &NAN_VALUE
    }

    pub fn integer(value: i64) -> FieldValue {
        FieldValue::Integer(value)
    }

    /// Any bit pattern is accepted, including NaN and the infinities.
    pub fn double(value: f64) -> FieldValue {
        FieldValue::Double(value)
    }

    /// Components are stored unvalidated.
    pub fn timestamp(value: Timestamp) -> FieldValue {
        FieldValue::Timestamp(value)
    }

    /// A pending server timestamp with no previous value.
    pub fn server_timestamp(local_write_time: Timestamp) -> FieldValue {
        FieldValue::ServerTimestamp(ServerTimestamp::new(local_write_time, None))
    }

    /// A pending server timestamp superseding `previous_value`.
    pub fn server_timestamp_with_previous(
        local_write_time: Timestamp,
        previous_value: Timestamp,
    ) -> FieldValue {
        FieldValue::ServerTimestamp(ServerTimestamp::new(local_write_time, Some(previous_value)))
    }

    /// A pending server timestamp written now according to `clock`.
    pub fn server_timestamp_now(clock: &dyn Clock, previous_value: Option<Timestamp>) -> FieldValue {
        FieldValue::ServerTimestamp(ServerTimestamp::new(clock.now_timestamp(), previous_value))
    }

    /// Copies a `&str`, or takes ownership of a `String`.
    pub fn string(value: impl Into<String>) -> FieldValue {
        FieldValue::String(value.into())
    }

    /// Copies `bytes`; the source buffer is not retained.
    pub fn blob(bytes: &[u8]) -> FieldValue {
        FieldValue::Blob(bytes.to_vec())
    }

    pub fn geo_point(value: GeoPoint) -> FieldValue {
        FieldValue::GeoPoint(value)
    }

    /// Takes ownership of `values`; clone first to keep a copy.
    pub fn array(values: impl Into<ArrayValue>) -> FieldValue {
        FieldValue::Array(values.into())
    }

    /// Takes ownership of `entries`; clone first to keep a copy.
    pub fn object(entries: impl Into<ObjectValue>) -> FieldValue {
        FieldValue::Object(entries.into())
    }

    /// Builds an object from `(key, value)` pairs. When a key repeats, the
    /// later value replaces the earlier one.
    pub fn object_from_entries<K, I>(entries: I) -> FieldValue
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        let mut object = ObjectValue::new();
        for (key, value) in entries {
            let key = key.into();
            if object.contains_key(&key) {
                warn!(key = %key, "duplicate object key, keeping the later value");
            }
            object.insert(key, value);
        }
        FieldValue::Object(object)
    }

    /// Builds an object from `(key, value)` pairs, rejecting repeated keys.
    pub fn try_object_from_entries<K, I>(entries: I) -> Result<FieldValue, ModelError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        let mut object = ObjectValue::new();
        for (key, value) in entries {
            match object.entry(key.into()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(slot) => {
                    debug!(key = %slot.key(), "rejecting duplicate object key");
                    return Err(ModelError::DuplicateKey {
                        key: slot.key().clone(),
                    });
                }
            }
        }
        Ok(FieldValue::Object(object))
    }

    /// Returns the type tag of the live payload.
    pub fn value_type(&self) -> Type {
        match self {
            FieldValue::Null => Type::Null,
            FieldValue::Boolean(_) => Type::Boolean,
            FieldValue::Integer(_) => Type::Long,
            FieldValue::Double(_) => Type::Double,
            FieldValue::Timestamp(_) => Type::Timestamp,
            FieldValue::ServerTimestamp(_) => Type::ServerTimestamp,
            FieldValue::String(_) => Type::String,
            FieldValue::Blob(_) => Type::Blob,
            FieldValue::GeoPoint(_) => Type::GeoPoint,
            FieldValue::Array(_) => Type::Array,
            FieldValue::Object(_) => Type::Object,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Moves the payload out, leaving null behind.
    pub fn take(&mut self) -> FieldValue {
        std::mem::take(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns true for a NaN double
    pub fn is_nan(&self) -> bool {
        matches!(self, FieldValue::Double(d) if d.is_nan())
    }

    /// Returns true for integers and doubles
    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Double(_))
    }

    /// Returns true for arrays and objects
    pub fn is_container(&self) -> bool {
        matches!(self, FieldValue::Array(_) | FieldValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the payload of a double. Integers are not widened.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            FieldValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_server_timestamp(&self) -> Option<&ServerTimestamp> {
        match self {
            FieldValue::ServerTimestamp(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_geo_point(&self) -> Option<GeoPoint> {
        match self {
            FieldValue::GeoPoint(point) => Some(*point),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            FieldValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayValue> {
        match self {
            FieldValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            FieldValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectValue> {
        match self {
            FieldValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Applies reader-side `options`, replacing every pending server
    /// timestamp, including nested ones, with what the reader should see.
    pub fn resolve(&self, options: &FieldValueOptions) -> FieldValue {
        match self {
            FieldValue::ServerTimestamp(pending) => {
                pending.resolve(options.server_timestamp_behavior)
            }
            FieldValue::Array(array) => {
                FieldValue::Array(array.iter().map(|v| v.resolve(options)).collect())
            }
            FieldValue::Object(object) => FieldValue::Object(
                object
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.resolve(options)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Converts to a JSON value for display and export.
    ///
    /// Blobs become base64 strings, timestamps RFC 3339 strings, and
    /// non-finite doubles the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
    /// The conversion is lossy and not meant to be read back.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Boolean(b) => json!(b),
            FieldValue::Integer(n) => json!(n),
            FieldValue::Double(d) => match non_finite_name(*d) {
                Some(name) => json!(name),
                None => json!(d),
            },
            FieldValue::Timestamp(ts) => json!(ts.to_string()),
            FieldValue::ServerTimestamp(pending) => json!({
                "serverTimestamp": {
                    "localWriteTime": pending.local_write_time().to_string(),
                    "previousValue": pending.previous_value().map(|ts| ts.to_string()),
                }
            }),
            FieldValue::String(s) => json!(s),
            FieldValue::Blob(bytes) => json!(Base64::encode_string(bytes)),
            FieldValue::GeoPoint(point) => json!({
                "latitude": point.latitude(),
                "longitude": point.longitude(),
            }),
            FieldValue::Array(array) => {
                serde_json::Value::Array(array.iter().map(FieldValue::to_json).collect())
            }
            FieldValue::Object(object) => serde_json::Value::Object(
                object
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Converts to a compact JSON string, see [`FieldValue::to_json`].
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Double(d) => write!(f, "{d:?}"),
            FieldValue::Timestamp(ts) => write!(f, "{ts}"),
            FieldValue::ServerTimestamp(pending) => {
                write!(f, "ServerTimestamp({})", pending.local_write_time())
            }
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Blob(bytes) => write!(f, "<{}>", Base64::encode_string(bytes)),
            FieldValue::GeoPoint(point) => write!(f, "{point}"),
            FieldValue::Array(array) => {
                write!(f, "[")?;
                for (i, item) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            FieldValue::Object(object) => {
                write!(f, "{{")?;
                for (i, (key, value)) in object.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(value: Timestamp) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<ServerTimestamp> for FieldValue {
    fn from(value: ServerTimestamp) -> Self {
        FieldValue::ServerTimestamp(value)
    }
}

impl From<GeoPoint> for FieldValue {
    fn from(value: GeoPoint) -> Self {
        FieldValue::GeoPoint(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::Array(value.into())
    }
}

impl From<ArrayValue> for FieldValue {
    fn from(value: ArrayValue) -> Self {
        FieldValue::Array(value)
    }
}

impl From<std::collections::BTreeMap<String, FieldValue>> for FieldValue {
    fn from(value: std::collections::BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Object(value.into())
    }
}

impl From<ObjectValue> for FieldValue {
    fn from(value: ObjectValue) -> Self {
        FieldValue::Object(value)
    }
}

fn type_mismatch(expected: &str, value: &FieldValue) -> ModelError {
    ModelError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

impl TryFrom<&FieldValue> for bool {
    type Error = ModelError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| type_mismatch("boolean", value))
    }
}

impl TryFrom<&FieldValue> for i64 {
    type Error = ModelError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value.as_integer().ok_or_else(|| type_mismatch("long", value))
    }
}

impl TryFrom<&FieldValue> for f64 {
    type Error = ModelError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value.as_double().ok_or_else(|| type_mismatch("double", value))
    }
}

impl TryFrom<&FieldValue> for Timestamp {
    type Error = ModelError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value
            .as_timestamp()
            .ok_or_else(|| type_mismatch("timestamp", value))
    }
}

impl TryFrom<&FieldValue> for GeoPoint {
    type Error = ModelError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value
            .as_geo_point()
            .ok_or_else(|| type_mismatch("geo_point", value))
    }
}

impl TryFrom<&FieldValue> for String {
    type Error = ModelError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value
            .as_string()
            .map(str::to_string)
            .ok_or_else(|| type_mismatch("string", value))
    }
}

impl<'a> TryFrom<&'a FieldValue> for &'a str {
    type Error = ModelError;

    fn try_from(value: &'a FieldValue) -> Result<Self, Self::Error> {
        value.as_string().ok_or_else(|| type_mismatch("string", value))
    }
}

// Comparisons against primitives use the same numeric unification as the
// total order, so `FieldValue::double(2.0) == 2i64`.
impl PartialEq<i64> for FieldValue {
    fn eq(&self, other: &i64) -> bool {
        *self == FieldValue::Integer(*other)
    }
}

impl PartialEq<f64> for FieldValue {
    fn eq(&self, other: &f64) -> bool {
        *self == FieldValue::Double(*other)
    }
}

impl PartialEq<bool> for FieldValue {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<str> for FieldValue {
    fn eq(&self, other: &str) -> bool {
        self.as_string() == Some(other)
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
