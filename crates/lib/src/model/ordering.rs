//! Total ordering over field values.
//!
//! Values first compare by order class, which groups types the way the
//! backend sorts them:
//!
//! null < booleans < numbers < timestamps < strings < blobs < references
//! < geo points < arrays < objects
//!
//! Integers and doubles share the number class and compare by numeric value
//! without a lossy cast. NaN sorts below every other number and equals
//! itself. Committed and pending timestamps share a class, with every pending
//! server timestamp after every committed one.
//!
//! Every comparison operator on [`FieldValue`] derives from [`compare`].

use std::cmp::Ordering;

use super::{FieldValue, ObjectValue, Type};

/// Rank of a type's order class. Types in the same class share a rank.
pub fn type_order(value_type: Type) -> u8 {
    match value_type {
        Type::Null => 0,
        Type::Boolean => 1,
        Type::Long | Type::Double => 2,
        Type::Timestamp | Type::ServerTimestamp => 3,
        Type::String => 4,
        Type::Blob => 5,
        Type::Reference => 6,
        Type::GeoPoint => 7,
        Type::Array => 8,
        Type::Object => 9,
    }
}

/// Compares two field values under the backend's sort order.
pub fn compare(lhs: &FieldValue, rhs: &FieldValue) -> Ordering {
    let lhs_class = type_order(lhs.value_type());
    let rhs_class = type_order(rhs.value_type());
    if lhs_class != rhs_class {
        return lhs_class.cmp(&rhs_class);
    }

    match (lhs, rhs) {
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),

        (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
        (FieldValue::Double(a), FieldValue::Double(b)) => compare_doubles(*a, *b),
        (FieldValue::Double(a), FieldValue::Integer(b)) => compare_mixed_number(*a, *b),
        (FieldValue::Integer(a), FieldValue::Double(b)) => compare_mixed_number(*b, *a).reverse(),

        (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
        (FieldValue::Timestamp(_), FieldValue::ServerTimestamp(_)) => Ordering::Less,
        (FieldValue::ServerTimestamp(_), FieldValue::Timestamp(_)) => Ordering::Greater,
        (FieldValue::ServerTimestamp(a), FieldValue::ServerTimestamp(b)) => {
            a.local_write_time().cmp(&b.local_write_time())
        }

        // String and Vec<u8> both compare as unsigned byte sequences.
        (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
        (FieldValue::Blob(a), FieldValue::Blob(b)) => a.cmp(b),
        (FieldValue::GeoPoint(a), FieldValue::GeoPoint(b)) => a.cmp(b),

        (FieldValue::Array(a), FieldValue::Array(b)) => compare_sequences(a, b),
        (FieldValue::Object(a), FieldValue::Object(b)) => compare_objects(a, b),

        // Same order class implies one of the pairs above.
        _ => unreachable!(
            "order class {lhs_class} shared by {} and {}",
            lhs.type_name(),
            rhs.type_name()
        ),
    }
}

/// Compares doubles with NaN below every other value and equal to itself.
///
/// `-0.0` and `0.0` compare equal.
pub fn compare_doubles(lhs: f64, rhs: f64) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
    }
}

/// Compares a double against an integer exactly.
pub fn compare_mixed_number(double: f64, integer: i64) -> Ordering {
    // -2^63 and 2^63 are exact doubles; anything outside [-2^63, 2^63)
    // cannot be converted to i64.
    const I64_MIN_AS_F64: f64 = -9_223_372_036_854_775_808.0;
    const I64_END_AS_F64: f64 = 9_223_372_036_854_775_808.0;

    if double.is_nan() || double < I64_MIN_AS_F64 {
        return Ordering::Less;
    }
    if double >= I64_END_AS_F64 {
        return Ordering::Greater;
    }

    let truncated = double as i64;
    truncated
        .cmp(&integer)
        .then_with(|| compare_doubles(double, truncated as f64))
}

fn compare_sequences(lhs: &[FieldValue], rhs: &[FieldValue]) -> Ordering {
    for (a, b) in lhs.iter().zip(rhs) {
        match compare(a, b) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    lhs.len().cmp(&rhs.len())
}

fn compare_objects(lhs: &ObjectValue, rhs: &ObjectValue) -> Ordering {
    for ((lhs_key, lhs_value), (rhs_key, rhs_value)) in lhs.iter().zip(rhs.iter()) {
        let ordering = lhs_key
            .as_bytes()
            .cmp(rhs_key.as_bytes())
            .then_with(|| compare(lhs_value, rhs_value));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    lhs.len().cmp(&rhs.len())
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}
