//! Total ordering across and within value types.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use firestore_model::model::{FieldValue, GeoPoint, ObjectValue, Timestamp};

use crate::helpers::*;

#[test]
fn test_cross_type_order() {
    let chain = [
        FieldValue::null().clone(),
        FieldValue::false_value().clone(),
        FieldValue::true_value().clone(),
        FieldValue::integer(-5),
        FieldValue::timestamp(Timestamp::new(0, 0)),
        FieldValue::string(""),
        FieldValue::blob(&[0]),
        FieldValue::geo_point(GeoPoint::new(0.0, 0.0)),
        FieldValue::array(vec![]),
        FieldValue::object(ObjectValue::new()),
    ];
    for pair in chain.windows(2) {
        assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
    }
}

#[test]
fn test_class_rank_ignores_payload() {
    // The largest number still sorts before the smallest timestamp.
    assert!(FieldValue::double(f64::INFINITY) < FieldValue::timestamp(Timestamp::new(i64::MIN, 0)));
    // The longest string still sorts before the empty blob.
    assert!(FieldValue::string("\u{10FFFF}".repeat(10)) < FieldValue::blob(&[]));
    assert!(FieldValue::true_value() < &FieldValue::integer(i64::MIN));
}

#[test]
fn test_numeric_unification() {
    assert_eq!(FieldValue::integer(3), FieldValue::double(3.0));
    assert_eq!(
        FieldValue::integer(3).cmp(&FieldValue::double(3.0)),
        Ordering::Equal
    );
    assert!(FieldValue::integer(2) < FieldValue::double(2.5));
    assert!(FieldValue::double(2.5) < FieldValue::integer(3));
    assert_eq!(FieldValue::double(-0.0), FieldValue::integer(0));
    assert_eq!(FieldValue::double(-0.0), FieldValue::double(0.0));
}

#[test]
fn test_large_integers_compare_exactly_with_doubles() {
    let two_pow_53 = 9_007_199_254_740_992_i64;
    assert!(FieldValue::double(two_pow_53 as f64) < FieldValue::integer(two_pow_53 + 1));
    assert!(FieldValue::integer(i64::MAX) < FieldValue::double(9.3e18));
    assert!(FieldValue::double(-9.3e18) < FieldValue::integer(i64::MIN));
}

#[test]
fn test_nan_placement() {
    let nan = FieldValue::nan();
    assert!(nan < &FieldValue::double(-1e300));
    assert!(nan < &FieldValue::double(f64::NEG_INFINITY));
    assert!(nan < &FieldValue::integer(i64::MIN));
    assert_eq!(nan, FieldValue::nan());
    assert_eq!(*nan, FieldValue::double(f64::NAN));
    // Still a number: above booleans.
    assert!(FieldValue::true_value() < nan);
}

#[test]
fn test_timestamp_family() {
    let early = FieldValue::timestamp(Timestamp::new(10, 5));
    let late = FieldValue::timestamp(Timestamp::new(10, 6));
    assert!(early < late);

    // Every pending server timestamp sorts after every committed timestamp.
    let pending_old = FieldValue::server_timestamp(Timestamp::new(0, 0));
    let pending_new = FieldValue::server_timestamp(Timestamp::new(20, 0));
    assert!(late < pending_old);
    assert!(FieldValue::timestamp(Timestamp::new(i64::MAX, 0)) < pending_old);
    assert!(pending_old < pending_new);
}

#[test]
fn test_server_timestamp_order_ignores_previous_value() {
    let with_previous =
        FieldValue::server_timestamp_with_previous(Timestamp::new(7, 0), Timestamp::new(1, 0));
    let without_previous = FieldValue::server_timestamp(Timestamp::new(7, 0));
    let other_previous =
        FieldValue::server_timestamp_with_previous(Timestamp::new(7, 0), Timestamp::new(99, 0));

    assert_eq!(with_previous, without_previous);
    assert_eq!(with_previous, other_previous);
}

#[test]
fn test_strings_and_blobs_compare_bytewise() {
    assert!(FieldValue::string("Z") < FieldValue::string("a"));
    assert!(FieldValue::string("a") < FieldValue::string("ab"));
    // U+FFFD (EF BF BD) sorts before U+10000 (F0 90 80 80) by bytes,
    // although its UTF-16 code unit is larger.
    assert!(FieldValue::string("\u{FFFD}") < FieldValue::string("\u{10000}"));

    assert!(FieldValue::blob(&[0x7f]) < FieldValue::blob(&[0x80]));
    assert!(FieldValue::blob(&[0x01, 0xff]) < FieldValue::blob(&[0x02]));
    assert!(FieldValue::blob(&[0x01]) < FieldValue::blob(&[0x01, 0x00]));
}

#[test]
fn test_geo_points() {
    assert!(
        FieldValue::geo_point(GeoPoint::new(-1.0, 100.0))
            < FieldValue::geo_point(GeoPoint::new(1.0, -100.0))
    );
    assert!(
        FieldValue::geo_point(GeoPoint::new(1.0, -100.0))
            < FieldValue::geo_point(GeoPoint::new(1.0, 100.0))
    );
}

#[test]
fn test_array_prefix_rule() {
    let short = FieldValue::array(vec![FieldValue::integer(1)]);
    let long = FieldValue::array(vec![FieldValue::integer(1), FieldValue::integer(2)]);
    assert!(short < long);

    // The first differing element decides, regardless of length.
    let bigger_head = FieldValue::array(vec![FieldValue::integer(2)]);
    assert!(long < bigger_head);

    // Elements use the full recursive ordering.
    assert_eq!(
        FieldValue::array(vec![FieldValue::integer(1), FieldValue::double(2.0)]),
        FieldValue::array(vec![FieldValue::double(1.0), FieldValue::integer(2)])
    );
}

#[test]
fn test_object_order_is_key_order_independent() {
    let ba = object([("b", FieldValue::integer(1)), ("a", FieldValue::integer(2))]);
    let ab = object([("a", FieldValue::integer(2)), ("b", FieldValue::integer(1))]);
    assert_eq!(ba, ab);
}

#[test]
fn test_object_comparison_walks_sorted_keys() {
    // Keys compare before values.
    assert!(object([("a", FieldValue::integer(9))]) < object([("b", FieldValue::integer(0))]));
    // Equal keys fall through to values.
    assert!(object([("a", FieldValue::integer(1))]) < object([("a", FieldValue::integer(2))]));
    // A strict prefix sorts first.
    assert!(
        object([("a", FieldValue::integer(1))])
            < object([("a", FieldValue::integer(1)), ("b", FieldValue::Null)])
    );
    // A missing earlier key is seen at the first position.
    assert!(
        object([("a", FieldValue::integer(1)), ("c", FieldValue::Null)])
            < object([("b", FieldValue::Null)])
    );
}

#[test]
fn test_derived_operators_agree() {
    let values = ascending_values();
    for a in &values {
        for b in &values {
            let ordering = a.cmp(b);
            assert_eq!(a < b, ordering == Ordering::Less);
            assert_eq!(a > b, ordering == Ordering::Greater);
            assert_eq!(a <= b, ordering != Ordering::Greater);
            assert_eq!(a >= b, ordering != Ordering::Less);
            assert_eq!(a == b, ordering == Ordering::Equal);
            assert_eq!(a != b, ordering != Ordering::Equal);
            assert_eq!(a.partial_cmp(b), Some(ordering));
        }
    }
}

#[test]
fn test_strict_total_order_over_sample() {
    let values = ascending_values();
    for (i, a) in values.iter().enumerate() {
        assert_eq!(a.cmp(a), Ordering::Equal, "{a} not equal to itself");
        for (j, b) in values.iter().enumerate() {
            // Trichotomy and antisymmetry against the listed order.
            assert_eq!(a.cmp(b), i.cmp(&j), "{a} vs {b}");
            assert_eq!(a.cmp(b), b.cmp(a).reverse());
        }
    }
}

#[test]
fn test_transitivity_with_mixed_numbers() {
    let numbers = [
        FieldValue::nan().clone(),
        FieldValue::double(f64::NEG_INFINITY),
        FieldValue::integer(-3),
        FieldValue::double(-2.5),
        FieldValue::integer(-2),
        FieldValue::double(-0.0),
        FieldValue::integer(0),
        FieldValue::double(0.0),
        FieldValue::double(1e-300),
        FieldValue::integer(1),
        FieldValue::double(9_007_199_254_740_992.0),
        FieldValue::integer(9_007_199_254_740_993),
        FieldValue::double(f64::INFINITY),
    ];
    for a in &numbers {
        for b in &numbers {
            for c in &numbers {
                if a <= b && b <= c {
                    assert!(a <= c, "{a} <= {b} <= {c} but not {a} <= {c}");
                }
            }
        }
    }
}

#[test]
fn test_sorting_shuffled_values() {
    let expected = ascending_values();
    let mut shuffled = expected.clone();
    shuffled.reverse();
    shuffled.rotate_left(7);
    shuffled.sort();
    assert_eq!(shuffled, expected);
}

#[test]
fn test_values_as_set_keys() {
    let set: BTreeSet<FieldValue> = [
        FieldValue::integer(1),
        FieldValue::double(1.0),
        FieldValue::nan().clone(),
        FieldValue::double(f64::NAN),
        FieldValue::string("1"),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.len(), 3);
    assert!(set.first().unwrap().is_nan());
    assert!(set.contains(&FieldValue::double(1.0)));
    assert!(set.contains(&FieldValue::integer(1)));
}
