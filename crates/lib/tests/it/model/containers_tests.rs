//! Copy, move and teardown of nested arrays and objects.

use firestore_model::model::{FieldValue, FieldValueOptions, ObjectValue};

use crate::helpers::*;

#[test]
fn test_copy_is_deep() {
    let original = FieldValue::array(vec![
        FieldValue::integer(1),
        FieldValue::array(vec![FieldValue::string("inner")]),
    ]);
    let mut copy = original.clone();

    let elements = copy.as_array_mut().unwrap();
    elements[0] = FieldValue::string("replaced");
    elements[1].as_array_mut().unwrap()[0] = FieldValue::Null;

    assert_eq!(original.as_array().unwrap()[0], FieldValue::integer(1));
    assert_eq!(
        original.as_array().unwrap()[1],
        FieldValue::array(vec![FieldValue::string("inner")])
    );
    assert_ne!(original, copy);
}

#[test]
fn test_object_copy_is_deep() {
    let original = object([("nested", object([("x", FieldValue::integer(1))]))]);
    let mut copy = original.clone();

    copy.as_object_mut()
        .and_then(|o| o.get_mut("nested"))
        .and_then(FieldValue::as_object_mut)
        .unwrap()
        .insert("y".to_string(), FieldValue::integer(2));

    assert_eq!(original, object([("nested", object([("x", FieldValue::integer(1))]))]));
    assert_eq!(
        copy.as_object().unwrap()["nested"].as_object().unwrap().len(),
        2
    );
}

#[test]
fn test_move_leaves_reusable_source() {
    let mut source = FieldValue::array(vec![FieldValue::string("payload")]);
    let destination = source.take();

    assert!(source.is_null());
    assert_eq!(destination.as_array().unwrap()[0], "payload");

    source = FieldValue::object(ObjectValue::new());
    assert!(source.as_object().unwrap().is_empty());
    assert_eq!(destination.as_array().unwrap().len(), 1);
}

#[test]
fn test_repeated_move_and_reassign() {
    let mut slots: Vec<FieldValue> = (0..8).map(|_| FieldValue::Null).collect();

    for round in 0..500 {
        let from = round % slots.len();
        let to = (round * 3 + 1) % slots.len();

        let value = match round % 3 {
            0 => FieldValue::array(vec![nested_arrays(round % 5), FieldValue::integer(round as i64)]),
            1 => object([("round", FieldValue::integer(round as i64)), ("tree", nested_objects(3))]),
            _ => FieldValue::string(format!("round {round}")),
        };
        slots[from] = value;

        let moved = slots[from].take();
        let copied = moved.clone();
        slots[to] = moved;

        assert!(slots[from].is_null() || from == to);
        assert_eq!(slots[to], copied);
    }
}

#[test]
fn test_deep_round_trip() {
    const DEPTH: usize = 1_000;

    let arrays = nested_arrays(DEPTH);
    let arrays_copy = arrays.clone();
    assert_eq!(arrays, arrays_copy);
    assert!(nested_arrays(DEPTH - 1) < arrays);
    // The recursive walks handle this depth too.
    assert_eq!(arrays.resolve(&FieldValueOptions::default()), arrays);
    assert!(arrays.to_string().starts_with("[["));
    assert!(arrays.to_json_string().starts_with("[["));
    drop(arrays);
    drop(arrays_copy);

    let objects = nested_objects(DEPTH);
    let objects_copy = objects.clone();
    assert_eq!(objects, objects_copy);
    drop(objects_copy);
    drop(objects);
}

#[test]
fn test_very_deep_teardown() {
    drop(nested_arrays(250_000));
    drop(nested_objects(250_000));

    // Reassigning over a deep value tears it down too.
    let mut slot = nested_arrays(250_000);
    assert!(slot.is_container());
    slot = FieldValue::integer(1);
    assert_eq!(slot, FieldValue::integer(1));
}

#[test]
fn test_wide_and_deep_teardown() {
    let mut value = FieldValue::Null;
    for i in 0..50_000 {
        value = FieldValue::array(vec![
            FieldValue::string(format!("sibling {i}")),
            object([("left", nested_arrays(2)), ("right", value)]),
        ]);
    }
    drop(value);
}
