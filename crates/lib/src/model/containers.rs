//! Array and object payloads.
//!
//! Both containers own nested [`FieldValue`]s and can nest without bound.
//! Dropping them moves every nested container's contents onto a single work
//! stack instead of recursing, so tearing down a structure tens of thousands
//! of levels deep uses constant call-stack depth.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::FieldValue;

/// Ordered sequence of field values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrayValue(Vec<FieldValue>);

/// Field-name to value mapping, iterated in key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectValue(BTreeMap<String, FieldValue>);

impl ArrayValue {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Moves the elements out, leaving this array empty.
    pub fn into_inner(mut self) -> Vec<FieldValue> {
        std::mem::take(&mut self.0)
    }
}

impl ObjectValue {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Moves the entries out, leaving this object empty.
    pub fn into_inner(mut self) -> BTreeMap<String, FieldValue> {
        std::mem::take(&mut self.0)
    }
}

impl Deref for ArrayValue {
    type Target = Vec<FieldValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ArrayValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Deref for ObjectValue {
    type Target = BTreeMap<String, FieldValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ObjectValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<FieldValue>> for ArrayValue {
    fn from(values: Vec<FieldValue>) -> Self {
        Self(values)
    }
}

impl FromIterator<FieldValue> for ArrayValue {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, FieldValue>> for ObjectValue {
    fn from(entries: BTreeMap<String, FieldValue>) -> Self {
        Self(entries)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Drop for ArrayValue {
    fn drop(&mut self) {
        if self.0.iter().any(FieldValue::is_container) {
            dismantle(std::mem::take(&mut self.0));
        }
    }
}

impl Drop for ObjectValue {
    fn drop(&mut self) {
        if self.0.values().any(FieldValue::is_container) {
            dismantle(std::mem::take(&mut self.0).into_values().collect());
        }
    }
}

/// Drops `pending` and everything beneath it without recursion.
///
/// Each popped container is emptied onto the stack before it goes out of
/// scope, so its own `Drop` sees no nested containers and returns at once.
fn dismantle(mut pending: Vec<FieldValue>) {
    trace!(roots = pending.len(), "dismantling nested containers");
    while let Some(mut value) = pending.pop() {
        match &mut value {
            FieldValue::Array(array) => pending.append(&mut array.0),
            FieldValue::Object(object) => pending.extend(std::mem::take(&mut object.0).into_values()),
            _ => {}
        }
    }
}
