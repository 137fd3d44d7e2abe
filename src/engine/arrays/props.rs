//! Property Arrays
//!
//! Explicitly set property values per component, in the order they were
//! first set. Defaults are not stored; they come from the component type's
//! property table.

use serde_json::Value;
use spark_signals::{dirty_set, tracked_slot_array, TrackedSlotArray};

use super::{clear_column, read};
use crate::types::PropertyMap;

thread_local! {
    static PROPERTIES: TrackedSlotArray<PropertyMap> = tracked_slot_array(Some(PropertyMap::new()), dirty_set());
}

pub fn ensure_capacity(index: usize) {
    PROPERTIES.with(|arr| arr.ensure_capacity(index + 1));
}

pub fn clear_at_index(index: usize) {
    PROPERTIES.with(|arr| arr.clear(index));
}

pub fn reset() {
    PROPERTIES.with(clear_column);
}

pub fn get_property(index: usize, name: &str) -> Option<Value> {
    PROPERTIES.with(|arr| read(arr, index).and_then(|m| m.get(name).cloned()))
}

pub fn set_property(index: usize, name: &str, value: Value) {
    PROPERTIES.with(|arr| {
        let mut map = arr.peek(index).unwrap_or_default();
        map.insert(name.to_string(), value);
        arr.set_value(index, map);
    });
}

/// Snapshot of every explicitly set property.
pub fn get_properties(index: usize) -> PropertyMap {
    PROPERTIES.with(|arr| read(arr, index).unwrap_or_default())
}
