//! Parallel Arrays
//!
//! All per-component state lives in these parallel arrays.
//! Each array index corresponds to one component.
//!
//! # Array Categories
//!
//! - **core**: Component type, parent slot, root element, visibility, page state
//! - **props**: Explicitly set property values
//!
//! Columns are `TrackedSlotArray`s, so reads inside a derived or effect are
//! tracked per index.

pub mod core;
pub mod props;

use spark_signals::TrackedSlotArray;

use self::core as core_arrays;
use self::props as props_arrays;

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    props_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    props_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when all components are destroyed.
pub fn reset_all_arrays() {
    core_arrays::reset();
    props_arrays::reset();
}

/// Read a slot without growing the column for unallocated indices.
fn read<T: Clone + PartialEq + 'static>(arr: &TrackedSlotArray<T>, index: usize) -> Option<T> {
    if arr.has(index) {
        arr.get(index)
    } else {
        None
    }
}

/// Reset every slot in a column to its default and forget dirty indices.
fn clear_column<T: Clone + PartialEq + 'static>(arr: &TrackedSlotArray<T>) {
    for index in 0..arr.len() {
        arr.clear(index);
    }
    arr.dirty().borrow_mut().clear();
}
