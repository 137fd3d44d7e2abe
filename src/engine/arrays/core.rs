//! Core Arrays
//!
//! The most fundamental component arrays:
//! - componentType: What kind of component (label, flow panel, etc.)
//! - parentIndex: Container currently holding the component
//! - rootElement: Element the component controls
//! - visible: `visible` property mirror
//! - onPage: Component is part of the mounted page
//! - topLevel: Component is a form and may not be placed in a container

use spark_signals::{dirty_set, tracked_slot_array, TrackedSlotArray};

use super::{clear_column, read};
use crate::engine::ElementId;
use crate::types::ComponentType;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    static COMPONENT_TYPE: TrackedSlotArray<ComponentType> =
        tracked_slot_array(Some(ComponentType::None), dirty_set());

    /// Parent component index (None when unattached).
    static PARENT_INDEX: TrackedSlotArray<Option<usize>> = tracked_slot_array(Some(None), dirty_set());

    static ROOT_ELEMENT: TrackedSlotArray<Option<ElementId>> = tracked_slot_array(Some(None), dirty_set());

    static VISIBLE: TrackedSlotArray<bool> = tracked_slot_array(Some(true), dirty_set());

    static ON_PAGE: TrackedSlotArray<bool> = tracked_slot_array(Some(false), dirty_set());

    static TOP_LEVEL: TrackedSlotArray<bool> = tracked_slot_array(Some(false), dirty_set());
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    COMPONENT_TYPE.with(|arr| arr.ensure_capacity(index + 1));
    PARENT_INDEX.with(|arr| arr.ensure_capacity(index + 1));
    ROOT_ELEMENT.with(|arr| arr.ensure_capacity(index + 1));
    VISIBLE.with(|arr| arr.ensure_capacity(index + 1));
    ON_PAGE.with(|arr| arr.ensure_capacity(index + 1));
    TOP_LEVEL.with(|arr| arr.ensure_capacity(index + 1));
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    COMPONENT_TYPE.with(|arr| arr.clear(index));
    PARENT_INDEX.with(|arr| arr.clear(index));
    ROOT_ELEMENT.with(|arr| arr.clear(index));
    VISIBLE.with(|arr| arr.clear(index));
    ON_PAGE.with(|arr| arr.clear(index));
    TOP_LEVEL.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    COMPONENT_TYPE.with(clear_column);
    PARENT_INDEX.with(clear_column);
    ROOT_ELEMENT.with(clear_column);
    VISIBLE.with(clear_column);
    ON_PAGE.with(clear_column);
    TOP_LEVEL.with(clear_column);
}

// =============================================================================
// Component Type
// =============================================================================

pub fn get_component_type(index: usize) -> ComponentType {
    COMPONENT_TYPE.with(|arr| read(arr, index).unwrap_or_default())
}

pub fn set_component_type(index: usize, component_type: ComponentType) {
    COMPONENT_TYPE.with(|arr| arr.set_value(index, component_type));
}

// =============================================================================
// Parent Index
// =============================================================================

pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| read(arr, index).flatten())
}

pub fn set_parent_index(index: usize, parent: Option<usize>) {
    PARENT_INDEX.with(|arr| arr.set_value(index, parent));
}

// =============================================================================
// Root Element
// =============================================================================

pub fn get_root_element(index: usize) -> Option<ElementId> {
    ROOT_ELEMENT.with(|arr| read(arr, index).flatten())
}

pub fn set_root_element(index: usize, element: Option<ElementId>) {
    ROOT_ELEMENT.with(|arr| arr.set_value(index, element));
}

// =============================================================================
// Visibility & Page State
// =============================================================================

pub fn get_visible(index: usize) -> bool {
    VISIBLE.with(|arr| read(arr, index).unwrap_or(true))
}

pub fn set_visible(index: usize, visible: bool) {
    VISIBLE.with(|arr| arr.set_value(index, visible));
}

pub fn get_on_page(index: usize) -> bool {
    ON_PAGE.with(|arr| read(arr, index).unwrap_or(false))
}

pub fn set_on_page(index: usize, on_page: bool) {
    ON_PAGE.with(|arr| arr.set_value(index, on_page));
}

pub fn get_top_level(index: usize) -> bool {
    TOP_LEVEL.with(|arr| read(arr, index).unwrap_or(false))
}

pub fn set_top_level(index: usize, top_level: bool) {
    TOP_LEVEL.with(|arr| arr.set_value(index, top_level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clear() {
        reset();

        ensure_capacity(3);
        assert_eq!(get_component_type(3), ComponentType::None);
        assert!(get_visible(3));

        set_component_type(3, ComponentType::Label);
        set_parent_index(3, Some(1));
        set_visible(3, false);
        assert_eq!(get_parent_index(3), Some(1));

        clear_at_index(3);
        assert_eq!(get_component_type(3), ComponentType::None);
        assert_eq!(get_parent_index(3), None);
        assert!(get_visible(3));
    }

    #[test]
    fn test_writes_mark_index_dirty() {
        reset();

        set_on_page(2, true);
        assert!(ON_PAGE.with(|arr| arr.dirty().borrow().contains(&2)));

        reset();
        assert!(!get_on_page(2));
        assert!(ON_PAGE.with(|arr| arr.dirty().borrow().is_empty()));
    }
}
