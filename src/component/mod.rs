//! Component base - creation, properties, parenting and teardown.
//!
//! Every widget and panel is created through [`create_component`], which
//! allocates an index, creates the root element and initializes the parallel
//! arrays. Properties are validated against the type's static table.
//!
//! # Parenting
//!
//! A component's parent slot is a plain index in the core arrays. Detaching
//! goes through [`remove_from_parent`], which looks up the parent and runs
//! that container's removal path for this child.

pub mod properties;

use serde_json::Value;

use crate::container;
use crate::engine::arrays::{core, props};
use crate::engine::{
    allocate_index, create_element, get_index, is_allocated, on_destroy, release_index, set_flag,
    ElementFlags, ElementId,
};
use crate::error::{ComponentError, Result};
use crate::pipeline::page;
use crate::state::events;
use crate::types::{ComponentType, PropertyMap};

pub use properties::{find_property, list_properties, PropertyDescriptor, PropertyGroup, PropDefault};

// =============================================================================
// Lifecycle
// =============================================================================

/// Create a component of the given type.
///
/// # Arguments
/// * `component_type` - What kind of component
/// * `id` - Optional string ID for lookups; generated when `None`
///
/// # Returns
/// The component index, or `DuplicateId` if `id` already names a live
/// component.
pub fn create_component(component_type: ComponentType, id: Option<&str>) -> Result<usize> {
    if let Some(id) = id.filter(|id| get_index(id).is_some()) {
        return Err(ComponentError::DuplicateId(id.to_string()));
    }
    let index = allocate_index(id);

    let element = create_element(component_type.tag());
    core::set_component_type(index, component_type);
    core::set_root_element(index, Some(element));
    core::set_visible(index, true);

    on_destroy(index, move || {
        events::cleanup_index(index);
        page::cleanup_index(index);
    });

    tracing::debug!("create {} at index {}", component_type, index);
    Ok(index)
}

/// Destroy a component and everything inside it.
///
/// The component is first detached from its parent (so the parent's child
/// list and flags stay consistent), then its subtree is released.
pub fn destroy_component(index: usize) {
    if !is_allocated(index) {
        return;
    }
    remove_from_parent(index);
    tracing::debug!("destroy {} at index {}", core::get_component_type(index), index);
    release_index(index);
}

pub fn is_component(index: usize) -> bool {
    is_allocated(index) && core::get_component_type(index) != ComponentType::None
}

pub fn component_type(index: usize) -> ComponentType {
    core::get_component_type(index)
}

pub fn root_element(index: usize) -> Option<ElementId> {
    core::get_root_element(index)
}

/// Current parent container, if attached.
pub fn get_parent(index: usize) -> Option<usize> {
    core::get_parent_index(index)
}

/// Is `ancestor` the component itself or somewhere above it?
pub fn is_self_or_ancestor(ancestor: usize, index: usize) -> bool {
    let mut current = Some(index);
    while let Some(i) = current {
        if i == ancestor {
            return true;
        }
        current = core::get_parent_index(i);
    }
    false
}

/// Detach a component from its container.
///
/// Runs the container's removal path: element detach, record removal, flag
/// update, post-removal hook. A component without a parent is left alone.
pub fn remove_from_parent(index: usize) {
    if let Some(parent) = core::get_parent_index(index) {
        container::detach_child(parent, index);
    }
}

// =============================================================================
// Properties
// =============================================================================

fn checked(index: usize) -> Result<ComponentType> {
    if !is_component(index) {
        return Err(ComponentError::NotAComponent(index));
    }
    Ok(core::get_component_type(index))
}

/// Set a property. The name must be in the type's table and the value must
/// match the kind of the default (null is always accepted).
pub fn set_property(index: usize, name: &str, value: impl Into<Value>) -> Result<()> {
    let component_type = checked(index)?;
    let value = value.into();
    let descriptor = find_property(component_type, name).ok_or_else(|| ComponentError::UnknownProperty {
        component_type: component_type.to_string(),
        name: name.to_string(),
    })?;
    if !descriptor.default.accepts(&value) {
        return Err(ComponentError::InvalidProperty {
            name: name.to_string(),
            reason: format!("expected {}", descriptor.default.kind()),
        });
    }

    if name == "visible" {
        apply_visibility(index, value.as_bool().unwrap_or(true));
    }

    props::set_property(index, name, value.clone());
    container::notify_property(index, name, &value);
    Ok(())
}

/// Read a property, falling back to the type's default.
pub fn get_property(index: usize, name: &str) -> Result<Value> {
    let component_type = checked(index)?;
    if let Some(value) = props::get_property(index, name) {
        return Ok(value);
    }
    find_property(component_type, name)
        .map(|p| p.default.to_value())
        .ok_or_else(|| ComponentError::UnknownProperty {
            component_type: component_type.to_string(),
            name: name.to_string(),
        })
}

/// Explicitly set properties, in the order they were first set.
pub fn get_properties(index: usize) -> PropertyMap {
    props::get_properties(index)
}

/// Set several properties, stopping at the first error.
pub fn set_properties(index: usize, properties: &PropertyMap) -> Result<()> {
    for (name, value) in properties {
        set_property(index, name, value.clone())?;
    }
    Ok(())
}

pub fn is_visible(index: usize) -> bool {
    core::get_visible(index)
}

fn apply_visibility(index: usize, visible: bool) {
    if core::get_visible(index) == visible {
        return;
    }
    core::set_visible(index, visible);
    if let Some(element) = core::get_root_element(index) {
        set_flag(element, ElementFlags::HIDDEN, !visible);
    }
    if let Some(parent) = core::get_parent_index(index) {
        container::notify_child_visibility(parent, index, visible);
    }
}
