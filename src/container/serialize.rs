//! Container serialization.
//!
//! A component serializes to its type, its explicitly set properties
//! (flattened) and, for containers, the ordered child list with each child's
//! layout hints:
//!
//! ```json
//! {
//!   "$_type": "FlowPanel",
//!   "spacing": "large",
//!   "$_components": [
//!     { "component": { "$_type": "Label", "text": "hi" }, "layout_properties": { "expand": true } }
//!   ]
//! }
//! ```
//!
//! Deserialization restores properties first, then replays `add_component`
//! in order. Component ids are not part of the format.

use serde::{Deserialize, Serialize};

use crate::component;
use crate::error::{ComponentError, Result};
use crate::panels::{FlowPanel, Form, GridPanel, LinearPanel, XYPanel};
use crate::primitives;
use crate::types::{ComponentType, LayoutProperties, PropertyMap};

use super::{add_component, get_child_records, get_components, is_container, Container};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedComponent {
    #[serde(rename = "$_type")]
    pub component_type: ComponentType,
    #[serde(rename = "$_components", default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<SerializedChild>>,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedChild {
    pub component: SerializedComponent,
    #[serde(default)]
    pub layout_properties: LayoutProperties,
}

/// Capture a component and, for containers, its children in order.
pub fn serialize(index: usize) -> Result<SerializedComponent> {
    if !component::is_component(index) {
        return Err(ComponentError::NotAComponent(index));
    }

    let components = if is_container(index) {
        let children = get_child_records(index)
            .into_iter()
            .map(|record| {
                Ok(SerializedChild {
                    component: serialize(record.component)?,
                    layout_properties: record.layout,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Some(children)
    } else {
        None
    };

    Ok(SerializedComponent {
        component_type: component::component_type(index),
        components,
        properties: component::get_properties(index),
    })
}

/// Build a new component tree from serialized data.
///
/// On failure everything created so far is destroyed.
pub fn deserialize(data: &SerializedComponent) -> Result<usize> {
    let index = instantiate(data.component_type)?;
    if let Err(err) = restore(index, data) {
        component::destroy_component(index);
        return Err(err);
    }
    Ok(index)
}

/// Restore serialized data into an existing, empty component of the same type.
///
/// On failure the children restored so far are destroyed again. Properties
/// applied before the failure are kept.
pub fn deserialize_into(target: usize, data: &SerializedComponent) -> Result<()> {
    if !component::is_component(target) {
        return Err(ComponentError::NotAComponent(target));
    }
    let found = component::component_type(target);
    if found != data.component_type {
        return Err(ComponentError::TypeMismatch {
            expected: data.component_type.to_string(),
            found: found.to_string(),
        });
    }
    let before = get_components(target);
    restore(target, data).inspect_err(|_| {
        for child in get_components(target) {
            if !before.contains(&child) {
                component::destroy_component(child);
            }
        }
    })
}

fn restore(index: usize, data: &SerializedComponent) -> Result<()> {
    component::set_properties(index, &data.properties)?;

    let Some(children) = &data.components else {
        return Ok(());
    };
    for child in children {
        let child_index = deserialize(&child.component)?;
        if let Err(err) = add_component(index, child_index, child.layout_properties.clone()) {
            component::destroy_component(child_index);
            return Err(err);
        }
    }
    tracing::debug!("restored {} with {} children", index, children.len());
    Ok(())
}

/// Create a fresh component of `component_type`.
pub fn instantiate(component_type: ComponentType) -> Result<usize> {
    let index = match component_type {
        ComponentType::None => {
            return Err(ComponentError::InvalidComponentType(component_type.to_string()));
        }
        ComponentType::Form => Form::new(None)?.index(),
        ComponentType::FlowPanel => FlowPanel::new(None)?.index(),
        ComponentType::LinearPanel => LinearPanel::new(None)?.index(),
        ComponentType::GridPanel => GridPanel::new(None)?.index(),
        ComponentType::XYPanel => XYPanel::new(None)?.index(),
        ComponentType::Label => primitives::label(None)?,
        ComponentType::Button => primitives::button(None)?,
        ComponentType::CheckBox => primitives::check_box(None)?,
        ComponentType::TextBox => primitives::text_box(None)?,
        ComponentType::Timer => primitives::timer(None)?,
    };
    Ok(index)
}

pub fn to_json(index: usize) -> Result<String> {
    Ok(serde_json::to_string(&serialize(index)?)?)
}

pub fn from_json(json: &str) -> Result<usize> {
    let data: SerializedComponent = serde_json::from_str(json)?;
    deserialize(&data)
}
