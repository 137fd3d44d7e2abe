//! Property tables - one registration table per component type.
//!
//! Tables are static: they are built once per type, not per instance. A
//! property's default also fixes its value kind, which `set_property` checks.

use serde_json::Value;

use crate::types::ComponentType;

/// Designer grouping for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyGroup {
    Text,
    Appearance,
    Layout,
    Interaction,
    Behaviour,
}

/// Default value; also the kind of value the property accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropDefault {
    /// No default; any value (or null) is accepted.
    Null,
    Bool(bool),
    Number(f64),
    Str(&'static str),
}

impl PropDefault {
    pub fn to_value(&self) -> Value {
        match *self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number),
            Self::Str(s) => Value::String(s.to_string()),
        }
    }

    /// Does `value` fit this property's kind? Null is always accepted.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            _ if value.is_null() => true,
            Self::Null => true,
            Self::Bool(_) => value.is_boolean(),
            Self::Number(_) => value.is_number(),
            Self::Str(_) => value.is_string(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "any",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub default: PropDefault,
    pub group: PropertyGroup,
    /// Shown first in property listings.
    pub important: bool,
}

const fn prop(name: &'static str, default: PropDefault, group: PropertyGroup, important: bool) -> PropertyDescriptor {
    PropertyDescriptor { name, default, group, important }
}

use PropDefault::{Bool, Null, Number, Str};
use PropertyGroup::{Appearance, Behaviour, Interaction, Layout, Text};

/// Properties every component has.
pub const BASE_PROPERTIES: &[PropertyDescriptor] = &[
    prop("visible", Bool(true), Appearance, true),
    prop("role", Null, Appearance, false),
    prop("spacing_above", Str("small"), Layout, false),
    prop("spacing_below", Str("small"), Layout, false),
    prop("tag", Null, Behaviour, false),
];

const LABEL: &[PropertyDescriptor] = &[
    prop("text", Str(""), Text, true),
    prop("align", Str("left"), Text, false),
    prop("bold", Bool(false), Text, false),
];

const BUTTON: &[PropertyDescriptor] = &[
    prop("text", Str(""), Text, true),
    prop("enabled", Bool(true), Interaction, true),
    prop("align", Str("center"), Text, false),
];

const CHECK_BOX: &[PropertyDescriptor] = &[
    prop("text", Str(""), Text, true),
    prop("checked", Bool(false), Interaction, true),
    prop("enabled", Bool(true), Interaction, false),
];

const TEXT_BOX: &[PropertyDescriptor] = &[
    prop("text", Str(""), Text, true),
    prop("placeholder", Str(""), Text, true),
    prop("enabled", Bool(true), Interaction, false),
    prop("type", Str("text"), Behaviour, false),
];

const TIMER: &[PropertyDescriptor] = &[prop("interval", Number(0.5), Behaviour, true)];

const FLOW_PANEL: &[PropertyDescriptor] = &[
    prop("spacing", Str("medium"), Layout, true),
    prop("align", Str("left"), Layout, true),
];

const XY_PANEL: &[PropertyDescriptor] = &[prop("height", Number(300.0), Layout, true)];

/// Type-specific properties (in addition to `BASE_PROPERTIES`).
pub fn type_properties(component_type: ComponentType) -> &'static [PropertyDescriptor] {
    match component_type {
        ComponentType::Label => LABEL,
        ComponentType::Button => BUTTON,
        ComponentType::CheckBox => CHECK_BOX,
        ComponentType::TextBox => TEXT_BOX,
        ComponentType::Timer => TIMER,
        ComponentType::FlowPanel => FLOW_PANEL,
        ComponentType::XYPanel => XY_PANEL,
        ComponentType::None
        | ComponentType::Form
        | ComponentType::LinearPanel
        | ComponentType::GridPanel => &[],
    }
}

/// Find a property on a component type.
pub fn find_property(component_type: ComponentType, name: &str) -> Option<&'static PropertyDescriptor> {
    BASE_PROPERTIES
        .iter()
        .chain(type_properties(component_type))
        .find(|p| p.name == name)
}

/// All properties of a type, important ones first.
pub fn list_properties(component_type: ComponentType) -> Vec<&'static PropertyDescriptor> {
    let mut all: Vec<_> = BASE_PROPERTIES.iter().chain(type_properties(component_type)).collect();
    all.sort_by_key(|p| !p.important);
    all
}
