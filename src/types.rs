//! Core types for spark-panels.
//!
//! These types define the foundation that everything builds on: what kind of
//! component lives at an index, the per-child layout hints a container keeps,
//! and the sizes the layout engine understands.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ComponentError, Result};

// =============================================================================
// Component Types - For parallel arrays
// =============================================================================

/// Component types for the parallel arrays pattern.
///
/// Each component at index i has componentType[i] set to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ComponentType {
    #[default]
    None = 0,
    Form = 1,
    Label = 2,
    Button = 3,
    CheckBox = 4,
    TextBox = 5,
    Timer = 6,
    FlowPanel = 7,
    LinearPanel = 8,
    GridPanel = 9,
    XYPanel = 10,
}

impl ComponentType {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Form => "Form",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::CheckBox => "CheckBox",
            Self::TextBox => "TextBox",
            Self::Timer => "Timer",
            Self::FlowPanel => "FlowPanel",
            Self::LinearPanel => "LinearPanel",
            Self::GridPanel => "GridPanel",
            Self::XYPanel => "XYPanel",
        }
    }

    /// Can components of this type hold children?
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Form | Self::FlowPanel | Self::LinearPanel | Self::GridPanel | Self::XYPanel
        )
    }

    /// Invisible components have no on-screen presence (timers).
    ///
    /// Panels that keep one visual slot per child skip these.
    pub const fn is_invisible(&self) -> bool {
        matches!(self, Self::Timer)
    }

    /// Element tag used for the component's root element.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::None | Self::Timer => "span",
            Self::Label => "label",
            Self::Button => "button",
            Self::CheckBox => "checkbox",
            Self::TextBox => "input",
            Self::Form | Self::FlowPanel | Self::LinearPanel | Self::GridPanel | Self::XYPanel => {
                "div"
            }
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Breakpoints - GridPanel size classes
// =============================================================================

/// Size classes for grid column math, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 4] = [Self::Xs, Self::Sm, Self::Md, Self::Lg];

    /// Suffix used in layout keys (`width_xs`) and column classes (`col-xs-6`).
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    /// Minimum viewport width (pixels) at which this size class applies.
    pub const fn min_width(&self) -> f32 {
        match self {
            Self::Xs => 0.0,
            Self::Sm => 768.0,
            Self::Md => 992.0,
            Self::Lg => 1200.0,
        }
    }

    /// The widest size class active at `viewport_width`.
    pub fn for_width(viewport_width: f32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|bp| viewport_width >= bp.min_width())
            .unwrap_or(Self::Xs)
    }
}

// =============================================================================
// Dimension - Element sizes
// =============================================================================

/// Dimension value for element sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Content-determined.
    #[default]
    Auto,
    /// Absolute size in pixels.
    Px(f32),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

// =============================================================================
// Property Maps
// =============================================================================

/// Ordered property name → value map.
pub type PropertyMap = IndexMap<String, Value>;

/// Per-child placement hints kept by a container.
///
/// Opaque to the bookkeeping layer; each panel type reads its own keys
/// (`row`, `col_xs`, `width_xs` for grids, `x`, `y`, `width` for XY
/// placement, `index`, `expand` for flow and linear panels).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutProperties(IndexMap<String, Value>);

impl LayoutProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Insertion index requested by the caller, if any.
    pub fn index(&self) -> Result<Option<usize>> {
        self.get_u32("index").map(|i| i.map(|i| i as usize))
    }

    /// Read a non-negative integer key. Missing or null is `None`.
    pub fn get_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .or_else(|| v.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u32))
                .map(Some)
                .ok_or_else(|| invalid_layout(key, "expected a non-negative integer")),
        }
    }

    /// Read a numeric key. Missing or null is `None`.
    pub fn get_f32(&self, key: &str) -> Result<Option<f32>> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(|f| Some(f as f32))
                .ok_or_else(|| invalid_layout(key, "expected a number")),
        }
    }

    /// Read a boolean key. Missing or null is `false`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(v) => v
                .as_bool()
                .ok_or_else(|| invalid_layout(key, "expected a boolean")),
        }
    }

    /// Read a string key. Numbers are accepted and stringified (grid row names).
    pub fn get_str(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(invalid_layout(key, "expected a string")),
        }
    }
}

impl From<IndexMap<String, Value>> for LayoutProperties {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<const N: usize> From<[(&str, Value); N]> for LayoutProperties {
    fn from(pairs: [(&str, Value); N]) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

fn invalid_layout(key: &str, reason: &str) -> ComponentError {
    ComponentError::InvalidLayout {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_accessors() {
        let layout = LayoutProperties::from([
            ("row", json!("A")),
            ("width_xs", json!(4)),
            ("expand", json!(true)),
            ("x", json!(12.5)),
            ("col_xs", Value::Null),
        ]);

        assert_eq!(layout.get_str("row").unwrap(), Some("A".to_string()));
        assert_eq!(layout.get_u32("width_xs").unwrap(), Some(4));
        assert!(layout.get_bool("expand").unwrap());
        assert_eq!(layout.get_f32("x").unwrap(), Some(12.5));
        assert_eq!(layout.get_u32("col_xs").unwrap(), None);
        assert!(!layout.contains_key("col_xs"));
    }

    #[test]
    fn test_layout_rejects_wrong_types() {
        let layout = LayoutProperties::new()
            .with("index", -1)
            .with("expand", "yes");

        assert!(matches!(
            layout.index(),
            Err(ComponentError::InvalidLayout { .. })
        ));
        assert!(layout.get_bool("expand").is_err());
    }

    #[test]
    fn test_numeric_row_names() {
        let layout = LayoutProperties::new().with("row", 3);
        assert_eq!(layout.get_str("row").unwrap(), Some("3".to_string()));
    }

    #[test]
    fn test_breakpoint_for_width() {
        assert_eq!(Breakpoint::for_width(320.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::for_width(800.0), Breakpoint::Sm);
        assert_eq!(Breakpoint::for_width(1000.0), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1920.0), Breakpoint::Lg);
    }
}
