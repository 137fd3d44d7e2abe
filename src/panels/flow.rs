//! FlowPanel - children left to right, wrapping onto new lines.
//!
//! ```text
//! div (panel root)
//! └── div.gutter (row, wrap, gap = spacing)
//!     ├── div.gutter-item → child element
//!     └── div.gutter-item.expand → child element
//! ```
//!
//! Invisible component types (timers) are kept in the child list but get no
//! gutter item.

use std::rc::Rc;

use serde_json::Value;

use crate::component::create_component;
use crate::config;
use crate::container::{get_child_records, register_container, ChildRecord, Placed, Placement};
use crate::engine::arrays::core;
use crate::engine::{
    append_child, create_element, insert_child, set_flag, update_style, Direction, ElementFlags,
    ElementId,
};
use crate::error::{ComponentError, Result};
use crate::types::{ComponentType, Dimension, LayoutProperties};

use super::panel_handle;

/// Gap in pixels for a `spacing` value.
fn spacing_gap(spacing: &str) -> Option<f32> {
    config::with_config(|c| match spacing {
        "none" => Some(c.flow_spacing.none),
        "small" => Some(c.flow_spacing.small),
        "medium" => Some(c.flow_spacing.medium),
        "large" => Some(c.flow_spacing.large),
        _ => None,
    })
}

struct FlowPlacement {
    gutter: ElementId,
}

impl Placement for FlowPlacement {
    fn holder(&self) -> ElementId {
        self.gutter
    }

    fn place(&self, container: usize, child: usize, child_element: ElementId, layout: &LayoutProperties) -> Result<Placed> {
        let index = layout.index()?;
        let width = layout.get_f32("width")?;
        let expand = layout.get_bool("expand")?;

        if core::get_component_type(child).is_invisible() {
            return Ok(Placed { slot: None, index });
        }

        // Records without a slot have no gutter item, so the gutter position
        // is the number of slotted records before the requested index.
        let position = index.map(|i| {
            get_child_records(container)
                .iter()
                .take(i)
                .filter(|r| r.slot.is_some())
                .count()
        });

        let item = create_element("div");
        set_flag(item, ElementFlags::GUTTER_ITEM, true);
        if expand {
            set_flag(item, ElementFlags::EXPAND, true);
            update_style(item, |s| s.flex_grow = 1.0);
        }
        if let Some(width) = width {
            update_style(item, |s| s.width = Dimension::Px(width));
        }
        if !core::get_visible(child) {
            set_flag(item, ElementFlags::HIDDEN, true);
        }
        append_child(item, child_element);
        insert_child(self.gutter, item, position);

        Ok(Placed { slot: Some(item), index })
    }

    fn on_child_visibility(&self, record: &ChildRecord, visible: bool) {
        if let Some(item) = record.slot {
            set_flag(item, ElementFlags::HIDDEN, !visible);
        }
    }

    fn on_property(&self, name: &str, value: &Value) {
        if name != "spacing" {
            return;
        }
        let spacing = value.as_str().unwrap_or("medium");
        match spacing_gap(spacing) {
            Some(gap) => update_style(self.gutter, |s| s.gap = gap),
            None => tracing::warn!("unknown flow spacing '{}'", spacing),
        }
    }
}

/// Container that flows children left to right and wraps.
///
/// Layout keys: `index`, `width` (pixels), `expand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPanel {
    index: usize,
}

impl FlowPanel {
    pub fn new(id: Option<&str>) -> Result<Self> {
        let index = create_component(ComponentType::FlowPanel, id)?;
        let Some(root) = core::get_root_element(index) else {
            return Ok(Self { index });
        };

        let gutter = create_element("div");
        update_style(gutter, |s| {
            s.direction = Direction::Row;
            s.wrap = true;
            s.gap = spacing_gap("medium").unwrap_or_default();
        });
        append_child(root, gutter);

        register_container(index, Rc::new(FlowPlacement { gutter }));
        Ok(Self { index })
    }

    /// Element holding the gutter items.
    pub fn gutter(&self) -> Result<ElementId> {
        core::get_root_element(self.index)
            .and_then(|root| crate::engine::children(root).first().copied())
            .ok_or(ComponentError::NotAComponent(self.index))
    }
}

panel_handle!(FlowPanel, ComponentType::FlowPanel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{self, set_property};
    use crate::container::Container;
    use crate::engine::{children, has_flag, parent_element, style};
    use crate::primitives;
    use crate::reset_toolkit;
    use serde_json::json;

    #[test]
    fn test_items_follow_index() {
        reset_toolkit();

        let panel = FlowPanel::new(None).unwrap();
        let a = primitives::label(None).unwrap();
        let b = primitives::label(None).unwrap();
        panel.add_component(a, LayoutProperties::new()).unwrap();
        panel.add_component(b, LayoutProperties::new().with("index", 0)).unwrap();

        assert_eq!(panel.get_components(), vec![b, a]);
        let items = children(panel.gutter().unwrap());
        assert_eq!(items.len(), 2);
        assert_eq!(parent_element(component::root_element(b).unwrap()), Some(items[0]));
        assert_eq!(parent_element(component::root_element(a).unwrap()), Some(items[1]));
    }

    #[test]
    fn test_expand_and_width() {
        reset_toolkit();

        let panel = FlowPanel::new(None).unwrap();
        let button = primitives::button(None).unwrap();
        panel
            .add_component(button, LayoutProperties::from([("expand", json!(true)), ("width", json!(120))]))
            .unwrap();

        let item = get_child_records(panel.index())[0].slot.unwrap();
        assert!(has_flag(item, ElementFlags::GUTTER_ITEM));
        assert!(has_flag(item, ElementFlags::EXPAND));
        let item_style = style(item).unwrap();
        assert_eq!(item_style.flex_grow, 1.0);
        assert_eq!(item_style.width, Dimension::Px(120.0));
    }

    #[test]
    fn test_timer_bypasses_gutter() {
        reset_toolkit();

        let panel = FlowPanel::new(None).unwrap();
        let timer = primitives::timer(None).unwrap();
        let label = primitives::label(None).unwrap();
        panel.add_component(timer, LayoutProperties::new()).unwrap();
        panel.add_component(label, LayoutProperties::new()).unwrap();

        assert_eq!(panel.get_components(), vec![timer, label]);
        assert_eq!(get_child_records(panel.index())[0].slot, None);
        assert_eq!(children(panel.gutter().unwrap()).len(), 1);

        panel.clear();
        assert!(panel.get_components().is_empty());
    }

    #[test]
    fn test_hidden_child_hides_item() {
        reset_toolkit();

        let panel = FlowPanel::new(None).unwrap();
        let label = primitives::label(None).unwrap();
        panel.add_component(label, LayoutProperties::new()).unwrap();
        let item = get_child_records(panel.index())[0].slot.unwrap();

        set_property(label, "visible", false).unwrap();
        assert!(has_flag(item, ElementFlags::HIDDEN));
        set_property(label, "visible", true).unwrap();
        assert!(!has_flag(item, ElementFlags::HIDDEN));
    }

    #[test]
    fn test_spacing_sets_gap() {
        reset_toolkit();

        let panel = FlowPanel::new(None).unwrap();
        let gutter = panel.gutter().unwrap();
        assert_eq!(style(gutter).unwrap().gap, 8.0);

        set_property(panel.index(), "spacing", "large").unwrap();
        assert_eq!(style(gutter).unwrap().gap, 16.0);
    }

    #[test]
    fn test_rejects_bad_layout_before_mutation() {
        reset_toolkit();

        let panel = FlowPanel::new(None).unwrap();
        let label = primitives::label(None).unwrap();
        let result = panel.add_component(label, LayoutProperties::new().with("expand", "yes"));

        assert!(matches!(result, Err(ComponentError::InvalidLayout { .. })));
        assert!(panel.get_components().is_empty());
        assert!(children(panel.gutter().unwrap()).is_empty());
        assert_eq!(component::get_parent(label), None);
    }
}
