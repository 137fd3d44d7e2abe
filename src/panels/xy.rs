//! XYPanel - absolute pixel placement.
//!
//! ```text
//! div (panel root)
//! └── div.holder (width 100%, height = panel height)
//!     └── div (absolute, left = x, top = y, width?) → child element
//! ```

use std::rc::Rc;

use serde_json::Value;

use crate::component::create_component;
use crate::container::{register_container, Placed, Placement};
use crate::engine::arrays::core;
use crate::engine::{
    append_child, children, create_element, set_flag, update_style, ElementFlags, ElementId,
};
use crate::error::{ComponentError, Result};
use crate::layout;
use crate::types::{ComponentType, Dimension, LayoutProperties};

use super::panel_handle;

const DEFAULT_HEIGHT: f32 = 300.0;

struct XYPlacement {
    holder: ElementId,
}

impl Placement for XYPlacement {
    fn holder(&self) -> ElementId {
        self.holder
    }

    fn place(&self, _container: usize, _child: usize, child_element: ElementId, layout: &LayoutProperties) -> Result<Placed> {
        let x = layout.get_f32("x")?.unwrap_or(0.0);
        let y = layout.get_f32("y")?.unwrap_or(0.0);
        let width = layout.get_f32("width")?;

        let wrapper = create_element("div");
        update_style(wrapper, |s| {
            s.absolute = true;
            s.left = x;
            s.top = y;
            if let Some(width) = width {
                s.width = Dimension::Px(width);
            }
        });
        append_child(wrapper, child_element);
        append_child(self.holder, wrapper);

        Ok(Placed { slot: Some(wrapper), index: None })
    }

    fn on_property(&self, name: &str, value: &Value) {
        if name == "height" {
            let height = value.as_f64().map_or(DEFAULT_HEIGHT, |h| h as f32);
            update_style(self.holder, |s| s.height = Dimension::Px(height));
        }
    }
}

/// Container that positions children at pixel coordinates.
///
/// Layout keys: `x`, `y` (default 0), `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XYPanel {
    index: usize,
}

impl XYPanel {
    pub fn new(id: Option<&str>) -> Result<Self> {
        let index = create_component(ComponentType::XYPanel, id)?;
        let Some(root) = core::get_root_element(index) else {
            return Ok(Self { index });
        };

        let holder = create_element("div");
        set_flag(holder, ElementFlags::HOLDER, true);
        update_style(holder, |s| {
            s.width = Dimension::Percent(100.0);
            s.height = Dimension::Px(DEFAULT_HEIGHT);
        });
        append_child(root, holder);

        register_container(index, Rc::new(XYPlacement { holder }));
        Ok(Self { index })
    }

    /// Element the positioned children attach to.
    pub fn holder(&self) -> Result<ElementId> {
        core::get_root_element(self.index)
            .and_then(|root| children(root).first().copied())
            .ok_or(ComponentError::NotAComponent(self.index))
    }

    /// Rendered width of the holder on the current viewport.
    pub fn get_width(&self) -> f32 {
        self.holder().map_or(0.0, layout::rendered_width)
    }
}

panel_handle!(XYPanel, ComponentType::XYPanel);
