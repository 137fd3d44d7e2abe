//! LinearPanel - children stacked vertically, one list item each.

use std::rc::Rc;

use crate::component::create_component;
use crate::container::{register_container, ChildRecord, Placed, Placement};
use crate::engine::arrays::core;
use crate::engine::{append_child, create_element, insert_child, set_flag, ElementFlags, ElementId};
use crate::error::Result;
use crate::types::{ComponentType, LayoutProperties};

use super::panel_handle;

/// Stacks children vertically inside `holder`. Shared with forms.
pub(crate) struct LinearPlacement {
    pub(crate) holder: ElementId,
}

impl Placement for LinearPlacement {
    fn holder(&self) -> ElementId {
        self.holder
    }

    fn place(&self, _container: usize, child: usize, child_element: ElementId, layout: &LayoutProperties) -> Result<Placed> {
        let index = layout.index()?;
        // Accepted and kept for serialization; the stack ignores it.
        layout.get_bool("expand")?;

        let item = create_element("li");
        set_flag(item, ElementFlags::LIST_ITEM, true);
        if core::get_component_type(child).is_invisible() || !core::get_visible(child) {
            set_flag(item, ElementFlags::HIDDEN, true);
        }
        append_child(item, child_element);
        insert_child(self.holder, item, index);

        Ok(Placed { slot: Some(item), index })
    }

    fn on_child_visibility(&self, record: &ChildRecord, visible: bool) {
        if core::get_component_type(record.component).is_invisible() {
            return;
        }
        if let Some(item) = record.slot {
            set_flag(item, ElementFlags::HIDDEN, !visible);
        }
    }
}

/// Container that stacks children top to bottom.
///
/// Layout keys: `index`, `expand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearPanel {
    index: usize,
}

impl LinearPanel {
    pub fn new(id: Option<&str>) -> Result<Self> {
        let index = create_component(ComponentType::LinearPanel, id)?;
        if let Some(holder) = core::get_root_element(index) {
            register_container(index, Rc::new(LinearPlacement { holder }));
        }
        Ok(Self { index })
    }
}

panel_handle!(LinearPanel, ComponentType::LinearPanel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{self, destroy_component};
    use crate::container::{get_child_records, has_components_signal, Container};
    use crate::engine::{children, element_exists, has_flag, parent_element, with_element};
    use crate::primitives;
    use crate::reset_toolkit;

    #[test]
    fn test_list_items_in_order() {
        reset_toolkit();

        let panel = LinearPanel::new(None).unwrap();
        let holder = component::root_element(panel.index()).unwrap();
        let a = primitives::label(None).unwrap();
        let b = primitives::button(None).unwrap();
        let c = primitives::check_box(None).unwrap();
        panel.add_component(a, LayoutProperties::new()).unwrap();
        panel.add_component(b, LayoutProperties::new()).unwrap();
        panel.add_component(c, LayoutProperties::new().with("index", 1)).unwrap();

        assert_eq!(panel.get_components(), vec![a, c, b]);
        let items = children(holder);
        let order: Vec<_> = [a, c, b]
            .iter()
            .map(|&x| parent_element(component::root_element(x).unwrap()).unwrap())
            .collect();
        assert_eq!(items, order);
        assert!(items.iter().all(|&li| with_element(li, |e| e.tag) == Some("li")));
    }

    #[test]
    fn test_out_of_range_index_appends() {
        reset_toolkit();

        let panel = LinearPanel::new(None).unwrap();
        let a = primitives::label(None).unwrap();
        let b = primitives::label(None).unwrap();
        panel.add_component(a, LayoutProperties::new()).unwrap();
        panel.add_component(b, LayoutProperties::new().with("index", 40)).unwrap();
        assert_eq!(panel.get_components(), vec![a, b]);
    }

    #[test]
    fn test_timer_gets_hidden_item() {
        reset_toolkit();

        let panel = LinearPanel::new(None).unwrap();
        let timer = primitives::timer(None).unwrap();
        panel.add_component(timer, LayoutProperties::new()).unwrap();

        let item = get_child_records(panel.index())[0].slot.unwrap();
        assert!(has_flag(item, ElementFlags::LIST_ITEM));
        assert!(has_flag(item, ElementFlags::HIDDEN));

        component::set_property(timer, "visible", true).unwrap();
        assert!(has_flag(item, ElementFlags::HIDDEN));
    }

    #[test]
    fn test_has_components_tracks_count() {
        reset_toolkit();

        let panel = LinearPanel::new(None).unwrap();
        let root = component::root_element(panel.index()).unwrap();
        let signal = has_components_signal(panel.index()).unwrap();
        let label = primitives::label(None).unwrap();

        panel.add_component(label, LayoutProperties::new()).unwrap();
        assert!(has_flag(root, ElementFlags::HAS_COMPONENTS));
        assert!(signal.get());

        component::remove_from_parent(label);
        assert!(!has_flag(root, ElementFlags::HAS_COMPONENTS));
        assert!(!signal.get());
        assert!(children(root).is_empty());
        assert!(component::is_component(label));
    }

    #[test]
    fn test_destroying_child_detaches_it() {
        reset_toolkit();

        let panel = LinearPanel::new(None).unwrap();
        let label = primitives::label(None).unwrap();
        panel.add_component(label, LayoutProperties::new()).unwrap();
        let item = get_child_records(panel.index())[0].slot.unwrap();

        destroy_component(label);
        assert!(panel.get_components().is_empty());
        assert!(!element_exists(item));
        assert!(!panel.has_components());
    }
}
