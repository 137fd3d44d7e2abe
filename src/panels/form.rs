//! Form - top-level container. Children stack like a linear panel.
//!
//! A form becomes top-level when it is mounted (see `pipeline::mount`); until
//! then it may be nested like any other container.

use std::rc::Rc;

use crate::component::create_component;
use crate::container::register_container;
use crate::engine::arrays::core;
use crate::error::Result;
use crate::types::ComponentType;

use super::linear::LinearPlacement;
use super::panel_handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Form {
    index: usize,
}

impl Form {
    pub fn new(id: Option<&str>) -> Result<Self> {
        let index = create_component(ComponentType::Form, id)?;
        if let Some(holder) = core::get_root_element(index) {
            register_container(index, Rc::new(LinearPlacement { holder }));
        }
        Ok(Self { index })
    }

    pub fn is_top_level(&self) -> bool {
        core::get_top_level(self.index)
    }
}

panel_handle!(Form, ComponentType::Form);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::panels::LinearPanel;
    use crate::primitives;
    use crate::reset_toolkit;
    use crate::types::LayoutProperties;

    #[test]
    fn test_form_holds_children() {
        reset_toolkit();

        let form = Form::new(Some("main")).unwrap();
        let label = primitives::label(None).unwrap();
        form.add_component(label, LayoutProperties::new()).unwrap();

        assert_eq!(form.get_components(), vec![label]);
        assert!(!form.is_top_level());
        assert_eq!(Form::from_index(form.index()), Some(form));
        assert_eq!(LinearPanel::from_index(form.index()), None);
    }

    #[test]
    fn test_unmounted_form_can_nest() {
        reset_toolkit();

        let outer = LinearPanel::new(None).unwrap();
        let form = Form::new(None).unwrap();
        outer.add_component(form.index(), LayoutProperties::new()).unwrap();
        assert_eq!(outer.get_components(), vec![form.index()]);
    }
}
