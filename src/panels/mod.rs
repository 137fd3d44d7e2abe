//! Panels - Concrete containers and their placement strategies.
//!
//! - [`FlowPanel`]: left-to-right with wrapping, one gutter item per child
//! - [`LinearPanel`]: vertical stack, one list item per child
//! - [`GridPanel`]: named rows with breakpoint column math
//! - [`XYPanel`]: absolute pixel placement against a holder
//! - [`Form`]: top-level container, stacked like a linear panel
//!
//! Each panel type is a thin `Copy` handle around its component index. The
//! placement strategy itself lives in the container registry.

/// Implement the handle boilerplate shared by every panel type.
macro_rules! panel_handle {
    ($name:ident, $component_type:expr) => {
        impl $name {
            /// Wrap an existing component index if it holds this panel type.
            pub fn from_index(index: usize) -> Option<Self> {
                (crate::component::is_component(index)
                    && crate::component::component_type(index) == $component_type)
                    .then_some(Self { index })
            }
        }

        impl crate::container::Container for $name {
            fn index(&self) -> usize {
                self.index
            }
        }
    };
}

pub(crate) use panel_handle;

mod flow;
mod form;
mod grid;
mod linear;
mod xy;

pub use flow::FlowPanel;
pub use form::Form;
pub use grid::GridPanel;
pub use linear::LinearPanel;
pub use xy::XYPanel;
pub(crate) use grid::reset_grids;
