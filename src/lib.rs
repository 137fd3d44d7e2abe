//! # spark-panels
//!
//! Retained component tree with container layout strategies.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive state and [Taffy](https://github.com/DioxusLabs/taffy) for layout.
//!
//! ## Architecture
//!
//! Components are indices into parallel arrays (ECS-style) rather than
//! objects. Each component owns a root element in a lightweight element tree,
//! carries a property map and an event-handler table, and may be placed in a
//! container:
//!
//! ```text
//! add_component(container, child, layout)
//!   → validate → Placement::place → do_add_component → page notifications
//! remove_from_parent(child)
//!   → detach_child(parent, child) → Placement::detach → after_remove
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Component types, breakpoints, layout properties
//! - [`engine`] - Component registry, element tree, parallel arrays
//! - [`component`] - Creation, properties, parenting
//! - [`container`] - Container capability, shared bookkeeping, serialization
//! - [`panels`] - Flow, linear, grid and XY panels, forms
//! - [`primitives`] - Leaf widgets
//! - [`state`] - Events
//! - [`pipeline`] - Page visibility and mounting
//! - [`layout`] - Taffy bridge for rendered sizes
//! - [`config`] - Toolkit configuration and viewport signals

pub mod component;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod layout;
pub mod panels;
pub mod pipeline;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ComponentError, Result};

pub use config::{set_config, set_viewport_size, ToolkitConfig};

pub use engine::{get_allocated_indices, get_id, get_index, is_allocated, on_destroy};

pub use component::{
    create_component, destroy_component, get_parent, get_properties, get_property,
    remove_from_parent, set_properties, set_property,
};

pub use container::{
    add_component, clear, do_add_component, get_components, has_components,
    raise_event_on_children, ChildRecord, Container, Placed, Placement, SerializedChild,
    SerializedComponent,
};

pub use panels::{FlowPanel, Form, GridPanel, LinearPanel, XYPanel};

pub use state::{
    add_event_handler, async_handler, handler, raise_event, remove_event_handler,
    set_event_handler, EventArgs, EventHandler, HandlerId,
};

pub use pipeline::{mount, open_form, MountHandle, PageEvent};

pub use layout::{compute_layout, rendered_width, ComputedLayout, LayoutRect};

/// Reset every registry to a clean state (for testing).
pub fn reset_toolkit() {
    engine::reset_registry();
    container::reset_containers();
    panels::reset_grids();
    state::events::reset_events_state();
    pipeline::page::reset_page_state();
    pipeline::mount::reset_mount_state();
    config::reset_config();
}
