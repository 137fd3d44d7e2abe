//! Containers - components that hold and lay out other components.
//!
//! # Architecture
//!
//! Every container is registered here with a [`Placement`] strategy and an
//! ordered list of [`ChildRecord`]s. Adding a child is two steps:
//!
//! 1. `Placement::place` puts the child's element under the container
//!    (flow item, list item, grid column, absolute wrapper)
//! 2. [`do_add_component`] does the shared bookkeeping: record insertion,
//!    `HAS_COMPONENTS` flag, parent slot, page notifications
//!
//! Removal is the reverse, keyed by child index ([`detach_child`]); there
//! are no closures capturing container state.
//!
//! ```text
//! add_component(panel, child, layout)
//!   → validate → Placement::place → do_add_component → page::notify(Added, Shown)
//! remove_from_parent(child)
//!   → detach_child(parent, child)
//!   → Placement::detach → splice record → flag → Placement::after_remove
//! ```

pub mod serialize;

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use serde_json::Value;
use spark_signals::{signal, Signal};

use crate::component::{self, is_self_or_ancestor};
use crate::engine::arrays::core;
use crate::engine::{
    children, destroy_element, detach_element, on_destroy, set_flag, ElementFlags, ElementId,
};
use crate::error::{ComponentError, Result};
use crate::pipeline::page::{self, PageEvent};
use crate::state::events;
use crate::types::{LayoutProperties, PropertyMap};

pub use serialize::{deserialize, deserialize_into, from_json, serialize, to_json, SerializedChild, SerializedComponent};

// =============================================================================
// Types
// =============================================================================

/// One child of a container.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    pub component: usize,
    /// Layout hints as given by the caller (without `index`).
    pub layout: LayoutProperties,
    /// Wrapper element the placement created, if any.
    pub slot: Option<ElementId>,
}

/// Result of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placed {
    /// Wrapper element around the child's root element.
    pub slot: Option<ElementId>,
    /// Position for the child record; `None` appends.
    pub index: Option<usize>,
}

/// Layout strategy of a container type.
///
/// Implementations validate their layout keys before touching any element,
/// so a failed `place` leaves the tree unchanged.
pub trait Placement {
    /// Element that holds the placement's wrappers.
    fn holder(&self) -> ElementId;

    /// Insert `child_element` beneath the container.
    fn place(&self, container: usize, child: usize, child_element: ElementId, layout: &LayoutProperties) -> Result<Placed>;

    /// Detach the child's elements. The default unhooks the child's root
    /// element and drops the wrapper.
    fn detach(&self, _container: usize, record: &ChildRecord) {
        default_detach(record);
    }

    /// Runs after the record has been removed.
    fn after_remove(&self, _container: usize, _record: &ChildRecord) {}

    /// A child's `visible` property changed.
    fn on_child_visibility(&self, _record: &ChildRecord, _visible: bool) {}

    /// One of the container's own properties changed.
    fn on_property(&self, _name: &str, _value: &Value) {}

    /// Drop all placement state (after `clear`).
    fn reset(&self, _container: usize) {}
}

/// Unhook the child's root element and destroy the wrapper.
pub fn default_detach(record: &ChildRecord) {
    if let Some(element) = core::get_root_element(record.component) {
        detach_element(element);
    }
    if let Some(slot) = record.slot {
        destroy_element(slot);
    }
}

struct ContainerState {
    placement: Rc<dyn Placement>,
    children: Vec<ChildRecord>,
    has_components: Signal<bool>,
}

thread_local! {
    static CONTAINERS: RefCell<HashMap<usize, ContainerState>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Registration
// =============================================================================

/// Register `index` as a container using `placement`.
///
/// Called by panel constructors right after `create_component`. The state is
/// dropped when the component is destroyed.
pub fn register_container(index: usize, placement: Rc<dyn Placement>) {
    CONTAINERS.with(|containers| {
        containers.borrow_mut().insert(
            index,
            ContainerState {
                placement,
                children: Vec::new(),
                has_components: signal(false),
            },
        );
    });
    on_destroy(index, move || {
        CONTAINERS.with(|containers| {
            containers.borrow_mut().remove(&index);
        });
    });
}

pub fn is_container(index: usize) -> bool {
    CONTAINERS.with(|containers| containers.borrow().contains_key(&index))
}

fn placement_of(container: usize) -> Result<Rc<dyn Placement>> {
    CONTAINERS
        .with(|containers| containers.borrow().get(&container).map(|s| s.placement.clone()))
        .ok_or(ComponentError::NotAContainer(container))
}

// =============================================================================
// Adding
// =============================================================================

/// Check that `child` may be added to `container`.
pub fn validate_child(container: usize, child: usize) -> Result<()> {
    if !component::is_component(child) {
        return Err(ComponentError::NotAComponent(child));
    }
    if !is_container(container) {
        return Err(ComponentError::NotAContainer(container));
    }
    if let Some(parent) = core::get_parent_index(child) {
        return Err(ComponentError::AlreadyParented { child, parent });
    }
    if core::get_top_level(child) {
        return Err(ComponentError::TopLevel(child));
    }
    if is_self_or_ancestor(child, container) {
        return Err(ComponentError::WouldCreateCycle { child, container });
    }
    Ok(())
}

/// Add `child` to `container` with the given layout hints.
///
/// Validation happens before any mutation. On success the child's element is
/// placed by the container's strategy and the bookkeeping is updated.
pub fn add_component(container: usize, child: usize, layout: LayoutProperties) -> Result<()> {
    validate_child(container, child)?;
    let placement = placement_of(container)?;
    let child_element = core::get_root_element(child).ok_or(ComponentError::NotAComponent(child))?;

    let placed = placement.place(container, child, child_element, &layout)?;
    do_add_component(container, child, layout, placed)
}

/// Shared bookkeeping after a strategy has placed the child's element.
///
/// Re-validates the child (undoing the placement if that fails), inserts the
/// record at `placed.index` or appends when it is missing or out of range,
/// sets the `HAS_COMPONENTS` flag on the first child, writes the parent slot
/// and notifies the child subtree if the container is on the page.
pub fn do_add_component(container: usize, child: usize, mut layout: LayoutProperties, placed: Placed) -> Result<()> {
    if let Err(err) = validate_child(container, child) {
        default_detach(&ChildRecord {
            component: child,
            layout,
            slot: placed.slot,
        });
        return Err(err);
    }

    layout.remove("index");
    let record = ChildRecord {
        component: child,
        layout,
        slot: placed.slot,
    };

    let (first_child, count) = CONTAINERS.with(|containers| {
        let mut containers = containers.borrow_mut();
        let Some(state) = containers.get_mut(&container) else {
            return (false, 0);
        };
        match placed.index {
            Some(i) if i <= state.children.len() => state.children.insert(i, record),
            _ => state.children.push(record),
        }
        let first = state.children.len() == 1;
        if first {
            state.has_components.set(true);
        }
        (first, state.children.len())
    });

    if first_child {
        if let Some(element) = core::get_root_element(container) {
            set_flag(element, ElementFlags::HAS_COMPONENTS, true);
        }
    }
    core::set_parent_index(child, Some(container));

    tracing::debug!(
        "add {} {} to {} {} ({} children)",
        core::get_component_type(child),
        child,
        core::get_component_type(container),
        container,
        count
    );

    if core::get_on_page(container) {
        page::notify(child, PageEvent::Added);
        page::notify(child, PageEvent::Shown);
    }
    Ok(())
}

// =============================================================================
// Removing
// =============================================================================

/// Remove `child` from `container`.
///
/// (a) strategy element detach, (b) record removal, (c) `HAS_COMPONENTS`
/// cleared on the last child, (d) strategy post-removal hook. A child that is
/// not in the container is left alone.
pub fn detach_child(container: usize, child: usize) {
    let found = CONTAINERS.with(|containers| {
        let containers = containers.borrow();
        let state = containers.get(&container)?;
        let record = state.children.iter().find(|r| r.component == child)?.clone();
        Some((state.placement.clone(), record))
    });
    let Some((placement, record)) = found else {
        return;
    };

    placement.detach(container, &record);

    let now_empty = CONTAINERS.with(|containers| {
        let mut containers = containers.borrow_mut();
        let Some(state) = containers.get_mut(&container) else {
            return false;
        };
        state.children.retain(|r| r.component != child);
        let empty = state.children.is_empty();
        if empty {
            state.has_components.set(false);
        }
        empty
    });
    if now_empty {
        if let Some(element) = core::get_root_element(container) {
            set_flag(element, ElementFlags::HAS_COMPONENTS, false);
        }
    }
    core::set_parent_index(child, None);

    placement.after_remove(container, &record);

    tracing::debug!("remove {} from {}", child, container);

    if core::get_on_page(child) {
        page::notify(child, PageEvent::Removed);
    }
}

/// Remove every child through its removal path, then reset placement state.
///
/// Safe on an empty container.
pub fn clear(container: usize) {
    let Ok(placement) = placement_of(container) else {
        return;
    };

    for child in get_components(container) {
        component::remove_from_parent(child);
    }

    placement.reset(container);
    for leftover in children(placement.holder()) {
        destroy_element(leftover);
    }

    CONTAINERS.with(|containers| {
        if let Some(state) = containers.borrow_mut().get_mut(&container) {
            state.children.clear();
            state.has_components.set(false);
        }
    });
    if let Some(element) = core::get_root_element(container) {
        set_flag(element, ElementFlags::HAS_COMPONENTS, false);
    }
    tracing::debug!("cleared {}", container);
}

// =============================================================================
// Queries
// =============================================================================

/// Children in current order (snapshot).
pub fn get_components(container: usize) -> Vec<usize> {
    CONTAINERS.with(|containers| {
        containers
            .borrow()
            .get(&container)
            .map(|s| s.children.iter().map(|r| r.component).collect())
            .unwrap_or_default()
    })
}

/// Child records in current order (snapshot).
pub fn get_child_records(container: usize) -> Vec<ChildRecord> {
    CONTAINERS.with(|containers| {
        containers
            .borrow()
            .get(&container)
            .map(|s| s.children.clone())
            .unwrap_or_default()
    })
}

/// Layout hints stored for a child.
pub fn get_layout_properties(container: usize, child: usize) -> Option<LayoutProperties> {
    CONTAINERS.with(|containers| {
        containers
            .borrow()
            .get(&container)?
            .children
            .iter()
            .find(|r| r.component == child)
            .map(|r| r.layout.clone())
    })
}

pub fn has_components(container: usize) -> bool {
    CONTAINERS.with(|containers| {
        containers
            .borrow()
            .get(&container)
            .is_some_and(|s| !s.children.is_empty())
    })
}

/// Signal tracking whether the container has children.
pub fn has_components_signal(container: usize) -> Option<Signal<bool>> {
    CONTAINERS.with(|containers| {
        containers
            .borrow()
            .get(&container)
            .map(|s| s.has_components.clone())
    })
}

// =============================================================================
// Notifications
// =============================================================================

/// Forward a child's visibility change to the container's strategy.
pub fn notify_child_visibility(container: usize, child: usize, visible: bool) {
    let found = CONTAINERS.with(|containers| {
        let containers = containers.borrow();
        let state = containers.get(&container)?;
        let record = state.children.iter().find(|r| r.component == child)?.clone();
        Some((state.placement.clone(), record))
    });
    if let Some((placement, record)) = found {
        placement.on_child_visibility(&record, visible);
    }
}

/// Forward a change of the container's own property to its strategy.
pub fn notify_property(container: usize, name: &str, value: &Value) {
    if let Ok(placement) = placement_of(container) {
        placement.on_property(name, value);
    }
}

/// Raise an event on every child, in order.
///
/// The name is validated first; an unknown name fails without reaching any
/// child. Children are snapshotted before the first handler runs, and each
/// child's handlers finish (including any suspension) before the next child
/// starts.
pub async fn raise_event_on_children(container: usize, name: &str, params: PropertyMap) -> Result<()> {
    events::validate_event_name(name)?;
    if !is_container(container) {
        return Err(ComponentError::NotAContainer(container));
    }

    let children = get_components(container);
    tracing::debug!("raise '{}' on {} children of {}", name, children.len(), container);
    for child in children {
        events::dispatch(child, name, params.clone()).await;
    }
    Ok(())
}

// =============================================================================
// Container capability
// =============================================================================

/// Capability implemented by every component type that holds children.
pub trait Container {
    /// Component index of the container.
    fn index(&self) -> usize;

    fn add_component(&self, child: usize, layout: LayoutProperties) -> Result<()> {
        add_component(self.index(), child, layout)
    }

    fn get_components(&self) -> Vec<usize> {
        get_components(self.index())
    }

    fn clear(&self) {
        clear(self.index())
    }

    fn has_components(&self) -> bool {
        has_components(self.index())
    }

    fn raise_event_on_children<'a>(
        &'a self,
        name: &'a str,
        params: PropertyMap,
    ) -> impl Future<Output = Result<()>> + 'a {
        raise_event_on_children(self.index(), name, params)
    }

    fn serialize(&self) -> Result<SerializedComponent> {
        serialize(self.index())
    }

    fn destroy(&self) {
        component::destroy_component(self.index())
    }
}

/// Reset container state (for testing).
pub fn reset_containers() {
    CONTAINERS.with(|containers| containers.borrow_mut().clear());
}
