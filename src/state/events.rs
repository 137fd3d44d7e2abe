//! Events Module - Event names, handler registry and raising.
//!
//! Every documented event has a fixed parameter list. Component types declare
//! which documented events they emit; application-defined events are accepted
//! anywhere as long as they carry the custom prefix (`x-` by default).
//!
//! Handlers return futures so that a handler may suspend. Raising an event
//! awaits handlers one after another, never concurrently.
//!
//! # Example
//!
//! ```ignore
//! use spark_panels::state::events::{self, handler};
//!
//! events::set_event_handler(button, "click", handler(|args| {
//!     println!("clicked {}", args.sender);
//! }))?;
//!
//! futures::executor::block_on(events::raise_event(button, "click", Default::default()))?;
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use indexmap::IndexMap;

use crate::config;
use crate::engine::{arrays::core, is_allocated};
use crate::error::{ComponentError, Result};
use crate::types::{ComponentType, PropertyMap};

// =============================================================================
// TYPES
// =============================================================================

/// A documented event and the parameters it is raised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDescriptor {
    pub name: &'static str,
    pub params: &'static [&'static str],
}

/// Arguments passed to an event handler.
#[derive(Debug, Clone, PartialEq)]
pub struct EventArgs {
    pub event_name: String,
    /// Component the event was raised on.
    pub sender: usize,
    pub params: PropertyMap,
}

/// Event handler (Rc for shared ownership in closures).
///
/// The returned future is awaited before the next handler runs.
pub type EventHandler = Rc<dyn Fn(EventArgs) -> LocalBoxFuture<'static, ()>>;

/// Handle returned by `add_event_handler`, used to remove one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

/// Wrap a synchronous closure as an event handler.
pub fn handler<F>(f: F) -> EventHandler
where
    F: Fn(&EventArgs) + 'static,
{
    Rc::new(move |args: EventArgs| {
        f(&args);
        futures::future::ready(()).boxed_local()
    })
}

/// Wrap an async closure as an event handler.
pub fn async_handler<F, Fut>(f: F) -> EventHandler
where
    F: Fn(EventArgs) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    Rc::new(move |args: EventArgs| f(args).boxed_local())
}

// =============================================================================
// EVENT TABLES
// =============================================================================

/// Every documented event.
pub const KNOWN_EVENTS: &[EventDescriptor] = &[
    EventDescriptor { name: "show", params: &[] },
    EventDescriptor { name: "hide", params: &[] },
    EventDescriptor { name: "click", params: &["keys"] },
    EventDescriptor { name: "change", params: &[] },
    EventDescriptor { name: "pressed_enter", params: &[] },
    EventDescriptor { name: "focus", params: &[] },
    EventDescriptor { name: "lost_focus", params: &[] },
    EventDescriptor { name: "tick", params: &[] },
    EventDescriptor { name: "shape_grab", params: &["shape", "x", "y"] },
    EventDescriptor { name: "shape_drag", params: &["shape", "x", "y"] },
    EventDescriptor { name: "shape_drop", params: &["shape", "x", "y"] },
    EventDescriptor { name: "shape_click", params: &["shape", "x", "y"] },
    EventDescriptor { name: "state_change", params: &["state"] },
];

/// Events every component emits.
const UNIVERSAL_EVENTS: &[&str] = &["show", "hide"];

/// Events specific to a component type (in addition to the universal ones).
pub fn type_events(component_type: ComponentType) -> &'static [&'static str] {
    match component_type {
        ComponentType::Button => &["click"],
        ComponentType::CheckBox => &["change"],
        ComponentType::TextBox => &["change", "pressed_enter", "focus", "lost_focus"],
        ComponentType::Timer => &["tick"],
        ComponentType::XYPanel => &["shape_grab", "shape_drag", "shape_drop", "shape_click"],
        ComponentType::Form => &["state_change"],
        _ => &[],
    }
}

/// Look up a documented event.
pub fn descriptor(name: &str) -> Option<&'static EventDescriptor> {
    KNOWN_EVENTS.iter().find(|d| d.name == name)
}

fn is_custom(name: &str) -> bool {
    let prefix = config::custom_event_prefix();
    name.len() > prefix.len() && name.starts_with(&prefix)
}

fn unknown_event(name: &str) -> ComponentError {
    ComponentError::UnknownEvent(name.to_string(), config::custom_event_prefix())
}

/// Validate a name against all documented events or the custom prefix.
pub fn validate_event_name(name: &str) -> Result<()> {
    if descriptor(name).is_some() || is_custom(name) {
        Ok(())
    } else {
        Err(unknown_event(name))
    }
}

/// Validate a name against what a specific component type emits.
pub fn validate_event_for(component_type: ComponentType, name: &str) -> Result<()> {
    if UNIVERSAL_EVENTS.contains(&name) || type_events(component_type).contains(&name) || is_custom(name) {
        Ok(())
    } else {
        Err(unknown_event(name))
    }
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    handlers: HashMap<usize, IndexMap<String, Vec<(HandlerId, EventHandler)>>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> HandlerId {
        let id = self.next_id;
        self.next_id += 1;
        HandlerId(id)
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

fn checked_type(index: usize) -> Result<ComponentType> {
    if !is_allocated(index) {
        return Err(ComponentError::NotAComponent(index));
    }
    Ok(core::get_component_type(index))
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Replace all handlers for `name` on a component with a single handler.
pub fn set_event_handler(index: usize, name: &str, handler: EventHandler) -> Result<()> {
    validate_event_for(checked_type(index)?, name)?;
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.handlers
            .entry(index)
            .or_default()
            .insert(name.to_string(), vec![(id, handler)]);
    });
    Ok(())
}

/// Add a handler for `name`, after any existing ones.
pub fn add_event_handler(index: usize, name: &str, handler: EventHandler) -> Result<HandlerId> {
    validate_event_for(checked_type(index)?, name)?;
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.handlers
            .entry(index)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push((id, handler));
        id
    });
    Ok(id)
}

/// Remove one handler (`Some(id)`) or every handler (`None`) for `name`.
pub fn remove_event_handler(index: usize, name: &str, id: Option<HandlerId>) {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let Some(events) = reg.handlers.get_mut(&index) else {
            return;
        };
        match id {
            Some(id) => {
                if let Some(list) = events.get_mut(name) {
                    list.retain(|(handler_id, _)| *handler_id != id);
                    if list.is_empty() {
                        events.shift_remove(name);
                    }
                }
            }
            None => {
                events.shift_remove(name);
            }
        }
    });
}

/// Number of handlers registered for `name` on a component.
pub fn handler_count(index: usize, name: &str) -> usize {
    REGISTRY.with(|reg| {
        reg.borrow()
            .handlers
            .get(&index)
            .and_then(|events| events.get(name))
            .map_or(0, Vec::len)
    })
}

fn snapshot_handlers(index: usize, name: &str) -> Vec<EventHandler> {
    REGISTRY.with(|reg| {
        reg.borrow()
            .handlers
            .get(&index)
            .and_then(|events| events.get(name))
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    })
}

/// Raise an event on one component.
///
/// The name is validated against the component's type before any handler
/// runs. Handlers are snapshotted up front and awaited in registration order.
pub async fn raise_event(index: usize, name: &str, params: PropertyMap) -> Result<()> {
    validate_event_for(checked_type(index)?, name)?;
    dispatch(index, name, params).await;
    Ok(())
}

/// Run handlers without validation (the caller has validated the name).
pub(crate) async fn dispatch(index: usize, name: &str, params: PropertyMap) {
    let handlers = snapshot_handlers(index, name);
    if handlers.is_empty() {
        return;
    }
    tracing::trace!("dispatch '{}' to {} ({} handlers)", name, index, handlers.len());
    for handler in handlers {
        handler(EventArgs {
            event_name: name.to_string(),
            sender: index,
            params: params.clone(),
        })
        .await;
    }
}

/// Drop all handlers for a component (called on destroy).
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().handlers.remove(&index);
    });
}

/// Reset all handler state (for testing).
pub fn reset_events_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = HandlerRegistry::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};
    use futures::executor::block_on;
    use std::cell::Cell;

    fn make(component_type: ComponentType) -> usize {
        let index = allocate_index(None);
        core::set_component_type(index, component_type);
        index
    }

    #[test]
    fn test_validate_event_name() {
        assert!(validate_event_name("click").is_ok());
        assert!(validate_event_name("shape_drop").is_ok());
        assert!(validate_event_name("x-refresh").is_ok());
        assert!(validate_event_name("x-").is_err());
        assert!(matches!(
            validate_event_name("refresh"),
            Err(ComponentError::UnknownEvent(..))
        ));
    }

    #[test]
    fn test_validate_event_for_type() {
        assert!(validate_event_for(ComponentType::Button, "click").is_ok());
        assert!(validate_event_for(ComponentType::Label, "show").is_ok());
        assert!(validate_event_for(ComponentType::Label, "click").is_err());
        assert!(validate_event_for(ComponentType::Label, "x-ping").is_ok());
    }

    #[test]
    fn test_raise_runs_handlers_in_order() {
        reset_registry();
        reset_events_state();

        let button = make(ComponentType::Button);
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = log.clone();
        add_event_handler(button, "click", handler(move |_| first.borrow_mut().push(1))).unwrap();
        let second = log.clone();
        add_event_handler(button, "click", handler(move |args| {
            assert_eq!(args.event_name, "click");
            second.borrow_mut().push(2);
        }))
        .unwrap();

        block_on(raise_event(button, "click", PropertyMap::new())).unwrap();
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_set_replaces_and_remove() {
        reset_registry();
        reset_events_state();

        let button = make(ComponentType::Button);
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let id = add_event_handler(button, "click", handler(move |_| c.set(c.get() + 1))).unwrap();
        let c = count.clone();
        set_event_handler(button, "click", handler(move |_| c.set(c.get() + 10))).unwrap();
        assert_eq!(handler_count(button, "click"), 1);

        // Old id no longer registered; removing it is a no-op
        remove_event_handler(button, "click", Some(id));
        block_on(raise_event(button, "click", PropertyMap::new())).unwrap();
        assert_eq!(count.get(), 10);

        remove_event_handler(button, "click", None);
        assert_eq!(handler_count(button, "click"), 0);
    }

    #[test]
    fn test_unknown_event_rejected() {
        reset_registry();
        reset_events_state();

        let label = make(ComponentType::Label);
        assert!(set_event_handler(label, "tick", handler(|_| {})).is_err());
        assert!(block_on(raise_event(label, "tick", PropertyMap::new())).is_err());
        assert!(matches!(
            block_on(raise_event(999, "show", PropertyMap::new())),
            Err(ComponentError::NotAComponent(999))
        ));
    }
}
