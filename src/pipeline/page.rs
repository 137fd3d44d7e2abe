//! Page-visibility propagation.
//!
//! A component tree learns that it joined the page, became visible on it, or
//! left it through [`notify`], which walks the tree pre-order in child order.
//! Components subscribe with [`on_page_event`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::container;
use crate::engine::arrays::core;
use crate::state::events;
use crate::types::PropertyMap;

/// Page lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEvent {
    /// Attached to the page.
    Added,
    /// Shown on the page.
    Shown,
    /// Detached from the page.
    Removed,
}

type PageHook = Rc<dyn Fn(PageEvent)>;

struct HookRegistry {
    hooks: HashMap<usize, Vec<(usize, PageHook)>>,
    next_id: usize,
}

thread_local! {
    static HOOKS: RefCell<HookRegistry> = RefCell::new(HookRegistry {
        hooks: HashMap::new(),
        next_id: 0,
    });
}

/// Subscribe to page notifications of one component.
/// Returns cleanup function.
pub fn on_page_event<F>(index: usize, hook: F) -> impl FnOnce()
where
    F: Fn(PageEvent) + 'static,
{
    let id = HOOKS.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.hooks.entry(index).or_default().push((id, Rc::new(hook)));
        id
    });

    move || {
        HOOKS.with(|reg| {
            if let Some(list) = reg.borrow_mut().hooks.get_mut(&index) {
                list.retain(|(hook_id, _)| *hook_id != id);
            }
        });
    }
}

/// Deliver `event` to a component and, in child order, its whole subtree.
pub fn notify(index: usize, event: PageEvent) {
    core::set_on_page(index, event != PageEvent::Removed);

    let hooks: Vec<PageHook> = HOOKS.with(|reg| {
        reg.borrow()
            .hooks
            .get(&index)
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    });
    for hook in hooks {
        hook(event);
    }

    for child in container::get_components(index) {
        notify(child, event);
    }
}

pub fn is_on_page(index: usize) -> bool {
    core::get_on_page(index)
}

/// The component and its descendants, pre-order.
pub fn subtree(index: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![index];
    while let Some(current) = stack.pop() {
        out.push(current);
        let children = container::get_components(current);
        stack.extend(children.into_iter().rev());
    }
    out
}

/// Raise `show` or `hide` on a component and every descendant, pre-order.
///
/// The tree is snapshotted first; handlers run one after another.
pub async fn raise_visibility_event(index: usize, name: &str) {
    let targets = subtree(index);
    tracing::debug!("raise '{}' on {} components", name, targets.len());
    for target in targets {
        events::dispatch(target, name, PropertyMap::new()).await;
    }
}

/// Drop the hooks of a component (called on destroy).
pub fn cleanup_index(index: usize) {
    HOOKS.with(|reg| {
        reg.borrow_mut().hooks.remove(&index);
    });
}

/// Reset all hook state (for testing).
pub fn reset_page_state() {
    HOOKS.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.hooks.clear();
        reg.next_id = 0;
    });
}
