//! Element Registry - Arena of elements and their tree structure.
//!
//! Elements are slots in a thread-local arena with a free list for reuse.
//! Insertion and removal keep `parent` and `children` in agreement, so an
//! element is under at most one parent at any time.

use std::cell::RefCell;

use super::element::{Element, ElementFlags, ElementId, ElementStyle};

// =============================================================================
// Registry State
// =============================================================================

struct ElementArena {
    slots: Vec<Option<Element>>,
    free: Vec<ElementId>,
}

thread_local! {
    static ELEMENTS: RefCell<ElementArena> = const {
        RefCell::new(ElementArena { slots: Vec::new(), free: Vec::new() })
    };
}

// =============================================================================
// Element Lifecycle
// =============================================================================

/// Create a detached element.
pub fn create_element(tag: &'static str) -> ElementId {
    ELEMENTS.with(|arena| {
        let mut arena = arena.borrow_mut();
        let element = Element::new(tag);
        if let Some(id) = arena.free.pop() {
            arena.slots[id] = Some(element);
            id
        } else {
            arena.slots.push(Some(element));
            arena.slots.len() - 1
        }
    })
}

/// Destroy an element and its whole subtree, detaching it from its parent.
pub fn destroy_element(id: ElementId) {
    detach_element(id);

    ELEMENTS.with(|arena| {
        let mut arena = arena.borrow_mut();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(element) = arena.slots.get_mut(current).and_then(Option::take) else {
                continue;
            };
            stack.extend(element.children);
            arena.free.push(current);
        }
    });
}

pub fn element_exists(id: ElementId) -> bool {
    ELEMENTS.with(|arena| matches!(arena.borrow().slots.get(id), Some(Some(_))))
}

/// Number of live elements.
pub fn element_count() -> usize {
    ELEMENTS.with(|arena| arena.borrow().slots.iter().filter(|s| s.is_some()).count())
}

// =============================================================================
// Tree Structure
// =============================================================================

/// Append `child` as the last child of `parent`.
pub fn append_child(parent: ElementId, child: ElementId) {
    insert_child(parent, child, None);
}

/// Insert `child` under `parent` before the child at `index`.
///
/// A missing or out-of-range index appends. The child is detached from any
/// previous parent first.
pub fn insert_child(parent: ElementId, child: ElementId, index: Option<usize>) {
    if parent == child {
        return;
    }
    detach_element(child);

    ELEMENTS.with(|arena| {
        let mut arena = arena.borrow_mut();
        if !matches!(arena.slots.get(child), Some(Some(_))) {
            return;
        }
        let Some(Some(p)) = arena.slots.get_mut(parent) else {
            return;
        };
        match index {
            Some(i) if i < p.children.len() => p.children.insert(i, child),
            _ => p.children.push(child),
        }
        if let Some(Some(c)) = arena.slots.get_mut(child) {
            c.parent = Some(parent);
        }
    });
}

/// Remove an element from its parent. The element itself stays alive.
pub fn detach_element(id: ElementId) {
    ELEMENTS.with(|arena| {
        let mut arena = arena.borrow_mut();
        let Some(Some(element)) = arena.slots.get_mut(id) else {
            return;
        };
        let Some(parent) = element.parent.take() else {
            return;
        };
        if let Some(Some(p)) = arena.slots.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
    });
}

pub fn children(id: ElementId) -> Vec<ElementId> {
    with_element(id, |e| e.children.clone()).unwrap_or_default()
}

pub fn parent_element(id: ElementId) -> Option<ElementId> {
    with_element(id, |e| e.parent).flatten()
}

// =============================================================================
// Access
// =============================================================================

/// Read an element.
pub fn with_element<R>(id: ElementId, f: impl FnOnce(&Element) -> R) -> Option<R> {
    ELEMENTS.with(|arena| arena.borrow().slots.get(id).and_then(Option::as_ref).map(f))
}

/// Mutate an element's non-structural state.
///
/// Tree links must go through `insert_child` / `detach_element`.
pub fn with_element_mut<R>(id: ElementId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
    ELEMENTS.with(|arena| {
        arena
            .borrow_mut()
            .slots
            .get_mut(id)
            .and_then(Option::as_mut)
            .map(f)
    })
}

pub fn set_flag(id: ElementId, flag: ElementFlags, on: bool) {
    with_element_mut(id, |e| e.flags.set(flag, on));
}

pub fn has_flag(id: ElementId, flag: ElementFlags) -> bool {
    with_element(id, |e| e.flags.contains(flag)).unwrap_or(false)
}

pub fn add_class(id: ElementId, class: impl Into<String>) {
    let class = class.into();
    with_element_mut(id, |e| {
        if !e.has_class(&class) {
            e.classes.push(class);
        }
    });
}

pub fn classes(id: ElementId) -> Vec<String> {
    with_element(id, |e| e.classes.clone()).unwrap_or_default()
}

pub fn update_style(id: ElementId, f: impl FnOnce(&mut ElementStyle)) {
    with_element_mut(id, |e| f(&mut e.style));
}

pub fn style(id: ElementId) -> Option<ElementStyle> {
    with_element(id, |e| e.style.clone())
}

/// Reset the arena (for testing).
pub fn reset_elements() {
    ELEMENTS.with(|arena| {
        let mut arena = arena.borrow_mut();
        arena.slots.clear();
        arena.free.clear();
    });
}
