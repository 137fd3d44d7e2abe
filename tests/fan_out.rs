//! Event fan-out and page propagation.
//!
//! Handlers may suspend; fan-out must stay sequential and work from a
//! snapshot of the child list.
//!
//! Run with: cargo test --test fan_out

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;

use spark_panels::container::{self, Container};
use spark_panels::panels::{FlowPanel, Form, LinearPanel};
use spark_panels::pipeline::{self, PageEvent};
use spark_panels::primitives;
use spark_panels::state::events::{add_event_handler, async_handler, handler, handler_count};
use spark_panels::{reset_toolkit, ComponentError, LayoutProperties, PropertyMap};

type Log = Rc<RefCell<Vec<String>>>;

fn logging(log: &Log, tag: &str) -> spark_panels::EventHandler {
    let log = log.clone();
    let tag = tag.to_string();
    handler(move |args| log.borrow_mut().push(format!("{}:{}", tag, args.event_name)))
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn unknown_event_fails_without_fan_out() {
    reset_toolkit();

    let panel = FlowPanel::new(None).unwrap();
    let label = primitives::label(None).unwrap();
    panel.add_component(label, LayoutProperties::new()).unwrap();

    let log: Log = Rc::default();
    add_event_handler(label, "x-refresh", logging(&log, "label")).unwrap();

    let result = block_on(panel.raise_event_on_children("refresh", PropertyMap::new()));
    assert!(matches!(result, Err(ComponentError::UnknownEvent(..))));
    assert!(log.borrow().is_empty());

    block_on(panel.raise_event_on_children("x-refresh", PropertyMap::new())).unwrap();
    assert_eq!(*log.borrow(), vec!["label:x-refresh"]);
}

#[test]
fn known_events_reach_every_child_in_order() {
    reset_toolkit();

    let panel = LinearPanel::new(None).unwrap();
    let log: Log = Rc::default();
    for tag in ["a", "b", "c"] {
        let child = primitives::label(None).unwrap();
        add_event_handler(child, "show", logging(&log, tag)).unwrap();
        panel.add_component(child, LayoutProperties::new()).unwrap();
    }

    block_on(panel.raise_event_on_children("show", PropertyMap::new())).unwrap();
    assert_eq!(*log.borrow(), vec!["a:show", "b:show", "c:show"]);
}

// =============================================================================
// SEQUENCING
// =============================================================================

#[test]
fn suspended_handler_delays_next_child() {
    reset_toolkit();

    let panel = FlowPanel::new(None).unwrap();
    let first = primitives::label(None).unwrap();
    let second = primitives::label(None).unwrap();
    panel.add_component(first, LayoutProperties::new()).unwrap();
    panel.add_component(second, LayoutProperties::new()).unwrap();

    let log: Log = Rc::default();
    let (release, wait) = oneshot::channel::<()>();
    let wait = Rc::new(RefCell::new(Some(wait)));

    let first_log = log.clone();
    add_event_handler(
        first,
        "x-load",
        async_handler(move |_| {
            let log = first_log.clone();
            let wait = wait.borrow_mut().take();
            async move {
                log.borrow_mut().push("first:start".to_string());
                if let Some(wait) = wait {
                    let _ = wait.await;
                }
                log.borrow_mut().push("first:end".to_string());
            }
        }),
    )
    .unwrap();
    add_event_handler(second, "x-load", logging(&log, "second")).unwrap();

    let mut pool = LocalPool::new();
    let index = panel.index();
    pool.spawner()
        .spawn_local(async move {
            container::raise_event_on_children(index, "x-load", PropertyMap::new())
                .await
                .unwrap();
        })
        .unwrap();

    pool.run_until_stalled();
    assert_eq!(*log.borrow(), vec!["first:start"]);

    // Mutating the container while a handler is suspended is safe
    let third = primitives::label(None).unwrap();
    add_event_handler(third, "x-load", logging(&log, "third")).unwrap();
    panel.add_component(third, LayoutProperties::new()).unwrap();

    release.send(()).unwrap();
    pool.run_until_stalled();
    assert_eq!(*log.borrow(), vec!["first:start", "first:end", "second:x-load"]);
}

#[test]
fn handler_removing_sibling_uses_snapshot() {
    reset_toolkit();

    let panel = LinearPanel::new(None).unwrap();
    let first = primitives::label(None).unwrap();
    let second = primitives::label(None).unwrap();
    panel.add_component(first, LayoutProperties::new()).unwrap();
    panel.add_component(second, LayoutProperties::new()).unwrap();

    let log: Log = Rc::default();
    add_event_handler(
        first,
        "x-prune",
        handler(move |_| spark_panels::remove_from_parent(second)),
    )
    .unwrap();
    add_event_handler(second, "x-prune", logging(&log, "second")).unwrap();

    block_on(panel.raise_event_on_children("x-prune", PropertyMap::new())).unwrap();
    assert_eq!(panel.get_components(), vec![first]);
    assert_eq!(*log.borrow(), vec!["second:x-prune"]);
}

// =============================================================================
// PAGE PROPAGATION
// =============================================================================

#[test]
fn page_events_follow_tree_order() {
    reset_toolkit();

    let form = Form::new(None).unwrap();
    let panel = FlowPanel::new(None).unwrap();
    let a = primitives::label(None).unwrap();
    let b = primitives::button(None).unwrap();
    let c = primitives::timer(None).unwrap();
    panel.add_component(a, LayoutProperties::new()).unwrap();
    panel.add_component(b, LayoutProperties::new()).unwrap();
    form.add_component(panel.index(), LayoutProperties::new()).unwrap();
    form.add_component(c, LayoutProperties::new()).unwrap();

    let log: Rc<RefCell<Vec<(usize, PageEvent)>>> = Rc::default();
    for index in [form.index(), panel.index(), a, b, c] {
        let log = log.clone();
        let _cleanup = pipeline::on_page_event(index, move |event| log.borrow_mut().push((index, event)));
    }

    let handle = block_on(pipeline::mount(form.index())).unwrap();
    let order = [form.index(), panel.index(), a, b, c];
    let expected: Vec<_> = order
        .iter()
        .map(|&i| (i, PageEvent::Added))
        .chain(order.iter().map(|&i| (i, PageEvent::Shown)))
        .collect();
    assert_eq!(*log.borrow(), expected);

    log.borrow_mut().clear();
    block_on(handle.unmount());
    let removed: Vec<_> = order.iter().map(|&i| (i, PageEvent::Removed)).collect();
    assert_eq!(*log.borrow(), removed);
}

#[test]
fn late_child_of_mounted_form_is_notified() {
    reset_toolkit();

    let form = Form::new(None).unwrap();
    let _handle = block_on(pipeline::mount(form.index())).unwrap();

    let panel = LinearPanel::new(None).unwrap();
    let label = primitives::label(None).unwrap();
    panel.add_component(label, LayoutProperties::new()).unwrap();
    assert!(!pipeline::is_on_page(label));

    form.add_component(panel.index(), LayoutProperties::new()).unwrap();
    assert!(pipeline::is_on_page(panel.index()));
    assert!(pipeline::is_on_page(label));

    spark_panels::remove_from_parent(panel.index());
    assert!(!pipeline::is_on_page(label));
}

#[test]
fn destroyed_components_drop_their_handlers() {
    reset_toolkit();

    let panel = FlowPanel::new(None).unwrap();
    let label = primitives::label(None).unwrap();
    panel.add_component(label, LayoutProperties::new()).unwrap();
    add_event_handler(label, "show", handler(|_| {})).unwrap();
    assert_eq!(handler_count(label, "show"), 1);

    panel.destroy();
    assert_eq!(handler_count(label, "show"), 0);
}
