//! Labels, buttons, check boxes and text boxes.
//!
//! # Example
//!
//! ```ignore
//! use spark_panels::primitives::{check_box, set_checked};
//! use spark_panels::state::events::{set_event_handler, handler};
//!
//! let agree = check_box(Some("agree"))?;
//! set_event_handler(agree, "change", handler(|args| println!("toggled {}", args.sender)))?;
//! block_on(set_checked(agree, true))?;
//! ```

use serde_json::{json, Value};

use crate::component::{create_component, get_property, set_property};
use crate::error::{ComponentError, Result};
use crate::state::events::raise_event;
use crate::types::{ComponentType, PropertyMap};

fn expect_type(index: usize, expected: ComponentType) -> Result<()> {
    let found = crate::component::component_type(index);
    if found != expected {
        return Err(ComponentError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

fn enabled(index: usize) -> Result<bool> {
    Ok(get_property(index, "enabled")?.as_bool().unwrap_or(true))
}

// =============================================================================
// Constructors
// =============================================================================

pub fn label(id: Option<&str>) -> Result<usize> {
    create_component(ComponentType::Label, id)
}

pub fn button(id: Option<&str>) -> Result<usize> {
    create_component(ComponentType::Button, id)
}

pub fn check_box(id: Option<&str>) -> Result<usize> {
    create_component(ComponentType::CheckBox, id)
}

pub fn text_box(id: Option<&str>) -> Result<usize> {
    create_component(ComponentType::TextBox, id)
}

// =============================================================================
// Interaction
// =============================================================================

/// Click a button. `keys` lists held modifier keys.
///
/// Disabled buttons ignore clicks; returns whether the event was raised.
pub async fn click(index: usize, keys: &[&str]) -> Result<bool> {
    expect_type(index, ComponentType::Button)?;
    if !enabled(index)? {
        return Ok(false);
    }
    let mut params = PropertyMap::new();
    let held: serde_json::Map<String, Value> = keys.iter().map(|k| (k.to_string(), Value::Bool(true))).collect();
    params.insert("keys".to_string(), Value::Object(held));
    raise_event(index, "click", params).await?;
    Ok(true)
}

/// Set a check box and raise `change` if the value changed.
pub async fn set_checked(index: usize, checked: bool) -> Result<()> {
    expect_type(index, ComponentType::CheckBox)?;
    let previous = get_property(index, "checked")?;
    set_property(index, "checked", checked)?;
    if previous != json!(checked) {
        raise_event(index, "change", PropertyMap::new()).await?;
    }
    Ok(())
}

/// Replace a text box's text and raise `change` if it differs.
pub async fn set_text(index: usize, text: &str) -> Result<()> {
    expect_type(index, ComponentType::TextBox)?;
    let previous = get_property(index, "text")?;
    set_property(index, "text", text)?;
    if previous.as_str() != Some(text) {
        raise_event(index, "change", PropertyMap::new()).await?;
    }
    Ok(())
}

pub async fn press_enter(index: usize) -> Result<()> {
    expect_type(index, ComponentType::TextBox)?;
    raise_event(index, "pressed_enter", PropertyMap::new()).await
}

pub async fn focus(index: usize) -> Result<()> {
    expect_type(index, ComponentType::TextBox)?;
    raise_event(index, "focus", PropertyMap::new()).await
}

pub async fn lost_focus(index: usize) -> Result<()> {
    expect_type(index, ComponentType::TextBox)?;
    raise_event(index, "lost_focus", PropertyMap::new()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reset_toolkit;
    use crate::state::events::{add_event_handler, handler};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_set_checked_raises_change_once() {
        reset_toolkit();

        let check = check_box(None).unwrap();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        add_event_handler(check, "change", handler(move |_| c.set(c.get() + 1))).unwrap();

        block_on(set_checked(check, true)).unwrap();
        block_on(set_checked(check, true)).unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(get_property(check, "checked").unwrap(), json!(true));
    }

    #[test]
    fn test_click_passes_keys() {
        reset_toolkit();

        let ok = button(None).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        add_event_handler(ok, "click", handler(move |args| {
            *s.borrow_mut() = args.params.get("keys").cloned();
        }))
        .unwrap();

        assert!(block_on(click(ok, &["shift"])).unwrap());
        assert_eq!(*seen.borrow(), Some(json!({ "shift": true })));
    }

    #[test]
    fn test_disabled_button_ignores_click() {
        reset_toolkit();

        let ok = button(None).unwrap();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        add_event_handler(ok, "click", handler(move |_| c.set(c.get() + 1))).unwrap();
        set_property(ok, "enabled", false).unwrap();

        assert!(!block_on(click(ok, &[])).unwrap());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_text_box_events() {
        reset_toolkit();

        let input = text_box(None).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["change", "pressed_enter", "focus", "lost_focus"] {
            let log = log.clone();
            add_event_handler(input, name, handler(move |args| log.borrow_mut().push(args.event_name.clone())))
                .unwrap();
        }

        block_on(async {
            focus(input).await.unwrap();
            set_text(input, "hello").await.unwrap();
            set_text(input, "hello").await.unwrap();
            press_enter(input).await.unwrap();
            lost_focus(input).await.unwrap();
        });
        assert_eq!(*log.borrow(), vec!["focus", "change", "pressed_enter", "lost_focus"]);
    }

    #[test]
    fn test_wrong_widget_type() {
        reset_toolkit();

        let text = label(None).unwrap();
        assert!(matches!(
            block_on(set_checked(text, true)),
            Err(ComponentError::TypeMismatch { .. })
        ));
    }
}
