//! Leaf widgets.
//!
//! - [`label`] - static text
//! - [`button`] - raises `click`
//! - [`check_box`] - raises `change` when toggled
//! - [`text_box`] - single-line input; `change`, `pressed_enter`, `focus`, `lost_focus`
//! - [`timer`] - invisible; raises `tick`
//!
//! # Architecture
//!
//! Widgets are indices into the parallel arrays like every component. Each
//! constructor creates the component and returns its index; interaction
//! helpers update properties and raise the matching event, awaiting the
//! handlers in order.

mod input;
mod timer;

pub use input::{
    button, check_box, click, focus, label, lost_focus, press_enter, set_checked, set_text,
    text_box,
};
pub use timer::{fire_tick, timer};
