//! Page pipeline
//!
//! Connects a component tree to the page:
//!
//! ```text
//! mount(form) → top-level flag → page::notify(Added, Shown) → raise "show"
//! add_component(on-page container, child) → page::notify(child, Added, Shown)
//! remove_from_parent(child) → page::notify(child, Removed)
//! ```

pub mod mount;
pub mod page;

pub use mount::{is_open_form, mount, open_form, MountHandle};
pub use page::{is_on_page, notify, on_page_event, raise_visibility_event, PageEvent};
