//! Mount API - Opening a form on the page.
//!
//! Exactly one form is open at a time. Mounting marks the form top-level (it
//! can no longer be added to a container), propagates page notifications
//! through its tree and raises `show`. Unmounting reverses this.
//!
//! # Example
//!
//! ```ignore
//! use spark_panels::pipeline::mount;
//! use spark_panels::panels::Form;
//!
//! let form = Form::new(Some("main"))?;
//! let handle = block_on(mount::mount(form.index()))?;
//!
//! // Later
//! block_on(handle.unmount());
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::component;
use crate::engine::arrays::core;
use crate::engine::on_destroy;
use crate::error::{ComponentError, Result};

use super::page::{self, PageEvent};

thread_local! {
    static OPEN_FORM: Cell<Option<usize>> = const { Cell::new(None) };

    /// Forms that already carry the destroy hook clearing `OPEN_FORM`.
    static DESTROY_HOOKED: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by `mount()` that allows unmounting.
#[derive(Debug)]
#[must_use = "dropping the handle leaves the form mounted"]
pub struct MountHandle {
    form: usize,
}

impl MountHandle {
    pub fn form(&self) -> usize {
        self.form
    }

    /// Take the form off the page.
    ///
    /// Propagates `Removed`, raises `hide` and clears the top-level flag. A
    /// form that was already replaced by another mount is left alone.
    pub async fn unmount(self) {
        if OPEN_FORM.with(Cell::get) != Some(self.form) {
            return;
        }
        close(self.form).await;
    }
}

async fn close(form: usize) {
    page::notify(form, PageEvent::Removed);
    page::raise_visibility_event(form, "hide").await;
    core::set_top_level(form, false);
    OPEN_FORM.with(|open| open.set(None));
    tracing::debug!("unmounted form {}", form);
}

// =============================================================================
// Mount Function
// =============================================================================

/// Open `form` on the page, replacing the form currently open.
///
/// The form must be a component without a parent. Any container type may be
/// opened; forms are the usual choice.
pub async fn mount(form: usize) -> Result<MountHandle> {
    if !component::is_component(form) {
        return Err(ComponentError::NotAComponent(form));
    }
    if !component::component_type(form).is_container() {
        return Err(ComponentError::NotAContainer(form));
    }
    if let Some(parent) = core::get_parent_index(form) {
        return Err(ComponentError::AlreadyParented { child: form, parent });
    }

    if let Some(previous) = OPEN_FORM.with(Cell::get) {
        if previous != form {
            close(previous).await;
        }
    }

    OPEN_FORM.with(|open| open.set(Some(form)));
    if DESTROY_HOOKED.with(|hooked| hooked.borrow_mut().insert(form)) {
        on_destroy(form, move || {
            DESTROY_HOOKED.with(|hooked| hooked.borrow_mut().remove(&form));
            OPEN_FORM.with(|open| {
                if open.get() == Some(form) {
                    open.set(None);
                }
            });
        });
    }
    core::set_top_level(form, true);
    page::notify(form, PageEvent::Added);
    page::notify(form, PageEvent::Shown);
    page::raise_visibility_event(form, "show").await;

    tracing::debug!(
        "mounted {} {} ({} components on page)",
        component::component_type(form),
        form,
        page::subtree(form).len()
    );
    Ok(MountHandle { form })
}

/// The form currently open, if any.
pub fn open_form() -> Option<usize> {
    OPEN_FORM.with(Cell::get)
}

pub fn is_open_form(index: usize) -> bool {
    open_form() == Some(index)
}

/// Forget the open form (for testing).
pub fn reset_mount_state() {
    OPEN_FORM.with(|open| open.set(None));
    DESTROY_HOOKED.with(|hooked| hooked.borrow_mut().clear());
}
