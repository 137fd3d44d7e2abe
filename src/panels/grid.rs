//! GridPanel - named rows with per-breakpoint column math.
//!
//! Rows are created on first reference and appended at the bottom; they are
//! never reordered. Within a row every breakpoint keeps a column cursor:
//!
//! ```text
//! width  = width_<bp> or grid_columns (12)
//! offset = col_<bp> - cursor   if col_<bp> > cursor, else 0
//! cursor = cursor + offset + width
//! ```
//!
//! The column element gets `col-<bp>-<width>` and, for a positive offset,
//! `col-<bp>-offset-<offset>`. Children of one row must be added left to
//! right. A row is deleted when its last child leaves. `width_<bp>` must lie
//! in `1..=grid_columns` and `col_<bp>` may not exceed `grid_columns`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::component::create_component;
use crate::config;
use crate::container::{register_container, ChildRecord, Placed, Placement};
use crate::engine::arrays::core;
use crate::engine::{
    add_class, append_child, create_element, destroy_element, on_destroy, set_flag, update_style,
    Direction, ElementFlags, ElementId,
};
use crate::error::{ComponentError, Result};
use crate::types::{Breakpoint, ComponentType, Dimension, LayoutProperties};

use super::panel_handle;

// =============================================================================
// State
// =============================================================================

#[derive(Debug)]
struct GridRow {
    element: ElementId,
    /// Column cursor per breakpoint, in `Breakpoint::ALL` order.
    cursors: [u32; 4],
    count: usize,
}

#[derive(Debug, Default)]
struct GridState {
    rows: IndexMap<String, GridRow>,
    /// Row name per child component.
    child_rows: HashMap<usize, String>,
    next_anonymous: usize,
}

/// Column request for one breakpoint, parsed before any mutation.
#[derive(Debug, Clone, Copy)]
struct ColumnRequest {
    width: u32,
    col: Option<u32>,
}

struct GridPlacement {
    root: ElementId,
    state: RefCell<GridState>,
}

thread_local! {
    static GRIDS: RefCell<HashMap<usize, Rc<GridPlacement>>> = RefCell::new(HashMap::new());
}

fn parse_columns(layout: &LayoutProperties, columns: u32) -> Result<[ColumnRequest; 4]> {
    let mut requests = [ColumnRequest { width: columns, col: None }; 4];
    for (request, bp) in requests.iter_mut().zip(Breakpoint::ALL) {
        let width_key = format!("width_{}", bp.suffix());
        if let Some(width) = layout.get_u32(&width_key)? {
            if width == 0 || width > columns {
                return Err(ComponentError::InvalidLayout {
                    key: width_key,
                    reason: format!("width must be between 1 and {}", columns),
                });
            }
            request.width = width;
        }
        let col_key = format!("col_{}", bp.suffix());
        if let Some(col) = layout.get_u32(&col_key)? {
            if col > columns {
                return Err(ComponentError::InvalidLayout {
                    key: col_key,
                    reason: format!("col must be at most {}", columns),
                });
            }
            request.col = Some(col);
        }
    }
    Ok(requests)
}

impl GridPlacement {
    fn row_element(&self, state: &mut GridState, name: &str, full_width: bool) -> ElementId {
        if let Some(row) = state.rows.get(name) {
            return row.element;
        }
        let element = create_element("div");
        set_flag(element, ElementFlags::ROW, true);
        if full_width {
            set_flag(element, ElementFlags::FULL_WIDTH, true);
        }
        update_style(element, |s| {
            s.direction = Direction::Row;
            s.wrap = true;
        });
        append_child(self.root, element);
        state.rows.insert(
            name.to_string(),
            GridRow {
                element,
                cursors: [0; 4],
                count: 0,
            },
        );
        tracing::trace!("grid row '{}' created", name);
        element
    }

    fn anonymous_row(state: &mut GridState) -> String {
        loop {
            let name = format!("anon-{}", state.next_anonymous);
            state.next_anonymous += 1;
            if !state.rows.contains_key(&name) {
                return name;
            }
        }
    }
}

impl Placement for GridPlacement {
    fn holder(&self) -> ElementId {
        self.root
    }

    fn place(&self, _container: usize, child: usize, child_element: ElementId, layout: &LayoutProperties) -> Result<Placed> {
        let columns = config::grid_columns();
        let requests = parse_columns(layout, columns)?;
        let row_name = layout.get_str("row")?;
        let full_width = layout.get_bool("full_width_row")?;
        let active = Breakpoint::for_width(config::viewport_width());

        let mut state = self.state.borrow_mut();
        let name = match row_name {
            Some(name) => name,
            None => Self::anonymous_row(&mut state),
        };
        let row_element = self.row_element(&mut state, &name, full_width);

        let column = create_element("div");
        set_flag(column, ElementFlags::COLUMN, true);

        let Some(row) = state.rows.get_mut(&name) else {
            destroy_element(column);
            return Ok(Placed::default());
        };
        for (i, (bp, request)) in Breakpoint::ALL.into_iter().zip(requests).enumerate() {
            let cursor = row.cursors[i];
            let offset = match request.col {
                Some(col) if col > cursor => col - cursor,
                _ => 0,
            };
            row.cursors[i] = cursor.saturating_add(offset).saturating_add(request.width);

            add_class(column, format!("col-{}-{}", bp.suffix(), request.width));
            if offset > 0 {
                add_class(column, format!("col-{}-offset-{}", bp.suffix(), offset));
            }
            if bp == active {
                let total = columns.max(1) as f32;
                update_style(column, |s| {
                    s.width = Dimension::Percent(request.width as f32 * 100.0 / total);
                    if offset > 0 {
                        s.margin_left = Dimension::Percent(offset as f32 * 100.0 / total);
                    }
                });
            }
        }
        row.count += 1;
        state.child_rows.insert(child, name);

        append_child(column, child_element);
        append_child(row_element, column);

        Ok(Placed { slot: Some(column), index: None })
    }

    fn after_remove(&self, _container: usize, record: &ChildRecord) {
        let mut state = self.state.borrow_mut();
        let Some(name) = state.child_rows.remove(&record.component) else {
            return;
        };
        let Some(row) = state.rows.get_mut(&name) else {
            return;
        };
        row.count = row.count.saturating_sub(1);
        if row.count == 0 {
            let element = row.element;
            state.rows.shift_remove(&name);
            destroy_element(element);
            tracing::trace!("grid row '{}' deleted", name);
        }
    }

    fn reset(&self, _container: usize) {
        let mut state = self.state.borrow_mut();
        for (_, row) in state.rows.drain(..) {
            destroy_element(row.element);
        }
        state.child_rows.clear();
        state.next_anonymous = 0;
    }
}

// =============================================================================
// Panel
// =============================================================================

/// Container that places children in named rows of breakpoint columns.
///
/// Layout keys: `row`, `full_width_row`, `col_<bp>`, `width_<bp>` for
/// `bp` in `xs|sm|md|lg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPanel {
    index: usize,
}

impl GridPanel {
    pub fn new(id: Option<&str>) -> Result<Self> {
        let index = create_component(ComponentType::GridPanel, id)?;
        let Some(root) = core::get_root_element(index) else {
            return Ok(Self { index });
        };

        let placement = Rc::new(GridPlacement {
            root,
            state: RefCell::new(GridState::default()),
        });
        GRIDS.with(|grids| grids.borrow_mut().insert(index, placement.clone()));
        on_destroy(index, move || {
            GRIDS.with(|grids| {
                grids.borrow_mut().remove(&index);
            });
        });
        register_container(index, placement);
        Ok(Self { index })
    }

    fn with_state<R>(&self, f: impl FnOnce(&GridState) -> R) -> Option<R> {
        let placement = GRIDS.with(|grids| grids.borrow().get(&self.index).cloned())?;
        let state = placement.state.borrow();
        Some(f(&state))
    }

    /// Row names in display order.
    pub fn rows(&self) -> Vec<String> {
        self.with_state(|s| s.rows.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Column cursor of a row at a breakpoint.
    pub fn row_cursor(&self, row: &str, breakpoint: Breakpoint) -> Option<u32> {
        let slot = Breakpoint::ALL.iter().position(|bp| *bp == breakpoint)?;
        self.with_state(|s| s.rows.get(row).map(|r| r.cursors[slot]))
            .flatten()
    }

    /// Element of a named row.
    pub fn row_element(&self, row: &str) -> Option<ElementId> {
        self.with_state(|s| s.rows.get(row).map(|r| r.element))
            .flatten()
    }
}

panel_handle!(GridPanel, ComponentType::GridPanel);

/// Reset grid lookups (for testing).
pub(crate) fn reset_grids() {
    GRIDS.with(|grids| grids.borrow_mut().clear());
}
