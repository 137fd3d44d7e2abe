//! Element - One node of the element tree a component controls.
//!
//! Every component owns a root element; panels create additional wrapper
//! elements (flow items, list items, grid rows and columns, XY holders).
//! Elements carry just enough styling for the layout engine to compute
//! rendered sizes.

use crate::types::Dimension;

/// Stable handle into the element arena.
pub type ElementId = usize;

bitflags::bitflags! {
    /// State classes on an element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u16 {
        const NONE = 0;
        /// Container currently holds at least one child.
        const HAS_COMPONENTS = 1 << 0;
        /// Not displayed; takes no space.
        const HIDDEN = 1 << 1;
        /// Flow item grows to fill the remaining line.
        const EXPAND = 1 << 2;
        /// Grid row.
        const ROW = 1 << 3;
        /// Grid column.
        const COLUMN = 1 << 4;
        /// Element that positioned children attach to.
        const HOLDER = 1 << 5;
        /// Flow panel item wrapper.
        const GUTTER_ITEM = 1 << 6;
        /// Linear panel list item wrapper.
        const LIST_ITEM = 1 << 7;
        /// Grid row spanning the full panel width.
        const FULL_WIDTH = 1 << 8;
    }
}

/// Main-axis direction for flex elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// Layout-relevant style of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub direction: Direction,
    pub wrap: bool,
    pub width: Dimension,
    pub height: Dimension,
    pub flex_grow: f32,
    pub gap: f32,
    pub margin_left: Dimension,
    /// Absolute position inside the nearest holder.
    pub absolute: bool,
    pub left: f32,
    pub top: f32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            direction: Direction::Column,
            wrap: false,
            width: Dimension::Auto,
            height: Dimension::Auto,
            flex_grow: 0.0,
            gap: 0.0,
            margin_left: Dimension::Auto,
            absolute: false,
            left: 0.0,
            top: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: &'static str,
    pub flags: ElementFlags,
    /// Dynamic classes such as `col-xs-6`.
    pub classes: Vec<String>,
    pub style: ElementStyle,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            flags: ElementFlags::empty(),
            classes: Vec::new(),
            style: ElementStyle::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
