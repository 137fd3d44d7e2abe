//! Layout output types.

use std::collections::HashMap;

use crate::engine::ElementId;

/// Position (relative to the parent element) and size of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Computed layout for an element subtree.
#[derive(Debug, Clone, Default)]
pub struct ComputedLayout {
    rects: HashMap<ElementId, LayoutRect>,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: ElementId, rect: LayoutRect) {
        self.rects.insert(element, rect);
    }

    pub fn get(&self, element: ElementId) -> Option<LayoutRect> {
        self.rects.get(&element).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
