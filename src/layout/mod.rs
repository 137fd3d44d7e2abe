//! Layout Module
//!
//! Flexbox layout computation over the element tree using Taffy.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) for
//! W3C-compliant flexbox computation. The bridge:
//!
//! 1. Converts element styles → Taffy styles
//! 2. Builds a Taffy tree from element parent/child links
//! 3. Provides a measure function for intrinsic sizes of leaf elements
//! 4. Extracts computed positions and sizes into a `ComputedLayout`
//!
//! Panels use it to answer rendered-size queries (`XYPanel::get_width`).

mod taffy_bridge;
mod types;

pub use taffy_bridge::{compute_layout, rendered_width};
pub use types::*;
