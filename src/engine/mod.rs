//! Engine - Component registry, element tree, parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: Index allocation, ID mapping, destroy callbacks
//! - Element / ElementRegistry: The element tree components render into
//! - Arrays: Parallel columns for per-component state
//!
//! # Architecture
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: FlowPanel (parent=None, element=0, visible=true, ...)
//! Index 1: Label     (parent=0,    element=2, visible=true, ...)
//! Index 2: Button    (parent=0,    element=4, visible=false, ...)
//! ```
//!
//! Parent links are plain indices, so a child never holds a reference to its
//! container and removal is a lookup, not a captured closure.

mod element;
mod element_registry;
mod registry;
pub mod arrays;

pub use element::*;
pub use element_registry::*;
pub use registry::*;
