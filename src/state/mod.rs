//! State Module - Runtime state shared by all components
//!
//! - **Events** - Event tables, handler registry, sequential raising

pub mod events;

pub use events::{
    add_event_handler, async_handler, handler, raise_event, remove_event_handler,
    set_event_handler, validate_event_name, EventArgs, EventDescriptor, EventHandler, HandlerId,
};
