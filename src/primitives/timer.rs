//! Timer - invisible component that raises `tick`.
//!
//! The host drives ticking; [`fire_tick`] raises one tick if the timer is
//! running (`interval > 0`). Panels that keep a visual slot per child skip
//! timers.

use crate::component::{create_component, get_property};
use crate::error::{ComponentError, Result};
use crate::state::events::raise_event;
use crate::types::{ComponentType, PropertyMap};

pub fn timer(id: Option<&str>) -> Result<usize> {
    create_component(ComponentType::Timer, id)
}

/// Raise one `tick`. Returns `false` when the timer is stopped.
pub async fn fire_tick(index: usize) -> Result<bool> {
    let found = crate::component::component_type(index);
    if found != ComponentType::Timer {
        return Err(ComponentError::TypeMismatch {
            expected: ComponentType::Timer.to_string(),
            found: found.to_string(),
        });
    }
    let interval = get_property(index, "interval")?.as_f64().unwrap_or(0.0);
    if interval <= 0.0 {
        return Ok(false);
    }
    raise_event(index, "tick", PropertyMap::new()).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::set_property;
    use crate::reset_toolkit;
    use crate::state::events::{add_event_handler, handler};
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_tick_only_while_running() {
        reset_toolkit();

        let t = timer(None).unwrap();
        let ticks = Rc::new(Cell::new(0));
        let c = ticks.clone();
        add_event_handler(t, "tick", handler(move |_| c.set(c.get() + 1))).unwrap();

        assert!(block_on(fire_tick(t)).unwrap());
        set_property(t, "interval", 0).unwrap();
        assert!(!block_on(fire_tick(t)).unwrap());
        assert_eq!(ticks.get(), 1);
    }
}
