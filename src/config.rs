//! Toolkit configuration and viewport state signals.
//!
//! The viewport size lives in reactive signals (the root inputs of any
//! rendered-size computation); the rest of the configuration is plain data
//! that can be loaded from JSON.

use std::cell::RefCell;

use serde::Deserialize;
use spark_signals::{signal, Signal};

use crate::error::Result;

// =============================================================================
// Configuration
// =============================================================================

/// Gap between flow panel items, in pixels, per `spacing` setting.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowSpacing {
    pub none: f32,
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl Default for FlowSpacing {
    fn default() -> Self {
        Self {
            none: 0.0,
            small: 4.0,
            medium: 8.0,
            large: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Prefix that makes an application-defined event name acceptable.
    pub custom_event_prefix: String,
    /// Number of columns in a full grid row.
    pub grid_columns: u32,
    /// Initial viewport width in pixels.
    pub viewport_width: f32,
    /// Initial viewport height in pixels.
    pub viewport_height: f32,
    pub flow_spacing: FlowSpacing,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            custom_event_prefix: "x-".to_string(),
            grid_columns: 12,
            viewport_width: 1024.0,
            viewport_height: 768.0,
            flow_spacing: FlowSpacing::default(),
        }
    }
}

impl ToolkitConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

thread_local! {
    static CONFIG: RefCell<ToolkitConfig> = RefCell::new(ToolkitConfig::default());
    static VIEWPORT_WIDTH: RefCell<Signal<f32>> = RefCell::new(signal(1024.0));
    static VIEWPORT_HEIGHT: RefCell<Signal<f32>> = RefCell::new(signal(768.0));
}

/// Install a configuration. Also resets the viewport to its configured size.
pub fn set_config(config: ToolkitConfig) {
    tracing::debug!(
        "config: prefix={:?} columns={} viewport={}x{}",
        config.custom_event_prefix,
        config.grid_columns,
        config.viewport_width,
        config.viewport_height
    );
    set_viewport_size(config.viewport_width, config.viewport_height);
    CONFIG.with(|c| *c.borrow_mut() = config);
}

/// Read the active configuration.
pub fn with_config<R>(f: impl FnOnce(&ToolkitConfig) -> R) -> R {
    CONFIG.with(|c| f(&c.borrow()))
}

pub fn custom_event_prefix() -> String {
    with_config(|c| c.custom_event_prefix.clone())
}

pub fn grid_columns() -> u32 {
    with_config(|c| c.grid_columns)
}

// =============================================================================
// Viewport Size Signals
// =============================================================================

/// Get the current viewport width.
pub fn viewport_width() -> f32 {
    VIEWPORT_WIDTH.with(|w| w.borrow().get())
}

/// Get the current viewport height.
pub fn viewport_height() -> f32 {
    VIEWPORT_HEIGHT.with(|h| h.borrow().get())
}

/// Set the viewport size (called on resize).
pub fn set_viewport_size(width: f32, height: f32) {
    VIEWPORT_WIDTH.with(|w| w.borrow().set(width));
    VIEWPORT_HEIGHT.with(|h| h.borrow().set(height));
}

/// Get the viewport width signal for reactive tracking.
pub fn viewport_width_signal() -> Signal<f32> {
    VIEWPORT_WIDTH.with(|w| w.borrow().clone())
}

/// Restore the default configuration (for testing).
pub fn reset_config() {
    set_config(ToolkitConfig::default());
}
