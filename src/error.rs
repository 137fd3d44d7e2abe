//! Component error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("component id '{0}' is already in use")]
    DuplicateId(String),

    #[error("index {0} is not a component")]
    NotAComponent(usize),

    #[error("component {child} already has a parent ({parent}); remove it first")]
    AlreadyParented { child: usize, parent: usize },

    #[error("component {0} is a top-level form and cannot be added to a container")]
    TopLevel(usize),

    #[error("adding component {child} to {container} would create a cycle")]
    WouldCreateCycle { child: usize, container: usize },

    #[error("component {0} is not a container")]
    NotAContainer(usize),

    #[error("unknown event '{0}' (custom events must start with '{1}')")]
    UnknownEvent(String, String),

    #[error("{component_type} has no property '{name}'")]
    UnknownProperty { component_type: String, name: String },

    #[error("invalid value for property '{name}': {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("invalid layout property '{key}': {reason}")]
    InvalidLayout { key: String, reason: String },

    #[error("expected a {expected}, found a {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("cannot instantiate component type {0}")]
    InvalidComponentType(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ComponentError>;
