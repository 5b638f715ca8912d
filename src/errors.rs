// Copyright 2025 Cowboy AI, LLC.

//! Error types for capability operations

use thiserror::Error;

use crate::identifiers::ModuleId;

/// Errors that can occur while merging, reading or invoking module members
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapabilityError {
    /// A merge target or source was absent or not object-like
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No member with this name exists on the module
    #[error("Behavior not found: {0}")]
    BehaviorNotFound(String),

    /// The member exists but holds data, not a behavior
    #[error("Not a behavior: {0}")]
    NotABehavior(String),

    /// The named value is not a module
    #[error("Not a module: {0}")]
    NotAModule(String),

    /// The module was never extended, so it has no ancestor to delegate to
    #[error("No ancestor: module {0} has not been extended")]
    NoAncestor(ModuleId),

    /// A behavior reported a failure of its own
    #[error("Behavior failed: {name} - {message}")]
    BehaviorFailed {
        /// Name the behavior was invoked under
        name: String,
        /// Failure reported by the behavior
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type for capability operations
pub type CapabilityResult<T> = Result<T, CapabilityError>;

impl From<serde_json::Error> for CapabilityError {
    fn from(err: serde_json::Error) -> Self {
        CapabilityError::SerializationError(err.to_string())
    }
}

impl CapabilityError {
    /// Create a behavior failure for the named behavior
    pub fn behavior_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        CapabilityError::BehaviorFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CapabilityError::InvalidArgument(_))
    }

    /// Check if this is a lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CapabilityError::BehaviorNotFound(_)
                | CapabilityError::NotAModule(_)
                | CapabilityError::NoAncestor(_)
        )
    }
}
