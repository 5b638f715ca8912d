//! Script context configuration

use serde::{Deserialize, Serialize};

use crate::errors::{CapabilityError, CapabilityResult};

/// Configuration for a [`ScriptContext`](crate::ScriptContext)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Ancestor hops a context-level delegation walk may take
    pub max_ancestor_hops: usize,
    /// Install the built-in global helpers (`p`) at construction
    pub install_core_helpers: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_ancestor_hops: 32,
            install_core_helpers: true,
        }
    }
}

impl ContextConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> CapabilityResult<Self> {
        serde_json::from_str(json).map_err(|e| CapabilityError::ConfigurationError(e.to_string()))
    }
}
