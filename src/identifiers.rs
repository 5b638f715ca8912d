//! Identifier types for modules

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Module ID - a diagnostic identity for a module object
///
/// Identity of a module is reference identity (`Module::ptr_eq`); the ID only
/// names that object in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(Uuid);

impl ModuleId {
    /// Create a new random module ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
