//! Explicit, caller-driven delegation through ancestor links
//!
//! Nothing here runs implicitly: member lookups on a `Module` never consult
//! its ancestor. These helpers let a caller walk the chain one hop at a time.

use crate::behavior::Behavior;
use crate::errors::{CapabilityError, CapabilityResult};
use crate::module::Module;
use crate::value::Value;

/// Iterator over a module's ancestors, nearest first
///
/// Each `next()` follows exactly one ancestor link. Chains may be cyclic
/// (a module extended with itself is its own ancestor), so callers bound the
/// walk themselves, e.g. with `take`.
pub struct Ancestry {
    next: Option<Module>,
    failed: bool,
}

impl Iterator for Ancestry {
    type Item = CapabilityResult<Module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let current = self.next.take()?;
        match current.ancestor() {
            Ok(ancestor) => {
                self.next = ancestor;
                Some(Ok(current))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl Module {
    /// Walk this module's ancestors, one hop per item
    pub fn ancestry(&self) -> CapabilityResult<Ancestry> {
        Ok(Ancestry {
            next: self.ancestor()?,
            failed: false,
        })
    }
}

/// Invoke `name` on the module's ancestor, with the ancestor as receiver
///
/// This is the one-hop "super" call: an overriding behavior uses it to reach
/// the implementation it replaced.
///
/// # Examples
///
/// ```rust
/// use cim_capability::{call_ancestor, extend, Module, Value};
///
/// let base = Module::builder()
///     .behavior("name", |_, _| Ok(Value::from("base")))
///     .build();
/// let derived = Module::new();
/// extend(&derived, &base).unwrap();
///
/// assert_eq!(call_ancestor(&derived, "name", &[]).unwrap(), Value::from("base"));
/// ```
pub fn call_ancestor(module: &Module, name: &str, args: &[Value]) -> CapabilityResult<Value> {
    let ancestor = module
        .ancestor()?
        .ok_or(CapabilityError::NoAncestor(module.id()))?;
    ancestor.call(name, args)
}

/// Find a behavior on the module or, failing that, on up to `max_hops` ancestors
///
/// Returns the module that owns the behavior together with the behavior.
pub fn resolve_behavior(
    module: &Module,
    name: &str,
    max_hops: usize,
) -> CapabilityResult<Option<(Module, Behavior)>> {
    if let Some(behavior) = module.behavior(name)? {
        return Ok(Some((module.clone(), behavior)));
    }
    for ancestor in module.ancestry()?.take(max_hops) {
        let ancestor = ancestor?;
        if let Some(behavior) = ancestor.behavior(name)? {
            return Ok(Some((ancestor, behavior)));
        }
    }
    Ok(None)
}
