// Copyright 2025 Cowboy AI, LLC.

//! Capability merging
//!
//! `extend` gives a target module the behaviors of a source module and links
//! the target back to the source as its ancestor.
//!
//! ```mermaid
//! graph LR
//!     S[Source] -->|behaviors, by reference| T[Target]
//!     T -.->|ancestor| S
//! ```

use tracing::debug;

use crate::errors::{CapabilityError, CapabilityResult};
use crate::module::Module;
use crate::value::Value;

/// Extend `target` with the behaviors of `source`
///
/// Every behavior member of `source` is assigned onto `target` under the same
/// name, sharing the same behavior. Data members are never copied. The
/// target's ancestor becomes `source` itself, replacing any earlier ancestor.
/// `source`'s own ancestor is not carried over.
///
/// The source is snapshotted before the target is touched, so the merge
/// either applies completely or leaves the target unchanged. Extending a
/// module with itself is allowed and leaves it as its own ancestor.
///
/// # Examples
///
/// ```rust
/// use cim_capability::{extend, Behavior, Module, Value};
///
/// let source = Module::builder()
///     .behavior("greet", |_, _| Ok(Value::from("hi")))
///     .data("count", 5)
///     .build();
/// let target = Module::new();
///
/// extend(&target, &source).unwrap();
///
/// let copied = target.behavior("greet").unwrap().unwrap();
/// let original = source.behavior("greet").unwrap().unwrap();
/// assert!(Behavior::ptr_eq(&copied, &original));
/// assert_eq!(target.get("count").unwrap(), Value::Undefined);
/// assert!(Module::ptr_eq(&target.ancestor().unwrap().unwrap(), &source));
/// ```
pub fn extend(target: &Module, source: &Module) -> CapabilityResult<Module> {
    let behaviors = source.behaviors()?;
    let copied = behaviors.len();
    let skipped = source.len()?.saturating_sub(copied);

    target.adopt(behaviors, source)?;

    debug!(
        module = %target.id(),
        ancestor = %source.id(),
        copied,
        skipped,
        "extended module"
    );
    Ok(target.clone())
}

/// Extend using arbitrary values
///
/// Both values must reference modules. Anything else, `Undefined` and `Null`
/// included, fails with `InvalidArgument` before any mutation.
pub fn extend_value(target: &Value, source: &Value) -> CapabilityResult<Module> {
    let target = target.as_module().ok_or_else(|| {
        CapabilityError::InvalidArgument(format!("cannot extend {}", target.kind()))
    })?;
    let source = source.as_module().ok_or_else(|| {
        CapabilityError::InvalidArgument(format!("cannot extend from {}", source.kind()))
    })?;
    extend(target, source)
}
