//! # CIM Capability
//!
//! Behavior inheritance for CIM modules by explicit extension.
//!
//! A [`Module`] is an object-like table of named members. Each member is
//! either a [`Behavior`] (invocable, shared by reference) or plain data
//! ([`Value`]). [`extend`] makes a target module acquire the behaviors of a
//! source module and records the source as the target's ancestor:
//!
//! - **Selective**: behaviors are copied, data is not
//! - **By reference**: copied behaviors are the same behaviors, not clones
//! - **One hop**: the ancestor is a single back-pointer, replaced by each merge
//! - **Explicit**: lookups never walk ancestors on their own; see [`call_ancestor`]
//!   and [`resolve_behavior`]
//!
//! ```rust
//! use cim_capability::{call_ancestor, extend, Module, Value};
//!
//! let main_module = Module::builder()
//!     .behavior("doSomething", |_, _| Ok(Value::from("Foo")))
//!     .build();
//! let sub_module = Module::new();
//! extend(&sub_module, &main_module).unwrap();
//!
//! sub_module
//!     .define_behavior("doSomething", |this, _| {
//!         let base = call_ancestor(this, "doSomething", &[])?;
//!         Ok(Value::from(format!("{}Bar, {}", base, this.get("name")?)))
//!     })
//!     .unwrap();
//!
//! let result = sub_module.call("doSomething", &[]).unwrap();
//! assert_eq!(result.to_string(), "FooBar, undefined");
//! ```
//!
//! [`ScriptContext`] adds a host-side global namespace where functions,
//! suites and callable objects are registered and invoked by name.

#![warn(missing_docs)]

mod behavior;
mod config;
mod context;
mod delegation;
mod errors;
mod identifiers;
mod merge;
mod module;
mod point;
mod value;

pub use behavior::{Behavior, BehaviorFn, CallableObject, Member};
pub use config::ContextConfig;
pub use context::{ScriptContext, POINT_HELPER};
pub use delegation::{call_ancestor, resolve_behavior, Ancestry};
pub use errors::{CapabilityError, CapabilityResult};
pub use identifiers::ModuleId;
pub use merge::{extend, extend_value};
pub use module::{Module, ModuleBuilder};
pub use point::{make_point, Point};
pub use value::Value;
