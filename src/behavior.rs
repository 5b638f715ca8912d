//! Behaviors and the member union held by modules

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::CapabilityResult;
use crate::module::Module;
use crate::value::Value;

/// Signature of an invocable member: receiver (`this`) plus arguments
pub type BehaviorFn = dyn Fn(&Module, &[Value]) -> CapabilityResult<Value> + Send + Sync;

/// A shared, invocable member value
///
/// Cloning a `Behavior` clones the reference, not the function: every clone
/// is the same behavior, and `Behavior::ptr_eq` reports that identity.
///
/// # Example
///
/// ```
/// use cim_capability::{Behavior, Module, Value};
///
/// let greet = Behavior::new(|_this, _args| Ok(Value::from("hi")));
/// let module = Module::new();
/// assert_eq!(greet.call(&module, &[]).unwrap(), Value::from("hi"));
/// ```
#[derive(Clone)]
pub struct Behavior(Arc<BehaviorFn>);

impl Behavior {
    /// Wrap a closure as a behavior
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Module, &[Value]) -> CapabilityResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A behavior that ignores its receiver and arguments and returns `value`
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(move |_, _| Ok(value.clone()))
    }

    /// Invoke with an explicit receiver
    pub fn call(&self, receiver: &Module, args: &[Value]) -> CapabilityResult<Value> {
        (self.0)(receiver, args)
    }

    /// Whether both handles refer to the same behavior
    pub fn ptr_eq(a: &Behavior, b: &Behavior) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Behavior({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// A named member of a module: either a behavior or plain data
#[derive(Debug, Clone)]
pub enum Member {
    /// Invocable member, copied by reference when a module is extended
    Behavior(Behavior),
    /// Plain data, never copied by extension
    Data(Value),
}

impl Member {
    /// Check if this member is invocable
    pub fn is_behavior(&self) -> bool {
        matches!(self, Member::Behavior(_))
    }

    /// The behavior, if this member is one
    pub fn as_behavior(&self) -> Option<&Behavior> {
        match self {
            Member::Behavior(behavior) => Some(behavior),
            Member::Data(_) => None,
        }
    }

    /// The data value, if this member is data
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Member::Data(value) => Some(value),
            Member::Behavior(_) => None,
        }
    }
}

impl From<Behavior> for Member {
    fn from(behavior: Behavior) -> Self {
        Member::Behavior(behavior)
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Member::Data(value)
    }
}

/// Host objects that expose a table of script-callable methods
///
/// Implementors hand out the behaviors a script may invoke, keyed by the
/// method name scripts use. See `Module::from_callable` and
/// `ScriptContext::add_callable_object`.
pub trait CallableObject {
    /// Method name to handler table, in registration order
    fn handlers_for_script_methods(&self) -> IndexMap<String, Behavior>;
}
