// Copyright 2025 Cowboy AI, LLC.

//! Script context: a global namespace of modules, functions and properties
//!
//! The host registers functions, function suites and callable objects by
//! name, sets properties, and invokes registered behaviors by name. Modules
//! living in the namespace can be extended from one another by name.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::behavior::{Behavior, CallableObject, Member};
use crate::config::ContextConfig;
use crate::delegation;
use crate::errors::{CapabilityError, CapabilityResult};
use crate::merge::extend_value;
use crate::module::Module;
use crate::point::make_point;
use crate::value::Value;

/// Name of the built-in point helper
pub const POINT_HELPER: &str = "p";

/// Host-side script context
///
/// # Examples
///
/// ```rust
/// use cim_capability::{ScriptContext, Value};
///
/// let context = ScriptContext::new();
/// context
///     .add_function("double", |_, args| {
///         let n = args.first().map(Value::to_number).unwrap_or(f64::NAN);
///         Ok(Value::Number(n * 2.0))
///     })
///     .unwrap();
///
/// let result = context.call_function("double", &[Value::from(21)]).unwrap();
/// assert_eq!(result, Value::from(42));
/// ```
#[derive(Debug)]
pub struct ScriptContext {
    config: ContextConfig,
    global: Module,
}

impl ScriptContext {
    /// Create a context with the default configuration
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Create a context with an explicit configuration
    pub fn with_config(config: ContextConfig) -> Self {
        let global = if config.install_core_helpers {
            Module::builder()
                .behavior(POINT_HELPER, |_, args| {
                    let coordinate =
                        |i: usize| args.get(i).map(Value::to_number).unwrap_or(f64::NAN);
                    Ok(Value::Point(make_point(coordinate(0), coordinate(1))))
                })
                .build()
        } else {
            Module::new()
        };
        Self { config, global }
    }

    /// The configuration in effect
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// The global module
    pub fn global(&self) -> &Module {
        &self.global
    }

    /// Register a function in the global namespace
    pub fn add_function<F>(&self, name: &str, f: F) -> CapabilityResult<Behavior>
    where
        F: Fn(&Module, &[Value]) -> CapabilityResult<Value> + Send + Sync + 'static,
    {
        debug!("Registering global function {}", name);
        self.global.define_behavior(name, f)
    }

    /// Register a table of functions as a suite module under `suite`
    pub fn add_functions(
        &self,
        suite: &str,
        functions: IndexMap<String, Behavior>,
    ) -> CapabilityResult<Module> {
        debug!("Registering suite {} with {} functions", suite, functions.len());
        let module = functions
            .iter()
            .fold(Module::builder(), |builder, (name, behavior)| {
                builder.shared_behavior(name.clone(), behavior)
            })
            .build();
        self.global.set(suite, module.clone())?;
        Ok(module)
    }

    /// Register a host object's script methods as a suite module under `name`
    pub fn add_callable_object(
        &self,
        name: &str,
        object: &dyn CallableObject,
    ) -> CapabilityResult<Module> {
        debug!("Registering callable object {}", name);
        let module = Module::from_callable(object);
        self.global.set(name, module.clone())?;
        Ok(module)
    }

    /// Set a global property
    pub fn set_property(&self, name: &str, value: impl Into<Value>) -> CapabilityResult<()> {
        self.global.set(name, value)
    }

    /// Read a global property; `Undefined` when absent
    pub fn property(&self, name: &str) -> CapabilityResult<Value> {
        self.global.get(name)
    }

    /// The suite module registered under `name`
    pub fn suite(&self, name: &str) -> CapabilityResult<Module> {
        match self.global.member(name)? {
            Some(Member::Data(Value::Module(module))) => Ok(module),
            _ => Err(CapabilityError::NotAModule(name.to_string())),
        }
    }

    /// Call a global function with the global module as receiver
    pub fn call_function(&self, name: &str, args: &[Value]) -> CapabilityResult<Value> {
        self.global.call(name, args)
    }

    /// Call a global function with an explicit receiver
    pub fn call_function_with_receiver(
        &self,
        name: &str,
        args: &[Value],
        this: &Module,
    ) -> CapabilityResult<Value> {
        self.global.call_with_receiver(name, this, args)
    }

    /// Call a function of a suite; the receiver defaults to the suite itself
    pub fn call_function_in_suite(
        &self,
        function: &str,
        suite: &str,
        args: &[Value],
        this: Option<&Module>,
    ) -> CapabilityResult<Value> {
        let module = self.suite(suite)?;
        let receiver = this.unwrap_or(&module);
        module.call_with_receiver(function, receiver, args)
    }

    /// Extend the global `target` with the global `source`
    ///
    /// Names that are not bound read as `Undefined`, which makes the merge
    /// fail with `InvalidArgument`.
    pub fn extend_named(&self, target: &str, source: &str) -> CapabilityResult<Module> {
        extend_value(&self.property(target)?, &self.property(source)?)
    }

    /// Find a behavior on `module` or its ancestors, bounded by the configuration
    pub fn resolve_behavior(
        &self,
        module: &Module,
        name: &str,
    ) -> CapabilityResult<Option<(Module, Behavior)>> {
        let resolved = delegation::resolve_behavior(module, name, self.config.max_ancestor_hops)?;
        if resolved.is_none() {
            let hops = module
                .ancestry()?
                .take(self.config.max_ancestor_hops.saturating_add(1))
                .count();
            if hops > self.config.max_ancestor_hops {
                warn!(
                    "Behavior {} not resolved within {} ancestor hops of module {}",
                    name,
                    self.config.max_ancestor_hops,
                    module.id()
                );
            }
        }
        Ok(resolved)
    }
}

impl Default for ScriptContext {
    fn default() -> Self {
        Self::new()
    }
}
