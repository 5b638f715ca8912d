//! Modules: shared, object-like member tables with an ancestor link

use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::behavior::{Behavior, CallableObject, Member};
use crate::errors::{CapabilityError, CapabilityResult};
use crate::identifiers::ModuleId;
use crate::value::Value;

struct ModuleState {
    members: IndexMap<String, Member>,
    ancestor: Option<Module>,
}

/// An object-like value holding named members
///
/// A `Module` is a handle: cloning it yields another reference to the same
/// object, and writes through one handle are visible through every other.
/// Members keep their insertion order.
///
/// Members are only ever looked up on the module itself. The ancestor set by
/// [`extend`](crate::extend) is reachable through [`Module::ancestor`] and is
/// never consulted implicitly.
///
/// # Example
///
/// ```
/// use cim_capability::{Module, Value};
///
/// let module = Module::builder()
///     .behavior("greet", |_this, _args| Ok(Value::from("hi")))
///     .data("count", 5)
///     .build();
///
/// assert_eq!(module.call("greet", &[]).unwrap(), Value::from("hi"));
/// assert_eq!(module.get("count").unwrap(), Value::from(5));
/// assert_eq!(module.get("name").unwrap(), Value::Undefined);
/// ```
#[derive(Clone)]
pub struct Module {
    id: ModuleId,
    inner: Arc<RwLock<ModuleState>>,
}

impl Module {
    /// Create an empty module
    pub fn new() -> Self {
        Self::from_members(IndexMap::new())
    }

    /// Start building a module
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder::default()
    }

    fn from_members(members: IndexMap<String, Member>) -> Self {
        Self {
            id: ModuleId::new(),
            inner: Arc::new(RwLock::new(ModuleState {
                members,
                ancestor: None,
            })),
        }
    }

    /// Create a module holding a host object's script-callable methods
    pub fn from_callable(object: &dyn CallableObject) -> Self {
        Self::from_members(
            object
                .handlers_for_script_methods()
                .into_iter()
                .map(|(name, behavior)| (name, Member::Behavior(behavior)))
                .collect(),
        )
    }

    /// Diagnostic identity of this module
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Whether both handles refer to the same module
    pub fn ptr_eq(a: &Module, b: &Module) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    fn read(&self) -> CapabilityResult<RwLockReadGuard<'_, ModuleState>> {
        self.inner
            .read()
            .map_err(|_| CapabilityError::InternalError(format!("module {} lock poisoned", self.id)))
    }

    fn write(&self) -> CapabilityResult<RwLockWriteGuard<'_, ModuleState>> {
        self.inner
            .write()
            .map_err(|_| CapabilityError::InternalError(format!("module {} lock poisoned", self.id)))
    }

    /// Assign a member, returning whatever it replaced
    pub fn define(
        &self,
        name: impl Into<String>,
        member: impl Into<Member>,
    ) -> CapabilityResult<Option<Member>> {
        Ok(self.write()?.members.insert(name.into(), member.into()))
    }

    /// Assign a behavior built from a closure
    pub fn define_behavior<F>(&self, name: impl Into<String>, f: F) -> CapabilityResult<Behavior>
    where
        F: Fn(&Module, &[Value]) -> CapabilityResult<Value> + Send + Sync + 'static,
    {
        let behavior = Behavior::new(f);
        self.define(name, behavior.clone())?;
        Ok(behavior)
    }

    /// Assign a data member
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> CapabilityResult<()> {
        self.define(name, Member::Data(value.into()))?;
        Ok(())
    }

    /// The member stored under `name`
    pub fn member(&self, name: &str) -> CapabilityResult<Option<Member>> {
        Ok(self.read()?.members.get(name).cloned())
    }

    /// Read a data member
    ///
    /// Yields `Value::Undefined` when no data member of that name exists,
    /// including when the name holds a behavior.
    pub fn get(&self, name: &str) -> CapabilityResult<Value> {
        Ok(match self.read()?.members.get(name) {
            Some(Member::Data(value)) => value.clone(),
            _ => Value::Undefined,
        })
    }

    /// The behavior stored under `name`, if that member is one
    pub fn behavior(&self, name: &str) -> CapabilityResult<Option<Behavior>> {
        Ok(self
            .read()?
            .members
            .get(name)
            .and_then(Member::as_behavior)
            .cloned())
    }

    /// Check whether a member exists under `name`
    pub fn contains(&self, name: &str) -> CapabilityResult<bool> {
        Ok(self.read()?.members.contains_key(name))
    }

    /// Remove a member, preserving the order of the rest
    pub fn remove(&self, name: &str) -> CapabilityResult<Option<Member>> {
        Ok(self.write()?.members.shift_remove(name))
    }

    /// Member names in insertion order
    pub fn member_names(&self) -> CapabilityResult<Vec<String>> {
        Ok(self.read()?.members.keys().cloned().collect())
    }

    /// Snapshot of the behavior members, in insertion order
    pub fn behaviors(&self) -> CapabilityResult<IndexMap<String, Behavior>> {
        Ok(self
            .read()?
            .members
            .iter()
            .filter_map(|(name, member)| {
                member
                    .as_behavior()
                    .map(|behavior| (name.clone(), behavior.clone()))
            })
            .collect())
    }

    /// Number of members
    pub fn len(&self) -> CapabilityResult<usize> {
        Ok(self.read()?.members.len())
    }

    /// Check if the module has no members
    pub fn is_empty(&self) -> CapabilityResult<bool> {
        Ok(self.read()?.members.is_empty())
    }

    /// Invoke an own behavior with this module as the receiver
    pub fn call(&self, name: &str, args: &[Value]) -> CapabilityResult<Value> {
        self.call_with_receiver(name, self, args)
    }

    /// Invoke an own behavior with an explicit receiver
    ///
    /// The lock is released before the behavior runs, so the behavior may read
    /// or write any module, this one included.
    pub fn call_with_receiver(
        &self,
        name: &str,
        receiver: &Module,
        args: &[Value],
    ) -> CapabilityResult<Value> {
        let behavior = match self.member(name)? {
            Some(Member::Behavior(behavior)) => behavior,
            Some(Member::Data(_)) => return Err(CapabilityError::NotABehavior(name.to_string())),
            None => return Err(CapabilityError::BehaviorNotFound(name.to_string())),
        };
        behavior.call(receiver, args)
    }

    /// The module this one was last extended with, one hop up
    pub fn ancestor(&self) -> CapabilityResult<Option<Module>> {
        Ok(self.read()?.ancestor.clone())
    }

    /// Copy `behaviors` in and replace the ancestor under one write lock
    pub(crate) fn adopt(
        &self,
        behaviors: IndexMap<String, Behavior>,
        ancestor: &Module,
    ) -> CapabilityResult<()> {
        let mut state = self.write()?;
        for (name, behavior) in behaviors {
            tracing::trace!(module = %self.id, name = %name, "adopting behavior");
            state.members.insert(name, Member::Behavior(behavior));
        }
        state.ancestor = Some(ancestor.clone());
        Ok(())
    }

    /// Data members as a JSON object; behaviors are omitted
    pub fn to_json(&self) -> CapabilityResult<serde_json::Value> {
        let mut visiting = Vec::new();
        self.to_json_inner(&mut visiting)
    }

    pub(crate) fn to_json_inner(
        &self,
        visiting: &mut Vec<ModuleId>,
    ) -> CapabilityResult<serde_json::Value> {
        if visiting.contains(&self.id) {
            return Err(CapabilityError::SerializationError(format!(
                "module {} contains itself",
                self.id
            )));
        }
        visiting.push(self.id);

        let data: Vec<(String, Value)> = self
            .read()?
            .members
            .iter()
            .filter_map(|(name, member)| member.as_data().map(|v| (name.clone(), v.clone())))
            .collect();

        let mut object = serde_json::Map::new();
        for (name, value) in data {
            object.insert(name, value.to_json_inner(visiting)?);
        }

        visiting.pop();
        Ok(serde_json::Value::Object(object))
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Ancestor chains may be cyclic; print ids only
        match self.inner.try_read() {
            Ok(state) => {
                let names: Vec<&str> = state.members.keys().map(String::as_str).collect();
                f.debug_struct("Module")
                    .field("id", &self.id)
                    .field("members", &names)
                    .field("ancestor", &state.ancestor.as_ref().map(Module::id))
                    .finish()
            }
            Err(_) => f
                .debug_struct("Module")
                .field("id", &self.id)
                .finish_non_exhaustive(),
        }
    }
}

/// Builder for modules with members known up front
#[derive(Default)]
pub struct ModuleBuilder {
    members: IndexMap<String, Member>,
}

impl ModuleBuilder {
    /// Add a behavior
    pub fn behavior<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Module, &[Value]) -> CapabilityResult<Value> + Send + Sync + 'static,
    {
        self.members
            .insert(name.into(), Member::Behavior(Behavior::new(f)));
        self
    }

    /// Add an existing behavior, keeping its identity
    pub fn shared_behavior(mut self, name: impl Into<String>, behavior: &Behavior) -> Self {
        self.members
            .insert(name.into(), Member::Behavior(behavior.clone()));
        self
    }

    /// Add a data member
    pub fn data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), Member::Data(value.into()));
        self
    }

    /// Finish the module
    pub fn build(self) -> Module {
        Module::from_members(self.members)
    }
}
