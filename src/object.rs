//! Object record: keyed mapping with prototype link, lock flag, optional
//! user-data, and an optional back-reference to the owning Executor.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{MapKey, Value};

/// Narrow collaborator trait for the bytecode executor/compiler this core
/// does not implement. An Object's `state` field holds an `Rc<dyn Host>`
/// so that [`crate::dispatch::try_dispatch`] can invoke a metamethod
/// through whichever executor attached itself to that object.
pub trait Host {
    /// Invoke `callable` (normally a `Value::Function`) with `args` and
    /// return its result, or an error raised during the call.
    fn call(&self, callable: &Value, args: &[Value]) -> RuntimeResult<Value>;
}

/// Shared handle to an [`ObjectData`] record.
pub type ObjectHandle = Rc<RefCell<ObjectData>>;

/// The Object record (§3).
pub struct ObjectData {
    /// Ordered mapping from key to value; insertion order is preserved
    /// for enumeration, overwrites do not move a key.
    values: IndexMap<MapKey, Value>,
    /// Explicit prototype, if one was assigned. `None` means "use the
    /// default" per the prototype accessor (§4.6).
    prototype: Option<Value>,
    /// Monotonic lock flag (I1).
    locked: bool,
    /// Back-reference to the owning Executor, used only to invoke
    /// metamethods (§4.10).
    state: Option<Rc<dyn Host>>,
    /// Opaque host-side payload, never interpreted by the core.
    user_data: Option<Rc<dyn Any>>,
}

impl ObjectData {
    /// Construct a fresh, empty, unlocked object with no explicit
    /// prototype, no attached state, and no user data.
    pub fn new() -> Self {
        ObjectData {
            values: IndexMap::new(),
            prototype: None,
            locked: false,
            state: None,
            user_data: None,
        }
    }

    /// Wrap a fresh [`ObjectData`] in a shared handle.
    pub fn new_handle() -> ObjectHandle {
        Rc::new(RefCell::new(ObjectData::new()))
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` once [`ObjectData::lock`] has been called; never resets.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Set the lock flag. Monotonic: calling this twice is a no-op.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Look up an own key directly, without walking the prototype chain
    /// or invoking any metamethod.
    pub fn get_own(&self, key: &Value) -> Option<Value> {
        self.values.get(&MapKey(key.clone())).cloned()
    }

    /// `true` if `key` is an own key.
    pub fn contains_own(&self, key: &Value) -> bool {
        self.values.contains_key(&MapKey(key.clone()))
    }

    /// Insert or overwrite an own key, ignoring the lock flag. Callers
    /// (the Indexer) are responsible for checking [`ObjectData::is_locked`]
    /// first; this method exists so Metadispatch and internal helpers
    /// that have already made that decision don't re-check it.
    pub fn set_own_unchecked(&mut self, key: Value, value: Value) {
        self.values.insert(MapKey(key), value);
    }

    /// Insert or overwrite an own key, failing if the object is locked.
    pub fn set_own(&mut self, key: Value, value: Value) -> RuntimeResult<()> {
        if self.locked {
            return Err(RuntimeError::ObjectIsLocked);
        }
        self.set_own_unchecked(key, value);
        Ok(())
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.values.iter().map(|(k, v)| (&k.0, v))
    }

    /// The explicit prototype, if any was assigned via [`ObjectData::set_prototype`].
    pub fn explicit_prototype(&self) -> Option<&Value> {
        self.prototype.as_ref()
    }

    /// Set the explicit prototype directly. Used internally by
    /// `crate::prototype::set_prototype` after that module has already
    /// validated the payload and lock state per §4.6.
    pub fn set_explicit_prototype(&mut self, prototype: Option<Value>) {
        self.prototype = prototype;
    }

    /// The attached Executor, if any.
    pub fn state(&self) -> Option<Rc<dyn Host>> {
        self.state.clone()
    }

    /// Attach (or replace) the Executor back-reference.
    pub fn set_state(&mut self, state: Rc<dyn Host>) {
        self.state = Some(state);
    }

    /// The opaque user-data payload, if any.
    pub fn user_data(&self) -> Option<Rc<dyn Any>> {
        self.user_data.clone()
    }

    /// Set the opaque user-data payload.
    pub fn set_user_data(&mut self, data: Rc<dyn Any>) {
        self.user_data = Some(data);
    }
}

impl Default for ObjectData {
    fn default() -> Self {
        ObjectData::new()
    }
}

impl std::fmt::Debug for ObjectData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectData")
            .field("keys", &self.values.len())
            .field("locked", &self.locked)
            .field("has_state", &self.state.is_some())
            .finish()
    }
}
