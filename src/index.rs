//! The Indexer (§4.3, §4.4): `get`/`set` over array/object plus the
//! prototype chain, with auto-bind (§4.5) and metamethod fallback.
//!
//! The walk here is intentionally separate from [`crate::dispatch`]'s:
//! this module is allowed to call into Metadispatch (to invoke `__get`/
//! `__set`), but Metadispatch must never call back into this module, or
//! looking up `__get` itself would re-trigger a `__get` lookup forever.

use crate::array;
use crate::closure::check_wrap_function;
use crate::dispatch::{try_dispatch_opt, MAX_PROTOTYPE_DEPTH};
use crate::error::{RuntimeError, RuntimeResult};
use crate::object::ObjectHandle;
use crate::ops::{to_integer, value_eq};
use crate::prototype::implicit_prototype;
use crate::value::Value;

/// Outcome of one step in [`walk_chain`].
enum Step<T> {
    /// The step resolved; stop and return this.
    Found(T),
    /// The step hit a wall (e.g. a locked node during a write) — stop
    /// without error and without a result, distinct from simply running
    /// out of chain.
    Wall,
    /// Nothing here; advance to the next prototype.
    Continue,
}

/// Walk the prototype chain starting at `start`, calling `step` at each
/// Object node. Stops (without error) when a non-Object node is reached,
/// when `step` returns [`Step::Found`] or [`Step::Wall`], or when the
/// chain's own links run out. Raises [`RuntimeError::CircularPrototype`]
/// if `MAX_PROTOTYPE_DEPTH` nodes are visited without any of those.
///
/// Every caller already checked `R`'s own fields before reaching here and
/// passes `R`'s prototype as `start` — so `R` itself already spent one
/// node of the depth budget (I2) before this walk begins. The loop bound
/// is `MAX_PROTOTYPE_DEPTH - 1` rather than `MAX_PROTOTYPE_DEPTH` so that
/// `R` plus the prototype nodes visited here never exceed 100 total,
/// matching §8 scenario 5 (a 101-object chain must raise, not a
/// 102-object one).
fn walk_chain<T>(
    start: Value,
    mut step: impl FnMut(&ObjectHandle) -> Step<T>,
) -> RuntimeResult<Option<T>> {
    let mut current = start;
    for _ in 0..MAX_PROTOTYPE_DEPTH - 1 {
        let Value::Object(handle) = &current else {
            return Ok(None);
        };
        match step(handle) {
            Step::Found(t) => return Ok(Some(t)),
            Step::Wall => return Ok(None),
            Step::Continue => {}
        }
        match handle.borrow().explicit_prototype().cloned() {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Err(RuntimeError::circular_prototype(MAX_PROTOTYPE_DEPTH))
}

/// Coerce an Array index key, per §4.3 step 1 / §4.4 step 1: applies only
/// when `key` is Number or Object; other key types are left to the
/// prototype-chain walk (e.g. a `"length"` string key resolves via
/// `ArrayPrototype`, not via this coercion).
fn array_index_key(key: &Value) -> Option<RuntimeResult<i64>> {
    match key {
        Value::Number(_) | Value::Object(_) => Some(to_integer(key)),
        _ => None,
    }
}

/// `get(R, K)` (§4.3).
pub fn get(receiver: &Value, key: &Value) -> RuntimeResult<Value> {
    if let Value::Array(arr) = receiver {
        if let Some(n) = array_index_key(key) {
            let n = n?;
            let len = arr.borrow().len();
            let idx = array::normalize_index(n, len)?;
            return Ok(arr.borrow()[idx].clone());
        }
    }

    if let Value::Object(handle) = receiver {
        if let Some(v) = handle.borrow().get_own(key) {
            return Ok(check_wrap_function(v, receiver));
        }
    }

    let hit = walk_chain(implicit_prototype(receiver), |handle| {
        match handle.borrow().get_own(key) {
            Some(v) => Step::Found(v),
            None => Step::Continue,
        }
    })?;
    if let Some(v) = hit {
        return Ok(check_wrap_function(v, receiver));
    }

    if matches!(receiver, Value::Object(_)) {
        if let Some(result) = try_dispatch_opt(receiver, "__get", &[receiver.clone(), key.clone()])? {
            return Ok(check_wrap_function(result, receiver));
        }
    }

    Ok(Value::Undefined)
}

/// `set(R, K, V)` (§4.4).
pub fn set(receiver: &Value, key: Value, value: Value) -> RuntimeResult<()> {
    if let Value::Array(arr) = receiver {
        if let Some(n) = array_index_key(&key) {
            let n = n?;
            let len = arr.borrow().len();
            let idx = array::normalize_index(n, len)?;
            arr.borrow_mut()[idx] = value;
            return Ok(());
        }
    }

    if let Value::Object(handle) = receiver {
        if handle.borrow().contains_own(&key) {
            return handle.borrow_mut().set_own(key, value);
        }
    }

    let wrote = walk_chain(implicit_prototype(receiver), |handle| {
        if !handle.borrow().contains_own(&key) {
            return Step::Continue;
        }
        if handle.borrow().is_locked() {
            Step::Wall
        } else {
            handle.borrow_mut().set_own_unchecked(key.clone(), value.clone());
            Step::Found(())
        }
    })?;
    if wrote.is_some() {
        return Ok(());
    }

    let Value::Object(handle) = receiver else {
        return Err(RuntimeError::cant_create_field(receiver.type_name(), &key));
    };
    if handle.borrow().is_locked() {
        return Err(RuntimeError::ObjectIsLocked);
    }

    if try_dispatch_opt(receiver, "__set", &[receiver.clone(), key.clone(), value.clone()])?.is_some() {
        return Ok(());
    }

    handle.borrow_mut().set_own_unchecked(key, value);
    Ok(())
}

/// `contains(R, K)` / the `in` operator (§4.8, §6): "key presence" for an
/// Object means *own* key presence only — §4.8 describes no prototype
/// walk for containment, unlike §4.3's explicit indexer walk — falling
/// back to `__in` on miss.
pub fn contains(needle: &Value, container: &Value) -> RuntimeResult<bool> {
    match container {
        Value::String(haystack) => match needle {
            Value::String(n) => Ok(haystack.contains(n.as_ref())),
            _ => Err(RuntimeError::cant_use_operator(
                "in",
                needle.type_name(),
                container.type_name(),
            )),
        },
        Value::Array(arr) => {
            let items: Vec<Value> = arr.borrow().clone();
            for item in &items {
                if value_eq(needle, item)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Value::Object(handle) => {
            if handle.borrow().contains_own(needle) {
                return Ok(true);
            }
            if let Some(result) =
                try_dispatch_opt(container, "__in", &[container.clone(), needle.clone()])?
            {
                return Ok(result.is_truthy());
            }
            Ok(false)
        }
        _ => Err(RuntimeError::cant_use_operator(
            "in",
            needle.type_name(),
            container.type_name(),
        )),
    }
}
