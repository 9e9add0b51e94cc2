//! Metadispatch (§4.10): the internal prototype walk used by operators to
//! invoke a named metamethod, kept deliberately separate from the Indexer.
//!
//! The direct walk here must never recurse into [`crate::index::get`]:
//! doing so would infinite-loop the moment an object defines `__get`,
//! since looking up `__get` itself would trigger another `__get` lookup.
//! Keeping the two walks separate is the whole point of this module.

use crate::closure::check_wrap_function;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// The depth cap shared with the Indexer (§3, I2): both walks stop a
/// malformed or cyclic prototype chain from hanging the interpreter.
pub const MAX_PROTOTYPE_DEPTH: usize = 100;

/// `try_dispatch(R, name, args)` (§4.10).
///
/// Returns `Ok((true, result))` if `name` resolved to a callable
/// somewhere in `R`'s own fields or prototype chain and was invoked;
/// `Ok((false, Undefined))` if no node in the walk defines `name` (or the
/// walk exceeded the depth cap without finding one — Metadispatch fails
/// open rather than reporting `CircularPrototype` a second time, since
/// the Indexer's own, separate walk is the one that owns that error);
/// `Err` if `name` was found but the node that owns it has no attached
/// Executor to invoke it with, or if the invocation itself raised.
pub fn try_dispatch(receiver: &Value, name: &'static str, args: &[Value]) -> RuntimeResult<(bool, Value)> {
    if !matches!(receiver, Value::Object(_)) {
        return Ok((false, Value::Undefined));
    }

    let key = Value::string(name);
    let mut current = receiver.clone();
    for _ in 0..MAX_PROTOTYPE_DEPTH {
        let Value::Object(handle) = &current else {
            break;
        };
        let (hit, next) = {
            let obj = handle.borrow();
            (
                obj.get_own(&key).map(|callable| (callable, obj.state())),
                obj.explicit_prototype().cloned(),
            )
        };
        if let Some((callable, state)) = hit {
            let wrapped = check_wrap_function(callable, receiver);
            let state = state.ok_or(RuntimeError::MetamethodRequiresState { method: name })?;
            let result = state.call(&wrapped, args)?;
            return Ok((true, result));
        }
        match next {
            Some(proto) => current = proto,
            None => break,
        }
    }
    Ok((false, Value::Undefined))
}

/// Convenience: dispatch a metamethod and treat "not found" as `None`,
/// since most callers only care about the result once a hit occurred.
pub fn try_dispatch_opt(
    receiver: &Value,
    name: &'static str,
    args: &[Value],
) -> RuntimeResult<Option<Value>> {
    let (hit, result) = try_dispatch(receiver, name, args)?;
    Ok(hit.then_some(result))
}
