//! Host-facing API (§6): the surface an embedder (the bytecode executor,
//! the standard library, host-language interop) drives this crate through.
//!
//! Most of this module is a thin, single-place re-export of the pieces
//! implemented by [`crate::index`], [`crate::slice`], and [`crate::ops`] —
//! collecting `Construct`/`Index`/`Slice`/`Contains`/`Equality`/`Ordering`/
//! `Hash`/`String` under the names §6 gives them so a caller reads the API
//! from one module instead of hunting across the crate. `Lock`,
//! `Prototype`, `UserData`, and `AsDictionary`/`AsList` are new here: they
//! guard host-contract violations (§7, final paragraph) with
//! [`HostError`] rather than [`RuntimeError`], since calling `as_dictionary`
//! on a `Value::Number` is a bug in the embedder, not something a running
//! script can trigger.

use crate::array::ArrayHandle;
use crate::error::{HostError, HostResult, RuntimeResult};
use crate::object::ObjectHandle;
use crate::value::Value;
use std::any::Any;
use std::rc::Rc;

/// `Construct`: the String variant (§4.1, §6). Rejects an absent payload
/// with [`HostError::ArgumentError`] — this is the host-facing entry
/// point §4.1 describes; [`crate::value::Value::string`] itself takes a
/// mandatory Rust string and cannot observe "absent".
pub fn construct_string(payload: Option<&str>) -> HostResult<Value> {
    match payload {
        Some(s) => Ok(Value::string(s)),
        None => Err(HostError::ArgumentError(
            "String construction requires a payload".to_string(),
        )),
    }
}

/// `Construct`: the Number variant (§4.1, §6).
pub fn construct_number(n: f64) -> Value {
    Value::number(n)
}

/// `Construct`: the boolean singletons (§4.1, §6).
pub fn construct_boolean(b: bool) -> Value {
    Value::boolean(b)
}

/// `Construct`: a fresh, empty Array (§4.1, §6).
pub fn construct_array() -> Value {
    Value::array(crate::array::new_handle())
}

/// `Construct`: a fresh, empty Object (§4.1, §6).
pub fn construct_object() -> Value {
    Value::object(crate::object::ObjectData::new_handle())
}

/// `Construct`: a Function wrapping a native host function (§4.1, §6).
pub fn construct_native_function(
    f: impl Fn(&dyn crate::object::Host, &[Value]) -> RuntimeResult<Value> + 'static,
) -> Value {
    Value::function(crate::closure::Closure::native(f))
}

/// `Construct`: a Function wrapping an instance-native host function,
/// which auto-binds to its receiver on read (§4.1, §4.5, §6).
pub fn construct_instance_native_function(
    f: impl Fn(&dyn crate::object::Host, &Value, &[Value]) -> RuntimeResult<Value> + 'static,
) -> Value {
    Value::function(crate::closure::Closure::instance_native(f))
}

/// `get(R, K) → V` (§4.3, §6).
pub fn get(receiver: &Value, key: &Value) -> RuntimeResult<Value> {
    crate::index::get(receiver, key)
}

/// `set(R, K, V)` (§4.4, §6).
pub fn set(receiver: &Value, key: Value, value: Value) -> RuntimeResult<()> {
    crate::index::set(receiver, key, value)
}

/// `slice(R, start?, end?, step?) → V` (§4.7, §6).
pub fn slice(
    receiver: &Value,
    start: Option<&Value>,
    end: Option<&Value>,
    step: Option<&Value>,
) -> RuntimeResult<Value> {
    crate::slice::slice(receiver, start, end, step)
}

/// `contains(R, K) → bool`, the `in` operator (§4.8, §6).
pub fn contains(needle: &Value, container: &Value) -> RuntimeResult<bool> {
    crate::index::contains(needle, container)
}

/// Script-level equality, routed through `__eq` on Object receivers (§4.9, §6).
pub fn value_eq(a: &Value, b: &Value) -> RuntimeResult<bool> {
    crate::ops::value_eq(a, b)
}

/// Three-way compare, `None` when the pair has no defined order (§4.9, §6).
pub fn compare(a: &Value, b: &Value) -> RuntimeResult<Option<i32>> {
    crate::ops::compare(a, b)
}

/// Hash a value, routed through `__hash` on Object receivers (§4.9, §6).
pub fn value_hash(value: &Value) -> RuntimeResult<u64> {
    crate::ops::value_hash(value)
}

/// Stringify a value, routed through `__string` on Object receivers (§4.9, §6).
pub fn stringify(value: &Value) -> RuntimeResult<Rc<str>> {
    crate::ops::stringify(value)
}

/// Read the `prototype` accessor (§4.6, §6). Never fails.
pub fn get_prototype(receiver: &Value) -> Value {
    crate::prototype::get_prototype(receiver)
}

/// Write the `prototype` accessor (§4.6, §6). Object receivers only.
pub fn set_prototype(receiver: &Value, new_prototype: Option<Value>) -> RuntimeResult<()> {
    crate::prototype::set_prototype(receiver, new_prototype)
}

/// `Lock`: set the monotonic lock flag on an Object (§5, §6).
///
/// Fails with [`HostError::WrongVariant`] when called on a non-Object —
/// locking is only ever meaningful for Objects, so attempting it on, say,
/// a `Value::Number` is an embedder bug rather than a reachable script
/// failure, and gets the host-contract error type rather than a
/// [`RuntimeError`].
pub fn lock(receiver: &Value) -> HostResult<()> {
    let handle = as_dictionary(receiver)?;
    handle.borrow_mut().lock();
    Ok(())
}

/// `true` once [`lock`] has been called on this Object.
pub fn is_locked(receiver: &Value) -> HostResult<bool> {
    let handle = as_dictionary(receiver)?;
    Ok(handle.borrow().is_locked())
}

/// `UserData` read accessor (§3, §6). Object only.
pub fn user_data(receiver: &Value) -> HostResult<Option<Rc<dyn Any>>> {
    let handle = as_dictionary(receiver)?;
    Ok(handle.borrow().user_data())
}

/// `UserData` write accessor (§3, §6). Object only.
pub fn set_user_data(receiver: &Value, data: Rc<dyn Any>) -> HostResult<()> {
    let handle = as_dictionary(receiver)?;
    handle.borrow_mut().set_user_data(data);
    Ok(())
}

/// `AsDictionary`: direct handle to the underlying Object map for host
/// iteration (§6). Fails with [`HostError::WrongVariant`] on any other
/// variant.
pub fn as_dictionary(receiver: &Value) -> HostResult<ObjectHandle> {
    receiver
        .as_object()
        .cloned()
        .ok_or_else(|| HostError::WrongVariant {
            expected: "Object",
            actual: receiver.type_name(),
        })
}

/// `AsList`: direct handle to the underlying Array storage for host
/// iteration (§6). Fails with [`HostError::WrongVariant`] on any other
/// variant.
pub fn as_list(receiver: &Value) -> HostResult<ArrayHandle> {
    receiver
        .as_array()
        .cloned()
        .ok_or_else(|| HostError::WrongVariant {
            expected: "Array",
            actual: receiver.type_name(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectData;

    #[test]
    fn lock_rejects_non_object() {
        let err = lock(&Value::Number(1.0)).unwrap_err();
        assert!(matches!(err, HostError::WrongVariant { .. }));
    }

    #[test]
    fn lock_sets_flag_on_object() {
        let obj = Value::Object(ObjectData::new_handle());
        assert!(!is_locked(&obj).unwrap());
        lock(&obj).unwrap();
        assert!(is_locked(&obj).unwrap());
    }

    #[test]
    fn as_dictionary_rejects_wrong_variant() {
        let err = as_dictionary(&Value::string("x")).unwrap_err();
        assert!(matches!(
            err,
            HostError::WrongVariant {
                expected: "Object",
                ..
            }
        ));
    }

    #[test]
    fn as_list_accepts_array() {
        let arr = Value::Array(crate::array::from_vec(vec![Value::Number(1.0)]));
        let handle = as_list(&arr).unwrap();
        assert_eq!(handle.borrow().len(), 1);
    }

    #[test]
    fn construct_string_rejects_absent_payload() {
        let err = construct_string(None).unwrap_err();
        assert!(matches!(err, HostError::ArgumentError(_)));
        assert_eq!(
            construct_string(Some("hi")).unwrap().as_str(),
            Some("hi")
        );
    }

    #[test]
    fn construct_native_function_auto_binds_when_instance_native() {
        let f = construct_instance_native_function(|_state, receiver, _args| Ok(receiver.clone()));
        let obj = construct_object();
        let bound = crate::closure::check_wrap_function(f, &obj);
        assert!(matches!(bound, Value::Function(_)));
    }

    #[test]
    fn user_data_roundtrip() {
        let obj = Value::Object(ObjectData::new_handle());
        assert!(user_data(&obj).unwrap().is_none());
        set_user_data(&obj, Rc::new(42i32)).unwrap();
        let data = user_data(&obj).unwrap().unwrap();
        assert_eq!(*data.downcast::<i32>().unwrap(), 42);
    }
}
