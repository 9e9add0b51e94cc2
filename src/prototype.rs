//! Prototype registry and the prototype accessor (§3, §4.6).
//!
//! Six process-wide, locked Objects form a DAG rooted at `ValuePrototype`:
//! `ObjectPrototype` inherits from `ValuePrototype`; `ArrayPrototype`,
//! `NumberPrototype`, `StringPrototype`, and `FunctionPrototype` inherit
//! from `ValuePrototype` directly. They are built bottom-up and locked
//! before any user `Value` can observe them.
//!
//! Given the single-threaded-cooperative concurrency model (§5), the
//! registry is a `thread_local`, not a process-global `static`: `Rc` is
//! not `Sync`, and there is no cross-thread sharing to design for.

use std::cell::RefCell;

use crate::error::{RuntimeError, RuntimeResult};
use crate::object::ObjectData;
use crate::value::Value;

struct Registry {
    value_prototype: Value,
    object_prototype: Value,
    array_prototype: Value,
    number_prototype: Value,
    string_prototype: Value,
    function_prototype: Value,
}

impl Registry {
    fn init() -> Self {
        let value_handle = ObjectData::new_handle();
        value_handle.borrow_mut().lock();
        let value_prototype = Value::Object(value_handle);

        let make_child = |parent: &Value| {
            let handle = ObjectData::new_handle();
            handle
                .borrow_mut()
                .set_explicit_prototype(Some(parent.clone()));
            handle.borrow_mut().lock();
            Value::Object(handle)
        };

        Registry {
            object_prototype: make_child(&value_prototype),
            array_prototype: make_child(&value_prototype),
            number_prototype: make_child(&value_prototype),
            string_prototype: make_child(&value_prototype),
            function_prototype: make_child(&value_prototype),
            value_prototype,
        }
    }
}

thread_local! {
    static REGISTRY: RefCell<Option<Registry>> = const { RefCell::new(None) };
}

fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    REGISTRY.with(|cell| {
        if cell.borrow().is_none() {
            *cell.borrow_mut() = Some(Registry::init());
        }
        f(cell.borrow().as_ref().expect("registry just initialized"))
    })
}

/// The `ValuePrototype` singleton.
pub fn value_prototype() -> Value {
    with_registry(|r| r.value_prototype.clone())
}

/// The `ObjectPrototype` singleton.
pub fn object_prototype() -> Value {
    with_registry(|r| r.object_prototype.clone())
}

/// The `ArrayPrototype` singleton.
pub fn array_prototype() -> Value {
    with_registry(|r| r.array_prototype.clone())
}

/// The `NumberPrototype` singleton.
pub fn number_prototype() -> Value {
    with_registry(|r| r.number_prototype.clone())
}

/// The `StringPrototype` singleton.
pub fn string_prototype() -> Value {
    with_registry(|r| r.string_prototype.clone())
}

/// The `FunctionPrototype` singleton.
pub fn function_prototype() -> Value {
    with_registry(|r| r.function_prototype.clone())
}

/// The implicit prototype for a receiver, per §4.6's read rules:
/// Object uses its explicit prototype if any, else `ObjectPrototype`;
/// every other variant uses its fixed registry prototype.
pub fn implicit_prototype(receiver: &Value) -> Value {
    match receiver {
        Value::Object(handle) => handle
            .borrow()
            .explicit_prototype()
            .cloned()
            .unwrap_or_else(object_prototype),
        Value::Array(_) => array_prototype(),
        Value::Number(_) => number_prototype(),
        Value::String(_) => string_prototype(),
        Value::Function(_) => function_prototype(),
        Value::Undefined | Value::Null | Value::True | Value::False => value_prototype(),
    }
}

/// Read the `prototype` property (§4.6). Never fails: every `Value` has
/// a well-defined prototype, even non-Objects.
pub fn get_prototype(receiver: &Value) -> Value {
    implicit_prototype(receiver)
}

/// Write the `prototype` property (§4.6). Only valid on Object receivers.
///
/// - `Undefined` (or `None`) clears the explicit prototype so the default
///   (`ObjectPrototype`) applies again.
/// - `Null` pins the prototype to `ValuePrototype`.
/// - Any other non-Object value fails with [`RuntimeError::PrototypeWrongType`].
pub fn set_prototype(receiver: &Value, new_prototype: Option<Value>) -> RuntimeResult<()> {
    let Value::Object(handle) = receiver else {
        return Err(RuntimeError::PrototypeWrongType(receiver.type_name()));
    };
    if handle.borrow().is_locked() {
        return Err(RuntimeError::ObjectIsLocked);
    }
    let resolved = match new_prototype {
        None | Some(Value::Undefined) => None,
        Some(Value::Null) => Some(value_prototype()),
        Some(Value::Object(o)) => Some(Value::Object(o)),
        Some(other) => return Err(RuntimeError::PrototypeWrongType(other.type_name())),
    };
    handle.borrow_mut().set_explicit_prototype(resolved);
    Ok(())
}
