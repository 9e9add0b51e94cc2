//! Closure record: the callable bundle behind `Value::Function`.
//!
//! A Closure is one of three kinds (§3):
//! - `Script`: a compiled function plus captured environment. The
//!   compiler/executor is an external collaborator (§1), so the compiled
//!   payload is modeled as an opaque `'static` handle the host recognizes;
//!   this core never interprets it.
//! - `Native`: a host function taking `(state, args)`.
//! - `InstanceNative`: a host function taking `(state, receiver, args)`,
//!   transparently bound to its receiver on read (§4.5).

use std::any::Any;
use std::rc::Rc;

use crate::error::RuntimeResult;
use crate::object::Host;
use crate::value::Value;

/// Shared handle to a [`Closure`].
pub type FunctionHandle = Rc<Closure>;

type NativeFn = dyn Fn(&dyn Host, &[Value]) -> RuntimeResult<Value>;
type InstanceNativeFn = dyn Fn(&dyn Host, &Value, &[Value]) -> RuntimeResult<Value>;

/// A compiled script function plus its captured environment.
///
/// `compiled` is opaque to this crate: the Executor that produced it is
/// the only party that knows how to run it, identified back by
/// downcasting through [`Any`].
pub struct ScriptFunction {
    /// Host-supplied compiled-function payload.
    pub compiled: Rc<dyn Any>,
    /// Captured values from the enclosing environment, in capture order.
    pub captured: Vec<Value>,
}

impl std::fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptFunction")
            .field("captured", &self.captured.len())
            .finish_non_exhaustive()
    }
}

/// The callable bundle behind `Value::Function` (§3).
pub enum Closure {
    /// Compiled function + captured environment.
    Script(ScriptFunction),
    /// Host function taking `(state, args)`.
    Native(Rc<NativeFn>),
    /// Host function taking `(state, receiver, args)`; auto-binds on read.
    InstanceNative(Rc<InstanceNativeFn>),
}

impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(self.kind_name()).finish()
    }
}

impl Closure {
    /// Construct a `Script` closure.
    pub fn script(compiled: Rc<dyn Any>, captured: Vec<Value>) -> FunctionHandle {
        Rc::new(Closure::Script(ScriptFunction { compiled, captured }))
    }

    /// Construct a `Native` closure from a Rust closure/fn.
    pub fn native(
        f: impl Fn(&dyn Host, &[Value]) -> RuntimeResult<Value> + 'static,
    ) -> FunctionHandle {
        Rc::new(Closure::Native(Rc::new(f)))
    }

    /// Construct an `InstanceNative` closure from a Rust closure/fn.
    pub fn instance_native(
        f: impl Fn(&dyn Host, &Value, &[Value]) -> RuntimeResult<Value> + 'static,
    ) -> FunctionHandle {
        Rc::new(Closure::InstanceNative(Rc::new(f)))
    }

    /// Short name for this closure's kind, used in `Value`'s `Debug` impl.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Closure::Script(_) => "Script",
            Closure::Native(_) => "Native",
            Closure::InstanceNative(_) => "InstanceNative",
        }
    }

    /// Invoke this closure directly (no auto-binding). `Script` closures
    /// cannot be invoked by this crate alone — running compiled code is
    /// the Executor's job — so this returns `None` for that kind; callers
    /// invoke `Script` closures through `Host::call` instead, which the
    /// Executor implements.
    pub fn call_native(&self, state: &dyn Host, args: &[Value]) -> Option<RuntimeResult<Value>> {
        match self {
            Closure::Native(f) => Some(f(state, args)),
            Closure::Script(_) | Closure::InstanceNative(_) => None,
        }
    }
}

/// `CheckWrapFunction` (§4.5): if `v` is a Function whose Closure is
/// `InstanceNative`, return a freshly constructed `Native` Function that
/// invokes the original with `receiver` captured. All other values pass
/// through unchanged.
///
/// This must run on every read path (direct field, prototype hit, and
/// `__get` result) so instance methods look identical whether they live
/// on the object itself or on a prototype.
pub fn check_wrap_function(v: Value, receiver: &Value) -> Value {
    let Value::Function(handle) = &v else {
        return v;
    };
    let Closure::InstanceNative(f) = handle.as_ref() else {
        return v;
    };
    let f = Rc::clone(f);
    let bound_receiver = receiver.clone();
    Value::Function(Closure::native(move |state, args| {
        f(state, &bound_receiver, args)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectData;

    struct NullHost;
    impl Host for NullHost {
        fn call(&self, _callable: &Value, _args: &[Value]) -> RuntimeResult<Value> {
            Ok(Value::Undefined)
        }
    }

    #[test]
    fn check_wrap_function_passes_through_non_function() {
        let v = Value::Number(3.0);
        let out = check_wrap_function(v.clone(), &Value::Undefined);
        assert!(out.default_eq(&v));
    }

    #[test]
    fn check_wrap_function_passes_through_native() {
        let f = Closure::native(|_state, _args| Ok(Value::True));
        let v = Value::Function(f.clone());
        let out = check_wrap_function(v, &Value::Undefined);
        match out {
            Value::Function(h) => assert!(Rc::ptr_eq(&h, &f)),
            _ => panic!("expected Function"),
        }
    }

    #[test]
    fn check_wrap_function_binds_instance_native() {
        let f = Closure::instance_native(|_state, receiver, _args| Ok(receiver.clone()));
        let receiver_obj = ObjectData::new_handle();
        receiver_obj
            .borrow_mut()
            .set_own_unchecked(Value::string("name"), Value::string("x"));
        let receiver = Value::Object(receiver_obj);
        let wrapped = check_wrap_function(Value::Function(f), &receiver);
        let Value::Function(wrapped_handle) = wrapped else {
            panic!("expected Function")
        };
        let host = NullHost;
        let result = wrapped_handle
            .call_native(&host, &[])
            .expect("native closure")
            .unwrap();
        match result {
            Value::Object(o) => assert!(Rc::ptr_eq(
                &o,
                receiver.as_object().unwrap()
            )),
            _ => panic!("expected Object"),
        }
    }
}
