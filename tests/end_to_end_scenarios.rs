//! Whole-program scenarios against a minimal test-only `Host` stand-in for
//! the Executor collaborator (§8, end-to-end scenarios 1-6).

use std::rc::Rc;

use scriptval::array::from_vec;
use scriptval::closure::Closure;
use scriptval::error::{RuntimeError, RuntimeResult};
use scriptval::object::{Host, ObjectData};
use scriptval::value::Value;
use scriptval::{api, ops};

/// An Executor stand-in that only knows how to invoke `Native` closures.
/// Good enough to exercise metamethod dispatch end to end without a real
/// bytecode interpreter.
struct TestHost;

impl Host for TestHost {
    fn call(&self, callable: &Value, args: &[Value]) -> RuntimeResult<Value> {
        let Value::Function(handle) = callable else {
            panic!("metamethod callable must be a Function");
        };
        handle
            .call_native(self, args)
            .expect("test scenarios only install Native/InstanceNative closures")
    }
}

#[test]
fn scenario_1_prototype_read_through_rebinds_instance_native() {
    let proto = ObjectData::new_handle();
    let greet = Closure::instance_native(|_state, receiver, _args| {
        api::get(receiver, &Value::string("name"))
    });
    proto
        .borrow_mut()
        .set_own_unchecked(Value::string("greet"), Value::Function(Rc::clone(&greet)));
    proto.borrow_mut().lock();

    let obj_handle = ObjectData::new_handle();
    obj_handle
        .borrow_mut()
        .set_own_unchecked(Value::string("name"), Value::string("x"));
    obj_handle
        .borrow_mut()
        .set_explicit_prototype(Some(Value::Object(proto)));
    let obj = Value::Object(obj_handle);

    let bound = api::get(&obj, &Value::string("greet")).unwrap();
    let Value::Function(bound_handle) = &bound else {
        panic!("expected Function")
    };
    assert!(
        !Rc::ptr_eq(bound_handle, &greet),
        "get must rebind InstanceNative to a fresh Native handle"
    );

    let host = TestHost;
    let result = bound_handle.call_native(&host, &[]).unwrap().unwrap();
    assert_eq!(result.as_str(), Some("x"));
}

#[test]
fn scenario_2_locked_wall_creates_own_field() {
    let proto = ObjectData::new_handle();
    proto
        .borrow_mut()
        .set_own_unchecked(Value::string("a"), Value::Number(1.0));
    proto.borrow_mut().lock();
    let proto_value = Value::Object(proto);

    let obj_handle = ObjectData::new_handle();
    obj_handle
        .borrow_mut()
        .set_explicit_prototype(Some(proto_value.clone()));
    let obj = Value::Object(obj_handle.clone());

    api::set(&obj, Value::string("a"), Value::Number(2.0)).unwrap();

    assert_eq!(
        obj_handle
            .borrow()
            .get_own(&Value::string("a"))
            .unwrap()
            .as_number(),
        Some(2.0)
    );
    assert_eq!(
        api::get(&proto_value, &Value::string("a")).unwrap().as_number(),
        Some(1.0)
    );
}

#[test]
fn scenario_3_slice_edges() {
    let arr = Value::Array(from_vec(
        (1..=5).map(|n| Value::Number(n as f64)).collect(),
    ));

    let reversed = api::slice(&arr, None, None, Some(&Value::Number(-1.0))).unwrap();
    let Value::Array(handle) = &reversed else {
        panic!("expected Array")
    };
    let values: Vec<f64> = handle.borrow().iter().map(|v| v.as_number().unwrap()).collect();
    assert_eq!(values, vec![5.0, 4.0, 3.0, 2.0, 1.0]);

    let stride = api::slice(
        &arr,
        Some(&Value::Number(0.0)),
        Some(&Value::Number(4.0)),
        Some(&Value::Number(2.0)),
    )
    .unwrap();
    let Value::Array(handle) = &stride else {
        panic!("expected Array")
    };
    let values: Vec<f64> = handle.borrow().iter().map(|v| v.as_number().unwrap()).collect();
    assert_eq!(values, vec![1.0, 3.0, 5.0]);

    let err = api::slice(
        &arr,
        Some(&Value::Number(0.0)),
        Some(&Value::Number(4.0)),
        Some(&Value::Number(0.0)),
    )
    .unwrap_err();
    assert!(matches!(err, RuntimeError::SliceStepZero));
}

#[test]
fn scenario_4_metadispatch_does_not_recurse_through_get() {
    let handle = ObjectData::new_handle();
    {
        let mut obj = handle.borrow_mut();
        obj.set_own_unchecked(Value::string("x"), Value::string("stored"));
        obj.set_own_unchecked(
            Value::string("__get"),
            Value::Function(Closure::native(|_state, args| {
                let receiver = &args[0];
                api::get(receiver, &Value::string("x"))
            })),
        );
        obj.set_state(Rc::new(TestHost));
    }
    let obj = Value::Object(handle);

    let result = api::get(&obj, &Value::string("y")).unwrap();
    assert_eq!(result.as_str(), Some("stored"));
}

#[test]
fn scenario_5_cycle_cap_raises_circular_prototype() {
    let handles: Vec<_> = (0..101).map(|_| ObjectData::new_handle()).collect();
    for i in 0..100 {
        handles[i]
            .borrow_mut()
            .set_explicit_prototype(Some(Value::Object(handles[i + 1].clone())));
    }
    let root = Value::Object(handles[0].clone());
    let err = api::get(&root, &Value::string("nonexistent")).unwrap_err();
    assert!(matches!(err, RuntimeError::CircularPrototype { .. }));
}

#[test]
fn scenario_6_equality_semantics() {
    let a = Value::Object(ObjectData::new_handle());
    let b = Value::Object(ObjectData::new_handle());
    assert!(!ops::value_eq(&a, &b).unwrap());

    let handle = ObjectData::new_handle();
    {
        let mut obj = handle.borrow_mut();
        obj.set_own_unchecked(
            Value::string("__eq"),
            Value::Function(Closure::native(|_s, _a| Ok(Value::True))),
        );
        obj.set_state(Rc::new(TestHost));
    }
    let with_eq = Value::Object(handle);
    assert!(ops::value_eq(&with_eq, &b).unwrap());

    assert!(ops::value_eq(&Value::Number(1.0), &Value::Number(1.0)).unwrap());
    let nan = Value::Number(f64::NAN);
    assert!(!ops::value_eq(&nan, &nan).unwrap());
}

#[test]
fn properties_get_set_contains_roundtrip() {
    let obj = Value::Object(ObjectData::new_handle());
    api::set(&obj, Value::string("k"), Value::Number(7.0)).unwrap();
    assert_eq!(api::get(&obj, &Value::string("k")).unwrap().as_number(), Some(7.0));
    assert!(api::contains(&Value::string("k"), &obj).unwrap());
}

#[test]
fn locked_object_rejects_any_mutation() {
    let obj = Value::Object(ObjectData::new_handle());
    api::lock(&obj).unwrap();
    let err = api::set(&obj, Value::string("k"), Value::Number(1.0)).unwrap_err();
    assert!(matches!(err, RuntimeError::ObjectIsLocked));
    let err = api::set_prototype(&obj, Some(Value::Null)).unwrap_err();
    assert!(matches!(err, RuntimeError::ObjectIsLocked));
}

#[test]
fn non_object_prototypes_are_locked_registry_members() {
    for v in [
        Value::Undefined,
        Value::Null,
        Value::True,
        Value::False,
        Value::Number(1.0),
        Value::string("s"),
    ] {
        let proto = api::get_prototype(&v);
        let handle = api::as_dictionary(&proto).expect("prototype must be Object");
        assert!(handle.borrow().is_locked());
    }
}

#[test]
fn full_slice_round_trips_source() {
    let arr = Value::Array(from_vec(
        (1..=5).map(|n| Value::Number(n as f64)).collect(),
    ));
    let copy = api::slice(
        &arr,
        Some(&Value::Number(0.0)),
        Some(&Value::Number(4.0)),
        Some(&Value::Number(1.0)),
    )
    .unwrap();
    let Value::Array(handle) = &copy else {
        panic!("expected Array")
    };
    let values: Vec<f64> = handle.borrow().iter().map(|v| v.as_number().unwrap()).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}
