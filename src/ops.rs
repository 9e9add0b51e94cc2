//! Cross-cutting value operations: numeric coercion, equality, ordering,
//! hashing, and stringification (§4.2, §4.9).
//!
//! Each operation dispatches to a named metamethod on Object receivers
//! and falls back to a primitive rule otherwise, per the uniform pattern
//! described in §4.2. These are the operations whose Object path runs
//! through [`crate::dispatch::try_dispatch`] and therefore belong next to
//! the Indexer rather than inside `value.rs` itself.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::dispatch::try_dispatch_opt;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{MapKey, Value};

/// Object→integer coercion (§4.2): Numbers truncate toward zero; Objects
/// with a `__number` metamethod use its (Number) result; anything else
/// fails with [`RuntimeError::NumberCastFailed`].
pub fn to_integer(value: &Value) -> RuntimeResult<i64> {
    match value {
        Value::Number(n) => Ok(n.trunc() as i64),
        Value::Object(_) => {
            match try_dispatch_opt(value, "__number", &[value.clone()])? {
                Some(Value::Number(n)) => Ok(n.trunc() as i64),
                Some(_) | None => Err(RuntimeError::NumberCastFailed(value.type_name())),
            }
        }
        _ => Err(RuntimeError::NumberCastFailed(value.type_name())),
    }
}

/// Script-level equality (§4.9): `__eq` on an Object left-hand side
/// overrides the default; otherwise falls back to
/// [`Value::default_eq`] (handle identity for Object/Array/Function,
/// by-value for Number/String, by-variant for singletons — NaN is not
/// equal to itself).
pub fn value_eq(a: &Value, b: &Value) -> RuntimeResult<bool> {
    if matches!(a, Value::Object(_)) {
        if let Some(result) = try_dispatch_opt(a, "__eq", &[a.clone(), b.clone()])? {
            return Ok(result.is_truthy());
        }
    }
    Ok(a.default_eq(b))
}

/// Three-way compare (§4.9): returns `0` when `a` and `b` are equal per
/// [`value_eq`]; otherwise falls back to each type's natural ordering
/// (Number via IEEE-754 total order excluding NaN, String
/// lexicographically). Objects consult a `__compare` metamethod
/// (following the `__x` naming convention of `__eq`/`__hash`/`__string`),
/// which must return a Number whose sign is the comparison result.
///
/// Returns `Ok(None)` when the pair has no defined order (mismatched
/// types with no applicable metamethod, or either operand a NaN
/// Number) rather than an error: ordering is a partial relation here,
/// and callers that need a hard failure can map `None` to
/// [`RuntimeError::CantUseOperatorOnTypes`] themselves.
pub fn compare(a: &Value, b: &Value) -> RuntimeResult<Option<i32>> {
    if value_eq(a, b)? {
        return Ok(Some(0));
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x.partial_cmp(y).map(ordering_to_int)),
        (Value::String(x), Value::String(y)) => Ok(Some(ordering_to_int(x.cmp(y)))),
        _ => {
            if matches!(a, Value::Object(_)) {
                if let Some(result) = try_dispatch_opt(a, "__compare", &[a.clone(), b.clone()])? {
                    let Value::Number(n) = result else {
                        return Err(RuntimeError::cant_use_operator(
                            "compare",
                            a.type_name(),
                            b.type_name(),
                        ));
                    };
                    return Ok(Some(n.signum() as i32));
                }
            }
            Ok(None)
        }
    }
}

fn ordering_to_int(o: std::cmp::Ordering) -> i32 {
    match o {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Hash (§4.9): primitives hash their payload; Object optionally routes
/// through `__hash` (must return Number); Array/Function (and Objects
/// with no `__hash`) hash by handle identity. Not required to be stable
/// across processes — this uses [`DefaultHasher`], whose seed and
/// algorithm are unspecified by design.
pub fn value_hash(value: &Value) -> RuntimeResult<u64> {
    if matches!(value, Value::Object(_)) {
        if let Some(result) = try_dispatch_opt(value, "__hash", &[value.clone()])? {
            let Value::Number(n) = result else {
                return Err(RuntimeError::HashWrongType(result.type_name()));
            };
            let mut hasher = DefaultHasher::new();
            n.to_bits().hash(&mut hasher);
            return Ok(hasher.finish());
        }
    }
    let mut hasher = DefaultHasher::new();
    MapKey(value.clone()).hash(&mut hasher);
    Ok(hasher.finish())
}

/// Stringification (§4.9): booleans render as `"true"`/`"false"`,
/// Numbers as round-trip decimal, String is itself, Object routes
/// through `__string` (must return String) or falls back to the
/// literal `"object"`, and everything else renders as its variant name.
pub fn stringify(value: &Value) -> RuntimeResult<Rc<str>> {
    match value {
        Value::True => Ok(Rc::from("true")),
        Value::False => Ok(Rc::from("false")),
        Value::Number(n) => {
            let mut buf = ryu::Buffer::new();
            Ok(Rc::from(buf.format(*n)))
        }
        Value::String(s) => Ok(Rc::clone(s)),
        Value::Object(_) => match try_dispatch_opt(value, "__string", &[value.clone()])? {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(RuntimeError::StringCastWrongType(other.type_name())),
            None => Ok(Rc::from("object")),
        },
        Value::Undefined | Value::Null | Value::Array(_) | Value::Function(_) => {
            Ok(Rc::from(value.type_name()))
        }
    }
}
