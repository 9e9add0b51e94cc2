//! The Slice operator (§4.7): uniform subrange/stride extraction over
//! Strings, Arrays, and (via `__slice`) Objects.

use crate::array;
use crate::dispatch::try_dispatch_opt;
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// Normalized, validated slice parameters, ready to drive the emission
/// loop described in §4.7's "Length" paragraph.
struct Normalized {
    start: i64,
    step: i64,
    length: usize,
}

fn normalize(
    start: Option<&Value>,
    end: Option<&Value>,
    step: Option<&Value>,
    len: usize,
) -> RuntimeResult<Normalized> {
    let is_absent_or_falsy = |v: Option<&Value>| v.map(|v| !v.is_truthy()).unwrap_or(true);

    let start_falsy = is_absent_or_falsy(start);
    let end_falsy = is_absent_or_falsy(end);
    let step_falsy = is_absent_or_falsy(step);

    let explicit_step = if step_falsy {
        None
    } else {
        Some(to_i64(step.unwrap())?)
    };

    let fold_negative = |n: i64| -> i64 {
        if n < 0 {
            n + len as i64
        } else {
            n
        }
    };

    // §4.7 special case: an explicit negative step with both endpoints
    // absent/falsy reverses the whole source (`[::-1]`).
    let reversed_default =
        start_falsy && end_falsy && explicit_step.is_some_and(|s| s < 0);

    let (start_n, end_n) = if reversed_default {
        (len.saturating_sub(1) as i64, 0i64)
    } else {
        let s = if start_falsy {
            0
        } else {
            fold_negative(to_i64(start.unwrap())?)
        };
        let e = if end_falsy {
            (len as i64 - 1).max(0)
        } else {
            fold_negative(to_i64(end.unwrap())?)
        };
        (s, e)
    };

    let step_n = explicit_step.unwrap_or(if start_n <= end_n { 1 } else { -1 });

    if step_n == 0 {
        return Err(RuntimeError::SliceStepZero);
    }

    if len > 0 {
        if start_n < 0 || start_n >= len as i64 {
            return Err(RuntimeError::SliceStartBounds {
                start: start_n,
                length: len,
            });
        }
        if end_n < 0 || end_n >= len as i64 {
            return Err(RuntimeError::SliceEndBounds {
                end: end_n,
                length: len,
            });
        }
    } else if start_n != 0 || end_n != 0 {
        // Empty source with explicit non-default endpoints still bounds-checks.
        return Err(RuntimeError::SliceStartBounds {
            start: start_n,
            length: len,
        });
    }

    if step_n > 0 && start_n > end_n {
        return Err(RuntimeError::SliceInvalid {
            start: start_n,
            end: end_n,
            step: step_n,
        });
    }
    if step_n < 0 && start_n < end_n {
        return Err(RuntimeError::SliceInvalid {
            start: start_n,
            end: end_n,
            step: step_n,
        });
    }

    if len == 0 {
        return Ok(Normalized {
            start: start_n,
            step: step_n,
            length: 0,
        });
    }

    let range = end_n - start_n + step_n.signum();
    let mut length = range / step_n;
    if range % step_n != 0 {
        length += 1;
    }
    let length = length.max(0) as usize;

    Ok(Normalized {
        start: start_n,
        step: step_n,
        length,
    })
}

fn to_i64(v: &Value) -> RuntimeResult<i64> {
    crate::ops::to_integer(v)
}

/// `slice(R, start?, end?, step?)` (§4.7).
pub fn slice(
    receiver: &Value,
    start: Option<&Value>,
    end: Option<&Value>,
    step: Option<&Value>,
) -> RuntimeResult<Value> {
    match receiver {
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let n = normalize(start, end, step, chars.len())?;
            let mut out = String::with_capacity(n.length);
            let mut idx = n.start;
            for _ in 0..n.length {
                out.push(chars[idx as usize]);
                idx += n.step;
            }
            Ok(Value::string(out))
        }
        Value::Array(arr) => {
            let items = arr.borrow();
            let n = normalize(start, end, step, items.len())?;
            let mut out = Vec::with_capacity(n.length);
            let mut idx = n.start;
            for _ in 0..n.length {
                out.push(items[idx as usize].clone());
                idx += n.step;
            }
            drop(items);
            Ok(Value::Array(array::from_vec(out)))
        }
        Value::Object(_) => {
            let args = [
                receiver.clone(),
                start.cloned().unwrap_or(Value::Undefined),
                end.cloned().unwrap_or(Value::Undefined),
                step.cloned().unwrap_or(Value::Undefined),
            ];
            match try_dispatch_opt(receiver, "__slice", &args)? {
                Some(result) => Ok(result),
                None => Err(RuntimeError::SliceMissingMethod),
            }
        }
        other => Err(RuntimeError::SliceWrongType(other.type_name())),
    }
}
