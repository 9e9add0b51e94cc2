//! Runtime error types for the value core
//!
//! This module provides the error type that can occur during indexing,
//! slicing, and metamethod dispatch over dynamic values, plus a separate
//! error type for host-contract violations (misuse of this crate's API,
//! as opposed to errors a running script can trigger).

use thiserror::Error;

/// Runtime error type
///
/// Represents errors that can occur during indexing, slicing, equality,
/// hashing, stringification, and metamethod dispatch over [`crate::value::Value`].
/// Every variant is one of the codes named in the component design; there is
/// no catch-all string-only variant.
#[derive(Debug, Error, Clone)]
pub enum RuntimeError {
    /// Array read/write out of range.
    #[error("IndexOutOfBounds: index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// Attempted index (already normalized for negative wraparound).
        index: i64,
        /// Length of the array at the time of access.
        length: usize,
    },

    /// Prototype walk exceeded the depth cap.
    #[error("CircularPrototype: prototype chain exceeded depth limit of {limit}")]
    CircularPrototype {
        /// The depth cap that was exceeded.
        limit: usize,
    },

    /// Mutation attempted on a locked object.
    #[error("ObjectIsLocked: cannot mutate a locked object")]
    ObjectIsLocked,

    /// Write on a non-Object receiver that didn't resolve via array
    /// indexing or a prototype hit.
    #[error("CantCreateField: cannot create field {key:?} on a {receiver_type} value")]
    CantCreateField {
        /// Variant name of the receiver.
        receiver_type: &'static str,
        /// Debug rendering of the key that could not be written.
        key: String,
    },

    /// Slice `start` endpoint out of `[0, len)`.
    #[error("SliceStartBounds: start index {start} out of bounds for length {length}")]
    SliceStartBounds {
        /// Requested start index (post-normalization).
        start: i64,
        /// Length of the sliced source.
        length: usize,
    },

    /// Slice `end` endpoint out of `[0, len)`.
    #[error("SliceEndBounds: end index {end} out of bounds for length {length}")]
    SliceEndBounds {
        /// Requested end index (post-normalization).
        end: i64,
        /// Length of the sliced source.
        length: usize,
    },

    /// Slice `step` was zero.
    #[error("SliceStepZero: slice step must not be zero")]
    SliceStepZero,

    /// Slice `start`/`end`/`step` direction mismatch.
    #[error("SliceInvalid: start {start} and end {end} are incompatible with step {step}")]
    SliceInvalid {
        /// Normalized start index.
        start: i64,
        /// Normalized end index.
        end: i64,
        /// Requested step.
        step: i64,
    },

    /// Slice applied to a receiver variant that doesn't support it.
    #[error("SliceWrongType: cannot slice a {0} value")]
    SliceWrongType(&'static str),

    /// Slice applied to an Object with no `__slice` metamethod.
    #[error("SliceMissingMethod: object has no __slice method")]
    SliceMissingMethod,

    /// A metamethod returned a value of the wrong type for `__hash`.
    #[error("HashWrongType: __hash must return a Number, got {0}")]
    HashWrongType(&'static str),

    /// A metamethod returned a value of the wrong type for `__string`.
    #[error("StringCastWrongType: __string must return a String, got {0}")]
    StringCastWrongType(&'static str),

    /// An operator was applied to a pair of types it does not support.
    #[error("CantUseOperatorOnTypes: cannot use {op} on {lhs} and {rhs}")]
    CantUseOperatorOnTypes {
        /// Name of the operator (e.g. `"in"`, `"=="`).
        op: &'static str,
        /// Variant name of the left-hand (or sole) operand.
        lhs: &'static str,
        /// Variant name of the right-hand operand, if any.
        rhs: &'static str,
    },

    /// Object→integer coercion failed: no `__number` metamethod, or
    /// `__number` returned a non-Number.
    #[error("NumberCastFailed: cannot convert {0} to a Number")]
    NumberCastFailed(&'static str),

    /// Prototype write with a payload that isn't Object/Null/Undefined.
    #[error("PrototypeWrongType: prototype must be Object, Null, or Undefined, got {0}")]
    PrototypeWrongType(&'static str),

    /// A metamethod was found on a node with no attached Executor.
    #[error("MetamethodRequiresState: {method} found but receiver has no attached executor")]
    MetamethodRequiresState {
        /// Name of the metamethod that was found (e.g. `"__get"`).
        method: &'static str,
    },

    /// Error raised by a metamethod invocation itself, propagated
    /// transparently from the attached Executor.
    #[error("{0}")]
    Raised(String),
}

impl RuntimeError {
    /// Build an [`RuntimeError::IndexOutOfBounds`].
    pub fn index_out_of_bounds(index: i64, length: usize) -> Self {
        RuntimeError::IndexOutOfBounds { index, length }
    }

    /// Build a [`RuntimeError::CircularPrototype`] for the standard depth cap.
    pub fn circular_prototype(limit: usize) -> Self {
        RuntimeError::CircularPrototype { limit }
    }

    /// Build a [`RuntimeError::CantCreateField`].
    pub fn cant_create_field(receiver_type: &'static str, key: impl std::fmt::Debug) -> Self {
        RuntimeError::CantCreateField {
            receiver_type,
            key: format!("{key:?}"),
        }
    }

    /// Build a [`RuntimeError::CantUseOperatorOnTypes`] for a binary operator.
    pub fn cant_use_operator(op: &'static str, lhs: &'static str, rhs: &'static str) -> Self {
        RuntimeError::CantUseOperatorOnTypes { op, lhs, rhs }
    }

    /// Build a [`RuntimeError::CantUseOperatorOnTypes`] for a unary operator.
    pub fn cant_use_unary_operator(op: &'static str, operand: &'static str) -> Self {
        RuntimeError::CantUseOperatorOnTypes {
            op,
            lhs: operand,
            rhs: "",
        }
    }
}

/// Result type alias for value-core operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Host-contract violation: misuse of this crate's API by the embedder,
/// as opposed to a [`RuntimeError`] a running script can trigger.
///
/// These are distinct from [`RuntimeError`] per the error handling design:
/// a null input where one is required, or an accessor called against the
/// wrong Value variant, is a programming error in the host, not a
/// reachable script-level failure.
#[derive(Debug, Error, Clone)]
pub enum HostError {
    /// A required argument was absent (e.g. constructing a String with no payload).
    #[error("ArgumentError: {0}")]
    ArgumentError(String),

    /// An accessor (e.g. `AsDictionary`, `AsList`, `UserData`) was called
    /// against a Value of the wrong variant.
    #[error("WrongVariant: expected {expected}, got {actual}")]
    WrongVariant {
        /// Variant name the accessor required.
        expected: &'static str,
        /// Variant name actually supplied.
        actual: &'static str,
    },
}

/// Result type alias for host-facing accessor operations.
pub type HostResult<T> = Result<T, HostError>;
