//! Dynamic value representation and metaobject dispatch core
//!
//! This crate provides the tagged universal value used throughout a small
//! scripting language runtime. It includes:
//!
//! - `Value`, the 8-variant tagged union every script-level value is
//!   represented by
//! - `ObjectData`, the prototype-linked, lockable keyed mapping behind
//!   `Value::Object`
//! - Array storage and index normalization behind `Value::Array`
//! - `Closure`, the callable bundle behind `Value::Function`, including
//!   instance-native auto-binding
//! - The prototype registry (`ValuePrototype`, `ObjectPrototype`, ...)
//! - The Indexer (`get`/`set`/`contains`), the Slice operator, and
//!   Metadispatch, the internal prototype walk operators use to invoke a
//!   metamethod
//! - `RuntimeError` for script-reachable failures and `HostError` for
//!   embedder misuse of this crate's own API
//!
//! The bytecode compiler/executor, standard library bindings, and
//! parsing/lexing/CLI layers of the wider runtime are external
//! collaborators this crate does not implement; it consumes them only
//! through the narrow [`object::Host`] trait.
//!
//! This crate performs no logging of its own: the value/object/indexer hot
//! path stays allocation- and branch-minimal, and every public record type
//! implements `Debug` instead so host-side diagnostics and test failures
//! can render values without this layer writing to a log sink. Logging,
//! where the wider runtime wants it, belongs in the Executor and standard
//! library layers built on top of this crate.

pub mod api;
pub mod array;
pub mod closure;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod object;
pub mod ops;
pub mod prototype;
pub mod slice;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use scriptval::prelude::*;
/// ```
pub mod prelude {
    pub use super::api::{contains, get, lock, set, slice};
    pub use super::closure::Closure;
    pub use super::error::{HostError, HostResult, RuntimeError, RuntimeResult};
    pub use super::object::{Host, ObjectData};
    pub use super::value::Value;
}

pub use prelude::*;
