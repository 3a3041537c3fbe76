//! Delegate compilation.
//!
//! Every serializable type gets a [`Delegate`]: a pair of closures that
//! serialize a value into a [`Node`](crate::Node) and back. Delegates are
//! compiled once, dependency-first, and stored in the write-once
//! [`DelegateCache`].
//!
//! - Primitive types: leaf delegates from their [`TextCodec`](crate::registry::TextCodec).
//! - Composite types: one sub-delegate per slot, or user hooks when
//!   serialization or deserialization is overridden.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod compiler;
mod delegate;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use cache::DelegateCache;
pub use delegate::{Delegate, Delegates, DeserializeFn, SerializeFn};

pub(crate) use compiler::{Compiled, Compiler};
pub(crate) use delegate::{erase_deserializer, erase_serializer, take};
