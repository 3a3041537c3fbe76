//! Hash containers used by the registry and the delegate cache.
//!
//! - [`HashMap`] / [`HashSet`]: `hashbrown` containers with a fixed `foldhash` state,
//!   so iteration order only depends on the inserted keys.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId) with a no-op hasher
//!   and a write-once insertion API.

// -----------------------------------------------------------------------------
// Modules

mod hasher;
mod typeid_map;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, NoOpHashState, NoOpHasher};
pub use typeid_map::{Occupied, TypeIdMap};

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;
