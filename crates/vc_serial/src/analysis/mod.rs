//! The analysis phases of initialization.
//!
//! ## Menu
//!
//! - [`classify`]: assigns a [`Serializability`](crate::Serializability) to every registered type.
//! - [`extract`]: records the slots and sub-types of every serializable type.
//! - [`containment`]: checks sub-type categories against the containment table.
//! - [`DependencyGraph`]: the edges between composite types.
//! - [`layering`]: orders composite types into dependency-first layers.

// -----------------------------------------------------------------------------
// Modules

pub mod classify;
pub mod containment;
pub mod extract;
pub mod layering;

mod graph;

// -----------------------------------------------------------------------------
// Exports

pub use classify::Classification;
pub use extract::extract_all;
pub use graph::DependencyGraph;
