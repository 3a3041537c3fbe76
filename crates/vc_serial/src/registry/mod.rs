//! Type registration.
//!
//! Types enter the engine through a [`TypeRegistry`]. Each registered type
//! contributes a [`TypeDescriptor`], built by `#[derive(Serializable)]` or by
//! a manual [`Serializable`] impl, that records everything the
//! initialization pipeline needs: identity, eligibility, capability markers,
//! member slots and optional override hooks.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod serializable;
mod slot;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{
    Constructor, DeserializeHook, SerializeHook, TextCodec, TypeDescriptor, Visibility,
};
pub use serializable::{DeserializeOverride, Serializable, SerializeOverride};
pub use slot::{SlotDescriptor, SlotGetter, SlotKind, SlotSetter};
pub use type_registry::TypeRegistry;
