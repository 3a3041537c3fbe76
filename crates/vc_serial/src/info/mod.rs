//! Type identity and the per-type records produced during initialization.
//!
//! ## Menu
//!
//! - [`TypePath`]: static type paths and names, implemented by `#[derive(Serializable)]`.
//! - [`Type`]: a `TypeId` together with its path and short name.
//! - [`Serializability`]: the category a type is classified into.
//! - [`SerialMarkers`]: the capability markers a type declares.
//! - [`ValidationStage`]: the state machine carried by meta-infos and type-infos.
//! - [`TypeMetaInfo`]: the raw extracted shape of a type (slots, unique sub-types).
//! - [`TypeInfo`]: the resolved shape of a type, sub-types replaced by their own `TypeInfo`.

// -----------------------------------------------------------------------------
// Modules

mod meta_info;
mod serializability;
mod stage;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use meta_info::{MetaSlot, TypeMetaInfo};
pub use serializability::{SerialMarkers, Serializability};
pub use stage::ValidationStage;
pub use type_info::{TypeInfo, TypeInfoKind};
pub use type_path::{Type, TypePath};
