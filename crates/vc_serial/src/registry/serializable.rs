use crate::compile::Delegates;
use crate::error::FormatError;
use crate::info::TypePath;
use crate::node::Node;
use crate::registry::{TypeDescriptor, TypeRegistry};

// -----------------------------------------------------------------------------
// Serializable

/// A type that can be registered in a [`TypeRegistry`].
///
/// Usually implemented with `#[derive(Serializable)]`. Implementing it
/// does not make a type serializable on its own, that is decided by the
/// classifier from the markers and eligibility recorded in the descriptor.
///
/// # Examples
///
/// ```
/// use vc_serial::{Serializable, TypeRegistry};
/// use vc_serial::info::{SerialMarkers, TypePath};
/// use vc_serial::registry::{SlotDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// pub struct Meters(f64);
///
/// impl TypePath for Meters {
///     fn type_path() -> &'static str { "demo::Meters" }
///     fn type_name() -> &'static str { "Meters" }
/// }
///
/// impl Serializable for Meters {
///     fn type_descriptor() -> TypeDescriptor {
///         TypeDescriptor::new::<Self>()
///             .with_markers(SerialMarkers::OBJECT)
///             .with_default::<Self>()
///             .with_slot(SlotDescriptor::new::<Self, f64>("value", |m| &m.0, |m, v| m.0 = v))
///     }
///
///     fn register_dependencies(registry: &mut TypeRegistry) {
///         registry.register::<f64>();
///     }
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Meters>();
/// assert!(registry.contains::<f64>());
/// ```
///
/// An enum with variants has no slots to write, so deriving it as a
/// composite without hand-written hooks is rejected:
///
/// ```compile_fail
/// use vc_serial::Serializable;
///
/// #[derive(Serializable, Default)]
/// #[serial(object, default)]
/// pub enum Mode {
///     #[default]
///     Idle,
///     Running,
/// }
/// ```
pub trait Serializable: TypePath + Send + Sync {
    /// Returns the registration record of the type.
    fn type_descriptor() -> TypeDescriptor;

    /// Registers the types the descriptor refers to.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

// -----------------------------------------------------------------------------
// Overrides

/// A hand-written serialize half, enabled by
/// `#[serial(override_serialization)]`.
///
/// `delegates` gives access to the compiled delegates of the types declared
/// with `#[serial(depends_on(..))]`.
///
/// # Examples
///
/// ```
/// use vc_serial::{FormatError, Node, Serializable};
/// use vc_serial::compile::Delegates;
/// use vc_serial::registry::SerializeOverride;
///
/// #[derive(Serializable, Default)]
/// #[serial(object, default, override_serialization, depends_on(u32))]
/// pub struct Rgb { r: u8, g: u8, b: u8 }
///
/// impl SerializeOverride for Rgb {
///     fn serialize(name: &str, value: &Self, delegates: &Delegates) -> Result<Node, FormatError> {
///         let packed = u32::from_be_bytes([0, value.r, value.g, value.b]);
///         delegates.serialize(name, &packed)
///     }
/// }
/// ```
pub trait SerializeOverride: Serializable + Sized {
    fn serialize(name: &str, value: &Self, delegates: &Delegates) -> Result<Node, FormatError>;
}

/// A hand-written deserialize half, enabled by
/// `#[serial(override_deserialization)]`.
pub trait DeserializeOverride: Serializable + Sized {
    fn deserialize(node: &Node, delegates: &Delegates) -> Result<Self, FormatError>;
}
