//! See [`Serializable`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Serializable Derivation
///
/// `#[derive(Serializable)]` implements `TypePath` and `Serializable`, the
/// latter returning the `TypeDescriptor` the initialization pipeline reads.
///
/// Generic types are not supported, implement the traits by hand.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Serializable, Default)]
/// #[serial(object, default)]
/// pub struct Point {
///     x: i32,
///     y: i32,
/// }
/// ```
///
/// - `primitive`, `object`, `file`, `folder`: capability markers. Declaring
///   more than one is accepted here and rejected when the engine is built.
/// - `default`: the type implements `Default`, used as constructor by the
///   deserializer.
/// - `text`: the type implements `Display` and `FromStr`, used as the
///   textual value of a primitive.
/// - `override_serialization`, `override_deserialization`: use the
///   hand-written `SerializeOverride` / `DeserializeOverride` impls instead
///   of the fields.
/// - `depends_on(A, B, ..)`: types whose delegates the overrides call.
/// - `type_path = "a::b::C"`: replaces the default
///   `concat!(module_path!(), "::", "C")`.
/// - `auto_register`: submit the type to `TypeRegistry::auto_register`.
///   Only has an effect with the `auto_register` feature.
///
/// Only `pub` items are eligible for serialization. An enum without
/// variants is registered as abstract.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Serializable, Default)]
/// #[serial(object, default)]
/// pub struct Tag {
///     #[serial(attribute)]
///     id: u32,
///     #[serial(rename = "text")]
///     label: String,
///     #[serial(skip)]
///     cached: Option<usize>,
/// }
/// ```
///
/// - `skip`: the field is transient, it needs `Default` only through its
///   owner and no `Serializable` impl.
/// - `attribute`: written as an attribute of the owner's node instead of a
///   child. Allowed for primitive fields only, checked when the engine is
///   built.
/// - `rename = "name"`: the node name of the slot, the field ident by
///   default. Tuple fields are named by index.
///
/// Enums with variants carry no slots. A marked one must be a primitive
/// with `text` or supply both overrides, anything else is a compile error.
#[proc_macro_derive(Serializable, attributes(serial))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::SerialDerive::from_input(&ast) {
        Ok(derive) => impls::impl_serializable(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
