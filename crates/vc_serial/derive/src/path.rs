//! Paths of the `vc_serial` items the generated code names.
//!
//! Kept in one place so a change of the `vc_serial` layout only touches
//! this file.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_serial` crate.
///
/// 1. For crates that depend on `vc_serial`, `::vc_serial` is returned.
/// 2. For crates that depend on `vc_persist`, `::vc_persist::serial` is returned.
/// 3. For other situations, `::vc_serial` is returned, which may be incorrect.
///
/// Reads the caller's manifest, so it is called once per derive.
pub(crate) fn vc_serial() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_serial"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn type_path_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::info::TypePath }
}

#[inline(always)]
pub(crate) fn serial_markers_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::info::SerialMarkers }
}

#[inline(always)]
pub(crate) fn serializable_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::registry::Serializable }
}

#[inline(always)]
pub(crate) fn type_descriptor_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::registry::TypeDescriptor }
}

#[inline(always)]
pub(crate) fn slot_descriptor_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::registry::SlotDescriptor }
}

#[inline(always)]
pub(crate) fn slot_kind_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::registry::SlotKind }
}

#[inline(always)]
pub(crate) fn visibility_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::registry::Visibility }
}

#[inline(always)]
pub(crate) fn type_registry_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::registry::TypeRegistry }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! { #vc_serial_path::__macro_exports::auto_register }
}
