//! Code generation of `#[derive(Serializable)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_serializable;
mod trait_type_path;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialDerive;

pub(crate) fn impl_serializable(derive: &SerialDerive) -> TokenStream {
    let type_path = trait_type_path::impl_trait_type_path(derive);
    let serializable = trait_serializable::impl_trait_serializable(derive);
    let auto_register = auto_register::get_auto_register_impl(derive);

    quote! {
        #type_path

        #serializable

        #auto_register
    }
}
