use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialDerive;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(derive: &SerialDerive) -> TokenStream {
    let trait_type_path_ = crate::path::type_path_(derive.vc_serial_path());
    let ident = derive.ident();

    let type_path = match &derive.attrs().type_path {
        Some(lit) => quote! { #lit },
        None => quote! { ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)) },
    };

    quote! {
        impl #trait_type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                ::core::stringify!(#ident)
            }
        }
    }
}
