use crate::derive_data::SerialDerive;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(derive: &SerialDerive) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = derive.attrs().auto_register else {
        return proc_macro2::TokenStream::new();
    };

    // Generic types are rejected before this point.
    let auto_register_ = crate::path::auto_register_(derive.vc_serial_path());
    let ident = derive.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &SerialDerive) -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
