use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{SerialDerive, SerialField, SerialShape};

/// Generate the `.with_slot(..)` call of one field.
fn slot_expression(derive: &SerialDerive, field: &SerialField) -> TokenStream {
    let vc_serial_path = derive.vc_serial_path();
    let slot_descriptor_ = crate::path::slot_descriptor_(vc_serial_path);
    let slot_kind_ = crate::path::slot_kind_(vc_serial_path);

    let SerialField {
        member, ty, name, ..
    } = field;

    let with_kind = match field.attrs.attribute {
        Some(span) => quote_spanned! { span => .with_kind(#slot_kind_::Attribute) },
        None => TokenStream::new(),
    };

    quote! {
        .with_slot(
            #slot_descriptor_::new::<Self, #ty>(
                #name,
                |owner| &owner.#member,
                |owner, value| owner.#member = value,
            )
            #with_kind
        )
    }
}

/// Generate implementation codes for `Serializable`
pub(crate) fn impl_trait_serializable(derive: &SerialDerive) -> TokenStream {
    let vc_serial_path = derive.vc_serial_path();
    let serializable_ = crate::path::serializable_(vc_serial_path);
    let type_descriptor_ = crate::path::type_descriptor_(vc_serial_path);
    let visibility_ = crate::path::visibility_(vc_serial_path);
    let serial_markers_ = crate::path::serial_markers_(vc_serial_path);
    let type_registry_ = crate::path::type_registry_(vc_serial_path);

    let ident = derive.ident();
    let attrs = derive.attrs();

    let visibility = if derive.is_public() {
        quote! { .with_visibility(#visibility_::Public) }
    } else {
        quote! { .with_visibility(#visibility_::Restricted) }
    };

    let is_abstract = match derive.shape() {
        SerialShape::Abstract => quote! { .with_abstract(true) },
        SerialShape::Struct(_) | SerialShape::Enum => TokenStream::new(),
    };

    let markers = attrs.markers.names().map(|name| {
        let name = syn::Ident::new(name, derive.span());
        quote! { #serial_markers_::#name }
    });
    let markers = quote! { #( .with_markers(#markers) )* };

    let default = match attrs.default {
        Some(span) => quote_spanned! { span => .with_default::<Self>() },
        None => TokenStream::new(),
    };

    let text = match attrs.text {
        Some(span) => quote_spanned! { span => .with_text_codec::<Self>() },
        None => TokenStream::new(),
    };

    let serialize_override = match attrs.override_serialization {
        Some(span) => quote_spanned! { span => .with_serialize_override::<Self>() },
        None => TokenStream::new(),
    };

    let deserialize_override = match attrs.override_deserialization {
        Some(span) => quote_spanned! { span => .with_deserialize_override::<Self>() },
        None => TokenStream::new(),
    };

    let depends_on = &attrs.depends_on;

    let slots = derive
        .active_fields()
        .map(|field| slot_expression(derive, field));

    let field_types: Vec<_> = derive.active_fields().map(|field| field.ty).collect();
    let register_dependencies = if field_types.is_empty() && depends_on.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            fn register_dependencies(registry: &mut #type_registry_) {
                #( registry.register::<#field_types>(); )*
                #( registry.register::<#depends_on>(); )*
            }
        }
    };

    quote! {
        impl #serializable_ for #ident {
            fn type_descriptor() -> #type_descriptor_ {
                #type_descriptor_::new::<Self>()
                    #visibility
                    #is_abstract
                    #markers
                    #default
                    #text
                    #serialize_override
                    #deserialize_override
                    #( .with_dependency::<#depends_on>() )*
                    #( #slots )*
            }

            #register_dependencies
        }
    }
}
