use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Index, LitStr, Member, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// SerialField

/// A field that becomes a slot.
pub(crate) struct SerialField<'a> {
    pub member: Member,
    pub ty: &'a Type,
    pub name: LitStr,
    pub attrs: FieldAttributes,
}

impl SerialField<'_> {
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.attrs.skip.is_some()
    }
}

// -----------------------------------------------------------------------------
// SerialShape

pub(crate) enum SerialShape<'a> {
    /// Named, tuple or unit struct.
    Struct(Vec<SerialField<'a>>),
    /// Enum with variants, no slots.
    Enum,
    /// Enum without variants, cannot be instantiated.
    Abstract,
}

// -----------------------------------------------------------------------------
// SerialDerive

/// Everything the code generation needs from the derive input.
pub(crate) struct SerialDerive<'a> {
    vc_serial_path: syn::Path,
    ident: &'a Ident,
    is_public: bool,
    attrs: TypeAttributes,
    shape: SerialShape<'a>,
}

impl<'a> SerialDerive<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Serializable)]` does not support generic types, \
                 implement `TypePath` and `Serializable` manually",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let shape = match &ast.data {
            Data::Struct(data) => SerialShape::Struct(Self::parse_fields(&data.fields)?),
            Data::Enum(data) if data.variants.is_empty() => SerialShape::Abstract,
            Data::Enum(_) => {
                Self::check_enum(&ast.ident, &attrs)?;
                SerialShape::Enum
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Serializable)]` does not support unions",
                ));
            }
        };

        Ok(Self {
            vc_serial_path: crate::path::vc_serial(),
            ident: &ast.ident,
            is_public: matches!(ast.vis, Visibility::Public(_)),
            attrs,
            shape,
        })
    }

    /// An enum with variants has no slots, so a marked one must be written
    /// as text or entirely by hand.
    fn check_enum(ident: &Ident, attrs: &TypeAttributes) -> syn::Result<()> {
        if attrs.markers.names().next().is_none() {
            return Ok(());
        }
        let textual = attrs.markers.primitive.is_some() && attrs.text.is_some();
        let overridden =
            attrs.override_serialization.is_some() && attrs.override_deserialization.is_some();
        if textual || overridden {
            return Ok(());
        }
        Err(syn::Error::new(
            ident.span(),
            "`#[derive(Serializable)]` on an enum with variants needs \
             `#[serial(primitive, text)]` or both `override_serialization` \
             and `override_deserialization`",
        ))
    }

    fn parse_fields(fields: &'a Fields) -> syn::Result<Vec<SerialField<'a>>> {
        let mut result: Vec<SerialField<'a>> = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index {
                    index: index as u32,
                    span: field.ty.span(),
                }),
            };
            let name = match (&attrs.rename, &field.ident) {
                (Some(rename), _) => rename.clone(),
                (None, Some(ident)) => LitStr::new(&ident.unraw().to_string(), ident.span()),
                (None, None) => LitStr::new(&index.to_string(), field.ty.span()),
            };
            if attrs.skip.is_none()
                && let Some(other) = result
                    .iter()
                    .find(|other| !other.is_skipped() && other.name.value() == name.value())
            {
                let mut err =
                    syn::Error::new(name.span(), format!("duplicate slot name `{}`", name.value()));
                err.combine(syn::Error::new(other.name.span(), "first used here"));
                return Err(err);
            }
            result.push(SerialField {
                member,
                ty: &field.ty,
                name,
                attrs,
            });
        }
        Ok(result)
    }

    #[inline]
    pub fn vc_serial_path(&self) -> &syn::Path {
        &self.vc_serial_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn shape(&self) -> &SerialShape<'a> {
        &self.shape
    }

    /// Fields turned into slots, skipped ones excluded.
    pub fn active_fields(&self) -> impl Iterator<Item = &SerialField<'a>> {
        let fields: &[SerialField<'a>] = match &self.shape {
            SerialShape::Struct(fields) => fields,
            _ => &[],
        };
        fields.iter().filter(|field| !field.is_skipped())
    }

    /// Span of the item ident, used for generated items.
    #[inline]
    pub fn span(&self) -> Span {
        self.ident.span()
    }
}
