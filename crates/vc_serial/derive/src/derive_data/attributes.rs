use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Token, Type};

use crate::SERIAL_ATTRIBUTE_NAME;

fn serial_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(SERIAL_ATTRIBUTE_NAME))
}

fn set_flag(flag: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate serial attribute"));
    }
    *flag = Some(meta.path.span());
    Ok(())
}

// -----------------------------------------------------------------------------
// Markers

/// The capability markers written on a type, each with its span.
#[derive(Default, Debug)]
pub(crate) struct MarkerFlags {
    pub primitive: Option<Span>,
    pub object: Option<Span>,
    pub file: Option<Span>,
    pub folder: Option<Span>,
}

impl MarkerFlags {
    /// Marker constant names of every declared flag.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.primitive, "PRIMITIVE"),
            (self.object, "OBJECT"),
            (self.file, "FILE"),
            (self.folder, "FOLDER"),
        ]
        .into_iter()
        .filter_map(|(flag, name)| flag.map(|_| name))
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Parsed `#[serial(...)]` attributes of the item.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub markers: MarkerFlags,
    pub default: Option<Span>,
    pub text: Option<Span>,
    pub override_serialization: Option<Span>,
    pub override_deserialization: Option<Span>,
    pub auto_register: Option<Span>,
    pub depends_on: Vec<Type>,
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in serial_attrs(attrs) {
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected an identifier"));
        };
        match ident.to_string().as_str() {
            "primitive" => set_flag(&mut self.markers.primitive, &meta),
            "object" => set_flag(&mut self.markers.object, &meta),
            "file" => set_flag(&mut self.markers.file, &meta),
            "folder" => set_flag(&mut self.markers.folder, &meta),
            "default" => set_flag(&mut self.default, &meta),
            "text" => set_flag(&mut self.text, &meta),
            "override_serialization" => set_flag(&mut self.override_serialization, &meta),
            "override_deserialization" => set_flag(&mut self.override_deserialization, &meta),
            "auto_register" => set_flag(&mut self.auto_register, &meta),
            "depends_on" => {
                let content;
                syn::parenthesized!(content in meta.input);
                let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                for ty in types {
                    if !self.depends_on.contains(&ty) {
                        self.depends_on.push(ty);
                    }
                }
                Ok(())
            }
            "type_path" => {
                if self.type_path.is_some() {
                    return Err(meta.error("duplicate `type_path`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                let path = lit.value();
                if path.is_empty() || path.starts_with("::") {
                    return Err(syn::Error::new(
                        lit.span(),
                        "`type_path` must be non-empty and without a leading `::`",
                    ));
                }
                self.type_path = Some(lit);
                Ok(())
            }
            _ => Err(meta.error(
                "unknown serial attribute, expected one of: primitive, object, file, folder, \
                 default, text, override_serialization, override_deserialization, \
                 depends_on, auto_register, type_path",
            )),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Parsed `#[serial(...)]` attributes of a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub attribute: Option<Span>,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in serial_attrs(attrs) {
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }
        if let (Some(skip), Some(_)) = (this.skip, this.attribute) {
            return Err(syn::Error::new(
                skip,
                "a skipped field cannot be an attribute",
            ));
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("skip") {
            set_flag(&mut self.skip, &meta)
        } else if meta.path.is_ident("attribute") {
            set_flag(&mut self.attribute, &meta)
        } else if meta.path.is_ident("rename") {
            if self.rename.is_some() {
                return Err(meta.error("duplicate `rename`"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value().is_empty() {
                return Err(syn::Error::new(lit.span(), "slot name must be non-empty"));
            }
            self.rename = Some(lit);
            Ok(())
        } else {
            Err(meta.error("unknown serial field attribute, expected one of: skip, attribute, rename"))
        }
    }
}
