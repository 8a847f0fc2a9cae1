use std::collections::BTreeMap;

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility};

use super::{FieldAttributes, PropertyAttribute, TypeAttributes};

/// Where the value of a [`Member`] comes from.
pub(crate) enum MemberSource<'a> {
    Field {
        ident: &'a Ident,
        ty: &'a Type,
        readonly: bool,
    },
    Property(&'a PropertyAttribute),
}

/// One generated member, in enumeration order.
pub(crate) struct Member<'a> {
    pub name: String,
    pub span: Span,
    pub source: MemberSource<'a>,
}

/// A parsed `#[derive(Record)]` input.
pub(crate) struct RecordStruct<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<(&'a syn::Field, FieldAttributes)>,
    f_reflect_path: syn::Path,
}

impl<'a> RecordStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Record` cannot be derived for generic types",
            ));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Record` cannot be derived for tuple structs",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Record` cannot be derived for unit structs",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Record` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Record` cannot be derived for unions",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if matches!(field.vis, Visibility::Inherited) && !field_attrs.is_empty() {
                return Err(syn::Error::new(
                    field.span(),
                    "only `pub` fields are members, remove the `record` attribute or make the field `pub`",
                ));
            }
            fields.push((field, field_attrs));
        }

        let this = Self {
            ident: &input.ident,
            attrs,
            fields,
            f_reflect_path: crate::path::f_reflect(),
        };
        this.check_names()?;
        Ok(this)
    }

    fn check_names(&self) -> syn::Result<()> {
        let mut seen: BTreeMap<String, Span> = BTreeMap::new();
        let mut error: Option<syn::Error> = None;

        for member in self.members() {
            if let Some(first) = seen.get(&member.name) {
                let mut err = syn::Error::new(
                    member.span,
                    format!("duplicate member name `{}`", member.name),
                );
                err.combine(syn::Error::new(*first, "first declared here"));
                match &mut error {
                    Some(error) => error.combine(err),
                    None => error = Some(err),
                }
            } else {
                seen.insert(member.name, member.span);
            }
        }

        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn f_reflect_path(&self) -> &syn::Path {
        &self.f_reflect_path
    }

    /// Properties in attribute order, then `pub` non-skipped fields in
    /// declaration order.
    pub fn members(&self) -> Vec<Member<'_>> {
        let properties = self.attrs.properties.iter().map(|property| Member {
            name: property.name.value(),
            span: property.name.span(),
            source: MemberSource::Property(property),
        });

        let fields = self
            .fields
            .iter()
            .filter(|(field, attrs)| {
                !matches!(field.vis, Visibility::Inherited) && attrs.skip.is_none()
            })
            .filter_map(|(field, attrs)| {
                let ident = field.ident.as_ref()?;
                let (name, span) = match &attrs.rename {
                    Some(rename) => (rename.value(), rename.span()),
                    None => (ident.unraw().to_string(), ident.span()),
                };
                Some(Member {
                    name,
                    span,
                    source: MemberSource::Field {
                        ident,
                        ty: &field.ty,
                        readonly: attrs.readonly.is_some(),
                    },
                })
            });

        properties.chain(fields).collect()
    }
}
