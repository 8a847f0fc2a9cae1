use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr};

use crate::RECORD_ATTRIBUTE_NAME;

/// A `property(name = "..", get = .., set = .., fallible)` entry.
#[derive(Debug)]
pub(crate) struct PropertyAttribute {
    pub name: LitStr,
    pub get: Ident,
    pub set: Option<Ident>,
    pub fallible: bool,
}

/// Type-level `#[record(..)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[record(value)]`
    pub value: Option<Span>,
    /// `#[record(auto_register)]`
    pub auto_register: Option<Span>,
    /// `#[record(property(..))]`, in attribute order.
    pub properties: Vec<PropertyAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.require_ident()?.span();

        if meta.path.is_ident("value") {
            if self.value.is_some() {
                return Err(meta.error("duplicate `value` attribute"));
            }
            self.value = Some(span);
            Ok(())
        } else if meta.path.is_ident("auto_register") {
            if self.auto_register.is_some() {
                return Err(meta.error("duplicate `auto_register` attribute"));
            }
            self.auto_register = Some(span);
            Ok(())
        } else if meta.path.is_ident("property") {
            let property = PropertyAttribute::parse(&meta)?;
            self.properties.push(property);
            Ok(())
        } else {
            Err(meta.error(
                "unknown type attribute, expected `value`, `auto_register` or `property(..)`",
            ))
        }
    }
}

impl PropertyAttribute {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut get: Option<Ident> = None;
        let mut set: Option<Ident> = None;
        let mut fallible = false;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("get") {
                get = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("set") {
                set = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("fallible") {
                fallible = true;
            } else {
                return Err(inner.error(
                    "unknown property key, expected `name`, `get`, `set` or `fallible`",
                ));
            }
            Ok(())
        })?;

        let Some(name) = name else {
            return Err(meta.error("property requires `name = \"..\"`"));
        };
        let Some(get) = get else {
            return Err(meta.error("property requires `get = method`"));
        };
        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "property name cannot be empty"));
        }

        Ok(Self {
            name,
            get,
            set,
            fallible,
        })
    }
}
