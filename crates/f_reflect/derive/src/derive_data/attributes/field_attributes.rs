use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

use crate::RECORD_ATTRIBUTE_NAME;

/// Field-level `#[record(..)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[record(rename = "..")]`
    pub rename: Option<LitStr>,
    /// `#[record(skip)]`
    pub skip: Option<Span>,
    /// `#[record(readonly)]`
    pub readonly: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        this.validity()?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.require_ident()?.span();

        if meta.path.is_ident("rename") {
            if self.rename.is_some() {
                return Err(meta.error("duplicate `rename` attribute"));
            }
            let name: LitStr = meta.value()?.parse()?;
            if name.value().is_empty() {
                return Err(syn::Error::new(name.span(), "member name cannot be empty"));
            }
            self.rename = Some(name);
        } else if meta.path.is_ident("skip") {
            self.skip = Some(span);
        } else if meta.path.is_ident("readonly") {
            self.readonly = Some(span);
        } else {
            return Err(meta.error(
                "unknown field attribute, expected `rename`, `skip` or `readonly`",
            ));
        }
        Ok(())
    }

    fn validity(&self) -> syn::Result<()> {
        if let Some(span) = self.skip
            && (self.rename.is_some() || self.readonly.is_some())
        {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with other field attributes",
            ));
        }
        Ok(())
    }

    /// Whether any attribute was given.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rename.is_none() && self.skip.is_none() && self.readonly.is_none()
    }
}
