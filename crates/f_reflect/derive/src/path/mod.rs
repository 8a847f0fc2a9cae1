//! This independent module is used to provide the required path.
//! So as to minimize changes when the `f_reflect` structure is modified.
//!
//! The only special feature is the path of f_reflect itself,
//! See [`f_reflect`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `f_reflect` crate.
///
/// 1. For crates that depend on `f_reflect`, `::f_reflect` is returned here.
/// 2. For crates that depend on `f_core`, `::f_core::reflect` is returned here.
/// 3. For crates that depend on `f`, `::f::reflect` is returned here.
/// 4. For other situations, `::f_reflect` is returned here, but this may be incorrect.
///
/// The manifest is read once per build, but the lookup still takes a lock,
/// so the path is passed around rather than reacquired.
pub(crate) fn f_reflect() -> syn::Path {
    f_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("f_reflect"))
}

// -----------------------------------------------------------------------------
// Items

#[inline]
pub(crate) fn record_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::Record
    }
}

#[inline]
pub(crate) fn keyed_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::access::Keyed
    }
}

#[inline]
pub(crate) fn keyed_mut_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::access::KeyedMut
    }
}

#[inline]
pub(crate) fn access_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::access
    }
}

#[inline]
pub(crate) fn type_descriptor_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::registry::TypeDescriptor
    }
}

#[inline]
pub(crate) fn value_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::Value
    }
}

#[inline]
pub(crate) fn into_value_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::IntoValue
    }
}

#[inline]
pub(crate) fn from_value_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::FromValue
    }
}

#[inline]
pub(crate) fn member_error_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::error::MemberError
    }
}

#[inline]
pub(crate) fn coercion_error_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::error::TypeCoercionError
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(f_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #f_reflect_path::__macro_exports::auto_register
    }
}
