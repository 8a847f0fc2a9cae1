use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::RecordStruct;

/// Generate `IntoValue` and `FromValue` implementation for `#[record(value)]`.
///
/// The record travels as a `Value::Map` of its members, converted with the
/// registry of the accessor call in progress.
pub(crate) fn impl_trait_value(record: &RecordStruct) -> TokenStream {
    let Some(span) = record.attrs().value else {
        return crate::utils::empty();
    };

    let f_reflect_path = record.f_reflect_path();
    let value_ = crate::path::value_(f_reflect_path);
    let into_value_ = crate::path::into_value_(f_reflect_path);
    let from_value_ = crate::path::from_value_(f_reflect_path);
    let coercion_error_ = crate::path::coercion_error_(f_reflect_path);
    let access_ = crate::path::access_(f_reflect_path);
    let ident = record.ident();

    quote_spanned! { span =>
        impl #into_value_ for #ident {
            fn into_value(self) -> #value_ {
                #value_::Map(#access_::Accessor::with_active(|access| access.to_mapping(&self)))
            }
        }

        impl #from_value_ for #ident {
            fn from_value(value: #value_) -> ::core::result::Result<Self, #coercion_error_> {
                match value {
                    #value_::Map(mapping) => {
                        ::core::result::Result::Ok(#access_::Accessor::with_active(|access| {
                            access.from_mapping::<Self>(&mapping)
                        }))
                    }
                    other => ::core::result::Result::Err(
                        #coercion_error_::new::<Self>(other.kind_name())
                    ),
                }
            }
        }
    }
}
