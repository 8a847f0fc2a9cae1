use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{Member, MemberSource, RecordStruct};

/// Generate one builder call for a member.
///
/// Similar to following:
///
/// ```ignore
/// .field("name",
///     |this: &Self| Ok(IntoValue::into_value(Clone::clone(&this.name))),
///     |this: &mut Self, value: Value| -> Result<(), MemberError> {
///         this.name = FromValue::from_value(value)?;
///         Ok(())
///     },
/// )
/// ```
fn member_tokens(member: &Member, f_reflect_path: &syn::Path) -> TokenStream {
    let value_ = crate::path::value_(f_reflect_path);
    let into_value_ = crate::path::into_value_(f_reflect_path);
    let from_value_ = crate::path::from_value_(f_reflect_path);
    let member_error_ = crate::path::member_error_(f_reflect_path);

    let name = &member.name;
    let span = member.span;

    match &member.source {
        MemberSource::Field {
            ident,
            ty,
            readonly,
        } => {
            let getter = quote_spanned! { span =>
                |this: &Self| -> ::core::result::Result<#value_, #member_error_> {
                    ::core::result::Result::Ok(
                        <#ty as #into_value_>::into_value(::core::clone::Clone::clone(&this.#ident))
                    )
                }
            };

            if *readonly {
                quote! { .readonly_field(#name, #getter) }
            } else {
                let setter = quote_spanned! { span =>
                    |this: &mut Self, value: #value_| -> ::core::result::Result<(), #member_error_> {
                        this.#ident = <#ty as #from_value_>::from_value(value)?;
                        ::core::result::Result::Ok(())
                    }
                };
                quote! { .field(#name, #getter, #setter) }
            }
        }
        MemberSource::Property(property) => {
            let get = &property.get;
            let read = if property.fallible {
                quote! { Self::#get(this).map_err(#member_error_::failed)? }
            } else {
                quote! { Self::#get(this) }
            };
            let getter = quote_spanned! { span =>
                |this: &Self| -> ::core::result::Result<#value_, #member_error_> {
                    ::core::result::Result::Ok(#into_value_::into_value(#read))
                }
            };

            match &property.set {
                None => quote! { .readonly_property(#name, #getter) },
                Some(set) => {
                    let write = if property.fallible {
                        quote! {
                            Self::#set(this, #from_value_::from_value(value)?)
                                .map_err(#member_error_::failed)
                        }
                    } else {
                        quote! {
                            Self::#set(this, #from_value_::from_value(value)?);
                            ::core::result::Result::Ok(())
                        }
                    };
                    let setter = quote_spanned! { span =>
                        |this: &mut Self, value: #value_| -> ::core::result::Result<(), #member_error_> {
                            #write
                        }
                    };
                    quote! { .property(#name, #getter, #setter) }
                }
            }
        }
    }
}

/// Generate `Record` implementation.
pub(crate) fn impl_trait_record(record: &RecordStruct) -> TokenStream {
    let f_reflect_path = record.f_reflect_path();
    let record_ = crate::path::record_(f_reflect_path);
    let type_descriptor_ = crate::path::type_descriptor_(f_reflect_path);
    let ident = record.ident();

    let members = record
        .members()
        .iter()
        .map(|member| member_tokens(member, f_reflect_path))
        .collect::<Vec<_>>();

    quote! {
        impl #record_ for #ident {
            fn describe() -> #type_descriptor_ {
                #type_descriptor_::builder::<Self>()
                    #(#members)*
                    .build()
            }

            #[inline]
            fn describer(&self) -> fn() -> #type_descriptor_ {
                <Self as #record_>::describe
            }
        }
    }
}
