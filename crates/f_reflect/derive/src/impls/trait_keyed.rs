use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate `Keyed` and `KeyedMut` implementation.
pub(crate) fn impl_trait_keyed(record: &RecordStruct) -> TokenStream {
    let f_reflect_path = record.f_reflect_path();
    let keyed_ = crate::path::keyed_(f_reflect_path);
    let keyed_mut_ = crate::path::keyed_mut_(f_reflect_path);
    let access_ = crate::path::access_(f_reflect_path);
    let ident = record.ident();

    quote! {
        impl #keyed_ for #ident {
            #[inline]
            fn subject(&self) -> #access_::Subject<'_> {
                #access_::Subject::Record(self)
            }
        }

        impl #keyed_mut_ for #ident {
            #[inline]
            fn subject_mut(&mut self) -> #access_::SubjectMut<'_> {
                #access_::SubjectMut::Record(self)
            }
        }
    }
}
