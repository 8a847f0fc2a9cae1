use crate::derive_data::RecordStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(record: &RecordStruct) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    if let Some(span) = record.attrs().auto_register {
        let auto_register_ = crate::path::auto_register_(record.f_reflect_path());
        let ident = record.ident();

        quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    #auto_register_::__register::<#ident>
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &RecordStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
