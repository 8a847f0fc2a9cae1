// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_keyed;
mod trait_record;
mod trait_value;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_keyed::impl_trait_keyed;
use trait_record::impl_trait_record;
use trait_value::impl_trait_value;

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Every impl generated by `#[derive(Record)]`.
pub(crate) fn impl_record(record: &RecordStruct) -> TokenStream {
    let record_impl = impl_trait_record(record);
    let keyed_impl = impl_trait_keyed(record);
    let value_impl = impl_trait_value(record);
    let auto_register_impl = get_auto_register_impl(record);

    quote! {
        const _: () = {
            #record_impl
            #keyed_impl
            #value_impl
            #auto_register_impl
        };
    }
}
