#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use f_funcs as funcs;
pub use f_reflect as reflect;
pub use f_utils as utils;

pub mod prelude {
    //! The derive, the data model and the keyed-access functions.

    pub use f_reflect::access::{Keyed, KeyedMut};
    pub use f_reflect::derive::Record;
    pub use f_reflect::{FromValue, IntoValue, Mapping, Record, Value};

    pub use f_funcs::{
        from_mapping, get_keys, get_value, get_value_or_default, get_values, merge, set_value,
        to_mapping,
    };
}
