//! See [`Record`](derive_record).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RECORD_ATTRIBUTE_NAME: &str = "record";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Keyed Record Derivation
///
/// `#[derive(Record)]` implements `Record`, `Keyed` and `KeyedMut` for a
/// struct with named fields, so its members can be read and written by
/// string key.
///
/// Generic types, enums, tuple structs and unit structs are rejected.
///
/// ## Members
///
/// Every `pub` field (including `pub(crate)` and friends) is a member,
/// named after the field. Private fields are not members. Field values are
/// read by cloning, so their types need `Clone + IntoValue + FromValue`.
///
/// Members are enumerated properties first, then fields, each in
/// declaration order. Two members with the same name are a compile error.
///
/// ### Field attributes
///
/// - `#[record(rename = "Name")]`: expose the field under another name.
/// - `#[record(skip)]`: the field is not a member.
/// - `#[record(readonly)]`: the member rejects writes.
///
/// ```rust, ignore
/// #[derive(Record, Default)]
/// struct Foo {
///     #[record(rename = "Id", readonly)]
///     pub id: u32,
///     #[record(skip)]
///     pub cache: Vec<u8>,
///     secret: String, // not a member
/// }
/// ```
///
/// ### Properties
///
/// Type-level `property(..)` attributes expose getter/setter methods as a
/// member. `set` is optional; without it the property is read-only.
///
/// ```rust, ignore
/// #[derive(Record, Default)]
/// #[record(property(name = "Area", get = area))]
/// #[record(property(name = "Width", get = width, set = set_width, fallible))]
/// struct Rect {
///     w: f64,
///     pub h: f64,
/// }
///
/// impl Rect {
///     fn area(&self) -> f64 { self.w * self.h }
///     fn width(&self) -> Result<f64, &'static str> { Ok(self.w) }
///     fn set_width(&mut self, w: f64) -> Result<(), &'static str> {
///         if w < 0.0 { return Err("negative width"); }
///         self.w = w;
///         Ok(())
///     }
/// }
/// ```
///
/// With `fallible`, the getter returns `Result<T, E>` and the setter
/// returns `Result<(), E>` for any `E: Display`; errors surface as
/// `AccessError`s.
///
/// ## Nesting
///
/// `#[record(value)]` additionally implements `IntoValue` and `FromValue`
/// (as a mapping), so the type can be a member of another record. The type
/// must implement `Clone` and `Default`.
///
/// ## Auto register
///
/// `#[record(auto_register)]` adds the type to the list registered by
/// `RecordRegistry::auto_register`. Does nothing without the
/// `auto_register` feature.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::RecordStruct::from_input(&ast) {
        Ok(record) => impls::impl_record(&record).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
