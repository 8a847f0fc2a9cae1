//! Keyed access to plain Rust structs.
//!
//! A [`Record`] exposes its members by string key through a [`TypeDescriptor`]
//! built once per type and cached in a [`RecordRegistry`]. Records and
//! [`Mapping`]s are read and written through the same [`access`] functions,
//! with values carried as dynamically typed [`Value`]s.
//!
//! ```
//! use f_reflect::derive::Record;
//! use f_reflect::access::{get_keys, get_value, set_value};
//!
//! #[derive(Record, Default)]
//! #[record(property(name = "Total", get = total))]
//! struct Order {
//!     pub count: u32,
//!     pub price: f64,
//! }
//!
//! impl Order {
//!     fn total(&self) -> f64 {
//!         self.count as f64 * self.price
//!     }
//! }
//!
//! let mut order = Order::default();
//! set_value("count", 3_u32, &mut order).unwrap();
//! set_value("price", 2.5, &mut order).unwrap();
//!
//! assert_eq!(get_keys(&order), ["Total", "count", "price"]);
//! assert_eq!(get_value::<f64>("Total", &order), Ok(7.5));
//! ```
//!
//! [`TypeDescriptor`]: registry::TypeDescriptor
//! [`RecordRegistry`]: registry::RecordRegistry
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `f_reflect` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `f_reflect` can be used as an alias for `crate`.
extern crate self as f_reflect;

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod mapping;
mod record;
mod value;

pub mod access;
pub mod error;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use f_reflect_derive as derive;
pub use mapping::Mapping;
pub use record::Record;
pub use value::{FromValue, IntoValue, SharedValue, Value};
