//! Functional helpers over sequences, records and mappings.
//!
//! ## Menu
//!
//! - Sequences: [`map`], [`filter`], [`reduce`], [`shallow_flatten`], [`range`], [`identity`].
//! - Keyed subjects: [`map_keyed`], [`to_pairs`], [`pluck`], [`pick_all`].
//! - Building mappings: [`from_pairs`], [`from_rows`], [`zip`], [`zip_grid`], [`empty_mapping`].
//! - Rectangular data: [`Grid`], [`map_grid`].
//! - Order: [`shuffle`], [`shuffle_with`].
//! - Copies and conversions: [`shallow_clone`], [`shallow_clone_collection`],
//!   [`deep_clone_collection`], [`coerce_mapping`].
//!
//! Keyed access itself (`get_value`, `set_value`, `merge`, ...) is re-exported
//! from [`f_reflect::access`].
//!
//! # Examples
//!
//! ```
//! use f_funcs::{map, range, reduce};
//!
//! let squares = map(|v| v * v, range(1, 4));
//! assert_eq!(reduce(|acc, v| acc + v, 0, squares), 14);
//! ```
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod clone;
mod error;
mod grid;
mod keyed;
mod pairs;
mod seq;
mod shuffle;

// -----------------------------------------------------------------------------
// Exports

pub use clone::{coerce_mapping, deep_clone_collection, shallow_clone, shallow_clone_collection};
pub use error::{PairError, PairErrorKind, ShapeError};
pub use grid::{Grid, map_grid};
pub use keyed::{map_keyed, map_mapping, map_object, pick_all, pluck, to_pairs};
pub use pairs::{empty_mapping, from_pairs, from_rows, zip, zip_grid};
pub use seq::{filter, identity, map, range, reduce, shallow_flatten};
pub use shuffle::{shuffle, shuffle_with};

pub use f_reflect::access::{
    from_mapping, get_keys, get_value, get_value_or_default, get_values, merge, set_value,
    shallow_copy, to_mapping, try_set_value,
};
