//! Uniform get/set by string key over records and mappings.
//!
//! - [`Keyed`] / [`KeyedMut`]: anything readable/writable by key.
//! - [`Accessor`]: keyed access bound to one [`RecordRegistryArc`].
//! - Free functions: the same operations on [`RecordRegistryArc::global`].
//!
//! # Failure policy
//!
//! - Missing keys and absent subjects read as the type's default.
//! - A present value of the wrong type is a [`TypeCoercionError`] from
//!   [`get_value`], and the default from [`get_value_or_default`].
//! - Failing member accessors are [`AccessError`]s: [`set_value`] and the
//!   bulk operations log them with `log::warn!` and continue,
//!   [`try_set_value`] returns them.
//! - Adding an existing key to a mapping is a [`DuplicateKeyError`].
//!
//! # Examples
//!
//! ```
//! use f_reflect::derive::Record;
//! use f_reflect::access::{from_mapping, get_value, set_value, to_mapping};
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! struct ObjectA {
//!     pub a: i32,
//!     pub b: String,
//! }
//!
//! let mut obj = ObjectA::default();
//! set_value("a", 1, &mut obj).unwrap();
//! set_value("b", "two", &mut obj).unwrap();
//!
//! let mapping = to_mapping(&obj);
//! assert_eq!(get_value::<String>("b", &mapping).unwrap(), "two");
//! assert_eq!(from_mapping::<ObjectA>(&mapping), obj);
//! ```
//!
//! [`AccessError`]: crate::error::AccessError
//! [`DuplicateKeyError`]: crate::error::DuplicateKeyError
//! [`TypeCoercionError`]: crate::error::TypeCoercionError

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod keyed;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::Accessor;
pub use keyed::{Keyed, KeyedMut, Subject, SubjectMut};

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{DuplicateKeyError, TypeCoercionError, WriteError};
use crate::registry::RecordRegistryArc;
use crate::{FromValue, IntoValue, Mapping, Record, Value};

// -----------------------------------------------------------------------------
// Global entry points

/// See [`Accessor::get_value`].
#[inline]
pub fn get_value<T>(key: &str, subject: &(impl Keyed + ?Sized)) -> Result<T, TypeCoercionError>
where
    T: FromValue + Default,
{
    Accessor::global().get_value(key, subject)
}

/// See [`Accessor::get_value_or_default`].
#[inline]
pub fn get_value_or_default<T>(key: &str, subject: &(impl Keyed + ?Sized)) -> T
where
    T: FromValue + Default,
{
    Accessor::global().get_value_or_default(key, subject)
}

/// See [`Accessor::set_value`].
#[inline]
pub fn set_value(
    key: &str,
    value: impl IntoValue,
    subject: &mut (impl KeyedMut + ?Sized),
) -> Result<bool, DuplicateKeyError> {
    Accessor::global().set_value(key, value, subject)
}

/// See [`Accessor::try_set_value`].
#[inline]
pub fn try_set_value(
    key: &str,
    value: impl IntoValue,
    subject: &mut (impl KeyedMut + ?Sized),
) -> Result<bool, WriteError> {
    Accessor::global().try_set_value(key, value, subject)
}

/// See [`Accessor::get_keys`].
#[inline]
pub fn get_keys(subject: &(impl Keyed + ?Sized)) -> Vec<String> {
    Accessor::global().get_keys(subject)
}

/// See [`Accessor::get_values`].
#[inline]
pub fn get_values(subject: &(impl Keyed + ?Sized)) -> Vec<Value> {
    Accessor::global().get_values(subject)
}

/// See [`Accessor::to_mapping`].
#[inline]
pub fn to_mapping(subject: &(impl Keyed + ?Sized)) -> Mapping {
    Accessor::global().to_mapping(subject)
}

/// See [`Accessor::from_mapping`].
#[inline]
pub fn from_mapping<T: Record + Default>(mapping: &Mapping) -> T {
    Accessor::global().from_mapping(mapping)
}

/// See [`Accessor::shallow_copy`].
#[inline]
pub fn shallow_copy<T: Record + Default>(source: &T) -> T {
    Accessor::global().shallow_copy(source)
}

/// Right-biased union of two mappings.
///
/// Keys keep the order of `a`, followed by the keys only `b` has. Values
/// are not merged recursively.
///
/// ```
/// use f_reflect::Mapping;
/// use f_reflect::access::merge;
///
/// let a: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
/// let b: Mapping = [("b", 3), ("c", 1)].into_iter().collect();
/// let merged = merge(&a, &b);
///
/// assert_eq!(merged, [("a", 1), ("b", 3), ("c", 1)].into_iter().collect::<Mapping>());
/// assert_eq!(merged.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
/// ```
pub fn merge(a: &Mapping, b: &Mapping) -> Mapping {
    let mut merged = a.clone();
    merged.extend(b.iter().map(|(key, value)| (key, value.clone())));
    merged
}

/// Registers `T` in the global registry ahead of first use.
#[inline]
pub fn register<T: Record>() -> bool {
    RecordRegistryArc::global().write().register::<T>()
}
