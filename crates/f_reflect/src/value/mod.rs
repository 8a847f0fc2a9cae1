//! The dynamically typed [`Value`] that flows through keyed access.
//!
//! - [`Value`]: closed tagged union of everything a member can hold.
//! - [`SharedValue`]: a reference-counted, type-erased payload, shared on clone.
//! - [`IntoValue`] / [`FromValue`]: conversions at the API boundary.

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub use convert::{FromValue, IntoValue};
pub use shared::SharedValue;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::Mapping;
use crate::error::TypeCoercionError;

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value.
///
/// Every member of a [`Record`](crate::Record) and every entry of a
/// [`Mapping`] is read and written as a `Value`. Getting a concrete type
/// back out is an explicit, checked step through [`FromValue`].
///
/// Integers keep their signedness (`Int` / `UInt`) but compare equal across
/// the two variants when the numbers agree.
///
/// # Examples
///
/// ```
/// use f_reflect::Value;
///
/// let v = Value::from(3_i32);
/// assert_eq!(v, Value::UInt(3));
/// assert_eq!(v.take::<u8>().unwrap(), 3);
///
/// assert!(Value::from("x").take::<i32>().is_err());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    List(Vec<Value>),
    Map(Mapping),
    Shared(SharedValue),
}

impl Value {
    /// A short name of the variant, or the payload type for [`Value::Shared`].
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Shared(shared) => shared.type_name(),
        }
    }

    /// Convert into `T`, see [`FromValue`].
    #[inline]
    pub fn take<T: FromValue>(self) -> Result<T, TypeCoercionError> {
        T::from_value(self)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if the value is `Int` or an `UInt` that fits in `i64`.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_shared(&self) -> Option<&SharedValue> {
        match self {
            Self::Shared(shared) => Some(shared),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Shared(a), Self::Shared(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => fmt::Debug::fmt(b, f),
            Self::Int(n) => fmt::Debug::fmt(n, f),
            Self::UInt(n) => write!(f, "{n}u"),
            Self::Float(n) => fmt::Debug::fmt(n, f),
            Self::Char(c) => fmt::Debug::fmt(c, f),
            Self::Str(s) => fmt::Debug::fmt(s, f),
            Self::List(list) => f.debug_list().entries(list).finish(),
            Self::Map(map) => fmt::Debug::fmt(map, f),
            Self::Shared(shared) => fmt::Debug::fmt(shared, f),
        }
    }
}

/// Strings print without quotes, so `format!("{key}{value}")` reads naturally.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Display::fmt(b, f),
            Self::Int(n) => fmt::Display::fmt(n, f),
            Self::UInt(n) => fmt::Display::fmt(n, f),
            Self::Float(n) => fmt::Display::fmt(n, f),
            Self::Char(c) => fmt::Display::fmt(c, f),
            Self::Str(s) => f.write_str(s),
            Self::List(list) => {
                f.write_str("[")?;
                for (index, item) in list.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
            Self::Shared(shared) => write!(f, "<{}>", shared.type_name()),
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    IntoValue::into_value(value)
                }
            }
        )*
    };
}

impl_from_for_value!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, &str,
    Mapping,
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Value;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn signed_and_unsigned_compare_by_number() {
        assert_eq!(Value::Int(2), Value::UInt(2));
        assert_ne!(Value::Int(-1), Value::UInt(u64::MAX));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn display_is_unquoted() {
        let v = Value::List(vec![Value::from("a"), Value::from(1_i32), Value::Null]);
        assert_eq!(v.to_string(), "[a, 1, null]");
        assert_eq!(format!("{}{}", "B", Value::from("2")), "B2");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::UInt(7).as_i64(), Some(7));
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert!(Value::default().is_null());
        assert_eq!(Value::from(true).kind_name(), "bool");
    }
}
