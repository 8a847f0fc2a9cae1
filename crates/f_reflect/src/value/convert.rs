use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;

use crate::error::TypeCoercionError;
use crate::{Mapping, SharedValue, Value};

// -----------------------------------------------------------------------------
// Traits

/// Conversion of a Rust value into a [`Value`].
///
/// Implemented for primitives, `String`, `Option`, `Vec`, [`Mapping`],
/// [`Value`] and `Arc<T>` (as [`Value::Shared`]). `#[derive(Record)]` with
/// `#[record(value)]` implements it for records, as a [`Value::Map`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Checked conversion of a [`Value`] into a Rust value.
///
/// Conversions are strict: integers accept `Int`/`UInt` only when the number
/// fits, floats accept `Float` only (`f32` also rejects finite values beyond
/// its range), and nothing is parsed from strings.
///
/// # Examples
///
/// ```
/// use f_reflect::{FromValue, Value};
///
/// assert_eq!(u8::from_value(Value::Int(255)), Ok(255));
/// assert!(u8::from_value(Value::Int(256)).is_err());
/// assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
/// assert!(String::from_value(Value::Int(1)).is_err());
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, TypeCoercionError>;
}

#[inline(never)]
fn mismatch<T>(value: &Value) -> TypeCoercionError {
    TypeCoercionError::new::<T>(value.kind_name())
}

// -----------------------------------------------------------------------------
// Numbers

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl IntoValue for $ty {
            #[inline]
            fn into_value(self) -> Value {
                Value::Int(self as i64)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
                match value {
                    Value::Int(n) => <$ty>::try_from(n).map_err(|_| mismatch::<$ty>(&value)),
                    Value::UInt(n) => <$ty>::try_from(n).map_err(|_| mismatch::<$ty>(&value)),
                    _ => Err(mismatch::<$ty>(&value)),
                }
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl IntoValue for $ty {
            #[inline]
            fn into_value(self) -> Value {
                Value::UInt(self as u64)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
                match value {
                    Value::Int(n) => <$ty>::try_from(n).map_err(|_| mismatch::<$ty>(&value)),
                    Value::UInt(n) => <$ty>::try_from(n).map_err(|_| mismatch::<$ty>(&value)),
                    _ => Err(mismatch::<$ty>(&value)),
                }
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl IntoValue for f64 {
    #[inline]
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
        match value {
            Value::Float(n) => Ok(n),
            _ => Err(mismatch::<f64>(&value)),
        }
    }
}

impl IntoValue for f32 {
    #[inline]
    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
        match value {
            // Infinities and NaN carry over; finite values must fit.
            Value::Float(n) if n.is_finite() && n.abs() > f32::MAX as f64 => {
                Err(mismatch::<f32>(&value))
            }
            Value::Float(n) => Ok(n as f32),
            _ => Err(mismatch::<f32>(&value)),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),*) => {$(
        impl IntoValue for $ty {
            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    _ => Err(mismatch::<$ty>(&value)),
                }
            }
        }
    )*};
}

impl_scalar!(bool => Bool, char => Char, String => Str, Mapping => Map);

impl IntoValue for &str {
    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl IntoValue for Value {
    #[inline(always)]
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    #[inline(always)]
    fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Containers

impl<T: IntoValue> IntoValue for Option<T> {
    #[inline]
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
        match value {
            Value::List(list) => list.into_iter().map(T::from_value).collect(),
            _ => Err(mismatch::<Vec<T>>(&value)),
        }
    }
}

impl<T: Any + Send + Sync> IntoValue for Arc<T> {
    #[inline]
    fn into_value(self) -> Value {
        Value::Shared(SharedValue::from_arc(self))
    }
}

impl<T: Any + Send + Sync> FromValue for Arc<T> {
    fn from_value(value: Value) -> Result<Self, TypeCoercionError> {
        match &value {
            Value::Shared(shared) => shared.downcast::<T>().ok_or_else(|| mismatch::<Arc<T>>(&value)),
            _ => Err(mismatch::<Arc<T>>(&value)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{FromValue, IntoValue};
    use crate::Value;

    #[test]
    fn integers_check_range() {
        assert_eq!(i32::from_value(Value::UInt(5)), Ok(5));
        assert_eq!(u16::from_value(Value::Int(-1)).unwrap_err().expected, "u16");
        assert!(i8::from_value(Value::Float(1.0)).is_err());
        assert_eq!(usize::MAX.into_value(), Value::UInt(usize::MAX as u64));
    }

    #[test]
    fn floats_do_not_accept_integers() {
        assert_eq!(f32::from_value(Value::Float(0.5)), Ok(0.5));
        assert!(f64::from_value(Value::Int(1)).is_err());
    }

    #[test]
    fn f32_rejects_finite_values_out_of_range() {
        let err = f32::from_value(Value::Float(1e300)).unwrap_err();
        assert_eq!(err.found, "float");
        assert!(f32::from_value(Value::Float(-1e39)).is_err());
        assert_eq!(f32::from_value(Value::Float(f32::MAX as f64)), Ok(f32::MAX));
        assert_eq!(f32::from_value(Value::Float(f64::INFINITY)), Ok(f32::INFINITY));
        assert!(f32::from_value(Value::Float(f64::NAN)).unwrap().is_nan());
    }

    #[test]
    fn string_mismatch_reports_found_kind() {
        let err = String::from_value(Value::Int(1)).unwrap_err();
        assert_eq!(err.found, "int");
        assert!(err.expected.ends_with("String"));
    }

    #[test]
    fn nested_containers() {
        let v = vec![Some(1_i32), None].into_value();
        assert_eq!(v, Value::List(vec![Value::Int(1), Value::Null]));
        let back: Vec<Option<i32>> = v.take().unwrap();
        assert_eq!(back, [Some(1), None]);
        assert!(Vec::<i32>::from_value(Value::List(vec![Value::from("x")])).is_err());
    }

    #[test]
    fn arcs_round_trip_by_pointer() {
        let a = Arc::new(vec![1_u8]);
        let back: Arc<Vec<u8>> = Arc::clone(&a).into_value().take().unwrap();
        assert!(Arc::ptr_eq(&a, &back));
        assert!(Arc::<String>::from_value(a.into_value()).is_err());
    }
}
