//! Error types of keyed access.
//!
//! - [`TypeCoercionError`]: a [`Value`](crate::Value) did not hold the requested type.
//! - [`MemberError`]: why a single generated getter or setter failed.
//! - [`AccessError`]: a [`MemberError`] together with the type and key it happened on.
//! - [`DuplicateKeyError`]: an add-only insert hit an existing key.
//! - [`WriteError`]: everything a keyed write can report.

use alloc::string::{String, ToString};
use core::{error, fmt};

// -----------------------------------------------------------------------------
// TypeCoercionError

/// A value could not be converted to the requested Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCoercionError {
    /// Name of the requested type.
    pub expected: &'static str,
    /// Name of what the value actually held.
    pub found: &'static str,
}

impl TypeCoercionError {
    /// Mismatch between the type `T` and a value described by `found`.
    #[inline]
    pub fn new<T: ?Sized>(found: &'static str) -> Self {
        Self {
            expected: core::any::type_name::<T>(),
            found,
        }
    }
}

impl fmt::Display for TypeCoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot coerce `{}` into `{}`", self.found, self.expected)
    }
}

impl error::Error for TypeCoercionError {}

// -----------------------------------------------------------------------------
// MemberError

/// Failure of one member accessor, without context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    /// The member has no setter.
    ReadOnly,
    /// The written value had the wrong type for the member.
    Coercion(TypeCoercionError),
    /// A property getter or setter reported an error.
    Failed(String),
    /// The accessor was invoked on an instance of another type.
    WrongType { expected: &'static str },
}

impl MemberError {
    /// Wrap the error of a fallible property accessor.
    #[inline]
    pub fn failed(err: impl fmt::Display) -> Self {
        Self::Failed(err.to_string())
    }
}

impl From<TypeCoercionError> for MemberError {
    #[inline]
    fn from(value: TypeCoercionError) -> Self {
        Self::Coercion(value)
    }
}

impl fmt::Display for MemberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => f.write_str("member is read-only"),
            Self::Coercion(err) => fmt::Display::fmt(err, f),
            Self::Failed(msg) => write!(f, "accessor failed: {msg}"),
            Self::WrongType { expected } => {
                write!(f, "accessor of `{expected}` called on another type")
            }
        }
    }
}

impl error::Error for MemberError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Coercion(err) => Some(err),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// A member accessor failed while reading or writing `key` on a `type_name`.
///
/// These are contained: the logging entry points report them with
/// `log::warn!` and carry on with the remaining members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    pub type_name: &'static str,
    pub key: String,
    pub cause: MemberError,
}

impl AccessError {
    #[inline]
    pub fn new(type_name: &'static str, key: &str, cause: MemberError) -> Self {
        Self {
            type_name,
            key: key.to_string(),
            cause,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}::{}`: {}", self.type_name, self.key, self.cause)
    }
}

impl error::Error for AccessError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.cause)
    }
}

// -----------------------------------------------------------------------------
// DuplicateKeyError

/// An add-only insert found the key already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyError {
    pub key: String,
}

impl fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key `{}` already exists", self.key)
    }
}

impl error::Error for DuplicateKeyError {}

// -----------------------------------------------------------------------------
// WriteError

/// Every outcome of a failed keyed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    Access(AccessError),
    DuplicateKey(DuplicateKeyError),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access(err) => fmt::Display::fmt(err, f),
            Self::DuplicateKey(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for WriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::DuplicateKey(err) => Some(err),
        }
    }
}

impl From<AccessError> for WriteError {
    #[inline]
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

impl From<DuplicateKeyError> for WriteError {
    #[inline]
    fn from(value: DuplicateKeyError) -> Self {
        Self::DuplicateKey(value)
    }
}
