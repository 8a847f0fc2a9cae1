use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::Value;
use crate::error::MemberError;

pub(crate) type Getter = Box<dyn Fn(&dyn Any) -> Result<Value, MemberError> + Send + Sync>;
pub(crate) type Setter = Box<dyn Fn(&mut dyn Any, Value) -> Result<(), MemberError> + Send + Sync>;

// -----------------------------------------------------------------------------
// MemberKind

/// Whether a member is backed by a field or by accessor methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// One readable, possibly writable, member of a [`Record`](crate::Record).
///
/// The accessors are type-erased; invoking them on an instance of another
/// type yields [`MemberError::WrongType`].
pub struct MemberDescriptor {
    pub(crate) name: &'static str,
    pub(crate) kind: MemberKind,
    pub(crate) getter: Getter,
    pub(crate) setter: Option<Setter>,
}

impl MemberDescriptor {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub const fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }

    /// Read the member from `subject`.
    #[inline]
    pub fn get(&self, subject: &dyn Any) -> Result<Value, MemberError> {
        (self.getter)(subject)
    }

    /// Write `value` into the member of `subject`.
    ///
    /// The member is left unchanged on error.
    pub fn set(&self, subject: &mut dyn Any, value: Value) -> Result<(), MemberError> {
        match &self.setter {
            Some(setter) => setter(subject, value),
            None => Err(MemberError::ReadOnly),
        }
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("read_only", &self.is_read_only())
            .finish()
    }
}
