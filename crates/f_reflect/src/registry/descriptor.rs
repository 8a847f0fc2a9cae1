use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;

use f_utils::hash::HashMap;

use crate::Value;
use crate::error::MemberError;
use crate::registry::member::Setter;
use crate::registry::{MemberDescriptor, MemberKind};

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The member table of one [`Record`](crate::Record) type.
///
/// Members are kept in the order they were added; the derive adds
/// properties first and then fields, each in declaration order.
///
/// # Examples
///
/// ```
/// use f_reflect::Value;
/// use f_reflect::registry::{MemberKind, TypeDescriptor};
///
/// struct Point { x: i32, y: i32 }
///
/// let desc = TypeDescriptor::builder::<Point>()
///     .field("x", |p| Ok(Value::from(p.x)), |p, v| { p.x = v.take()?; Ok(()) })
///     .readonly_field("y", |p| Ok(Value::from(p.y)))
///     .build();
///
/// assert_eq!(desc.names().collect::<Vec<_>>(), ["x", "y"]);
/// assert_eq!(desc.member("x").unwrap().kind(), MemberKind::Field);
///
/// let mut p = Point { x: 1, y: 2 };
/// desc.member("x").unwrap().set(&mut p, Value::from(5)).unwrap();
/// assert_eq!(p.x, 5);
/// assert!(desc.member("y").unwrap().set(&mut p, Value::from(5)).is_err());
/// ```
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    members: Vec<MemberDescriptor>,
    indices: HashMap<&'static str, usize>,
}

impl TypeDescriptor {
    /// Start describing `T`.
    #[inline]
    pub fn builder<T: Any>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            descriptor: TypeDescriptor {
                type_id: TypeId::of::<T>(),
                type_name: core::any::type_name::<T>(),
                members: Vec::new(),
                indices: HashMap::default(),
            },
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look up a member by name. Names are case-sensitive.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        match self.indices.get(name) {
            Some(&index) => Some(&self.members[index]),
            None => None,
        }
    }

    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    #[inline]
    pub fn names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.members.iter().map(MemberDescriptor::name)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptorBuilder

/// Typed builder for a [`TypeDescriptor`], see [`TypeDescriptor::builder`].
///
/// Adding a member under a name that is already taken replaces the earlier
/// accessors and kind but keeps the original position.
pub struct TypeDescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeDescriptorBuilder<T> {
    fn push<G>(
        mut self,
        name: &'static str,
        kind: MemberKind,
        get: G,
        set: Option<Setter>,
    ) -> Self
    where
        G: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        let getter = Box::new(move |subject: &dyn Any| match subject.downcast_ref::<T>() {
            Some(this) => get(this),
            None => Err(MemberError::WrongType {
                expected: core::any::type_name::<T>(),
            }),
        });
        let member = MemberDescriptor {
            name,
            kind,
            getter,
            setter: set,
        };

        let TypeDescriptor {
            members, indices, ..
        } = &mut self.descriptor;
        match indices.get(name) {
            Some(&index) => members[index] = member,
            None => {
                indices.insert(name, members.len());
                members.push(member);
            }
        }
        self
    }

    fn erase_setter<S>(set: S) -> Setter
    where
        S: Fn(&mut T, Value) -> Result<(), MemberError> + Send + Sync + 'static,
    {
        Box::new(
            move |subject: &mut dyn Any, value: Value| match subject.downcast_mut::<T>() {
                Some(this) => set(this, value),
                None => Err(MemberError::WrongType {
                    expected: core::any::type_name::<T>(),
                }),
            },
        )
    }

    /// Add a writable field.
    pub fn field<G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<(), MemberError> + Send + Sync + 'static,
    {
        self.push(name, MemberKind::Field, get, Some(Self::erase_setter(set)))
    }

    /// Add a field that rejects writes.
    pub fn readonly_field<G>(self, name: &'static str, get: G) -> Self
    where
        G: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        self.push(name, MemberKind::Field, get, None)
    }

    /// Add a writable property.
    pub fn property<G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<(), MemberError> + Send + Sync + 'static,
    {
        self.push(name, MemberKind::Property, get, Some(Self::erase_setter(set)))
    }

    /// Add a property without a setter.
    pub fn readonly_property<G>(self, name: &'static str, get: G) -> Self
    where
        G: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        self.push(name, MemberKind::Property, get, None)
    }

    #[inline]
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::TypeDescriptor;
    use crate::Value;
    use crate::error::MemberError;
    use crate::registry::MemberKind;

    struct Pair {
        left: i32,
    }

    #[test]
    fn duplicate_name_replaces_in_place() {
        let desc = TypeDescriptor::builder::<Pair>()
            .readonly_field("a", |p| Ok(Value::from(p.left)))
            .readonly_field("b", |_| Ok(Value::Null))
            .readonly_property("a", |_| Ok(Value::from("replaced")))
            .build();

        assert_eq!(desc.names().collect::<Vec<_>>(), ["a", "b"]);
        let a = desc.member("a").unwrap();
        assert_eq!(a.kind(), MemberKind::Property);
        assert_eq!(a.get(&Pair { left: 1 }), Ok(Value::from("replaced")));
    }

    #[test]
    fn accessors_reject_other_types() {
        let desc = TypeDescriptor::builder::<Pair>()
            .field("left", |p| Ok(Value::from(p.left)), |p, v| {
                p.left = v.take()?;
                Ok(())
            })
            .build();
        let member = desc.member("left").unwrap();

        assert!(matches!(member.get(&1_u8), Err(MemberError::WrongType { .. })));
        let mut other = 0_u8;
        assert!(member.set(&mut other, Value::from(1)).is_err());
        assert!(desc.member("Left").is_none());
    }

    #[test]
    fn coercion_failure_leaves_field() {
        let desc = TypeDescriptor::builder::<Pair>()
            .field("left", |p| Ok(Value::from(p.left)), |p, v| {
                p.left = v.take()?;
                Ok(())
            })
            .build();
        let mut pair = Pair { left: 2 };
        let err = desc.member("left").unwrap().set(&mut pair, Value::from("x"));
        assert!(matches!(err, Err(MemberError::Coercion(_))));
        assert_eq!(pair.left, 2);
    }
}
