use core::any::Any;

use crate::registry::TypeDescriptor;

/// A type whose members can be read and written by string key.
///
/// Usually implemented with [`#[derive(Record)]`](crate::derive::Record),
/// which also implements [`Keyed`] and [`KeyedMut`].
///
/// A manual implementation describes the members once; the descriptor is
/// built on first use and cached in a [`RecordRegistry`].
///
/// ```
/// use f_reflect::{Record, Value};
/// use f_reflect::access::{Keyed, KeyedMut, Subject, SubjectMut};
/// use f_reflect::registry::TypeDescriptor;
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Record for Counter {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::builder::<Self>()
///             .readonly_field("hits", |this| Ok(Value::from(this.hits)))
///             .build()
///     }
///
///     fn describer(&self) -> fn() -> TypeDescriptor {
///         <Self as Record>::describe
///     }
/// }
///
/// impl Keyed for Counter {
///     fn subject(&self) -> Subject<'_> {
///         Subject::Record(self)
///     }
/// }
///
/// impl KeyedMut for Counter {
///     fn subject_mut(&mut self) -> SubjectMut<'_> {
///         SubjectMut::Record(self)
///     }
/// }
///
/// let c = Counter { hits: 3 };
/// assert_eq!(f_reflect::access::get_value::<u32>("hits", &c), Ok(3));
/// ```
///
/// [`RecordRegistry`]: crate::registry::RecordRegistry
/// [`Keyed`]: crate::access::Keyed
/// [`KeyedMut`]: crate::access::KeyedMut
pub trait Record: Any {
    /// Build the member table of this type.
    fn describe() -> TypeDescriptor
    where
        Self: Sized;

    /// [`Record::describe`] of the concrete type, reachable through `dyn Record`.
    fn describer(&self) -> fn() -> TypeDescriptor;
}
