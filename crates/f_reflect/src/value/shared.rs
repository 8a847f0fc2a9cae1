use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

// -----------------------------------------------------------------------------
// SharedValue

/// A type-erased, reference-counted payload.
///
/// Cloning a `SharedValue` clones the [`Arc`], never the pointee, which is
/// how reference-typed members stay shared between a record and its
/// shallow copy. Equality is pointer identity.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use f_reflect::SharedValue;
///
/// let log = Arc::new(Mutex::new(Vec::<i32>::new()));
/// let shared = SharedValue::from_arc(log.clone());
/// let copy = shared.clone();
///
/// copy.downcast_ref::<Mutex<Vec<i32>>>().unwrap().lock().unwrap().push(1);
/// assert_eq!(*log.lock().unwrap(), [1]);
/// assert_eq!(shared, copy);
/// ```
#[derive(Clone)]
pub struct SharedValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl SharedValue {
    /// Move `value` behind a new [`Arc`].
    #[inline]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Share an existing [`Arc`].
    #[inline]
    pub fn from_arc<T: Any + Send + Sync>(arc: Arc<T>) -> Self {
        Self {
            inner: arc,
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Name of the payload type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// A new strong reference to the payload as `Arc<T>`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Whether both values point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for SharedValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared<{}>", self.type_name)
    }
}
