use alloc::sync::Arc;
use core::any::TypeId;

use f_utils::TypeIdMap;

use crate::Record;
use crate::registry::TypeDescriptor;

// -----------------------------------------------------------------------------
// RecordRegistry

/// The cache of [`TypeDescriptor`]s, one per [`Record`] type.
///
/// Entries are inserted once and never replaced or evicted, so every lookup
/// of a type returns the same [`Arc`].
///
/// Most code goes through the shared [`RecordRegistryArc::global`] instance;
/// a registry can also be owned and handed to an
/// [`Accessor`](crate::access::Accessor) explicitly.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use f_reflect::derive::Record;
/// use f_reflect::registry::RecordRegistry;
///
/// #[derive(Record, Default)]
/// struct Foo {
///     pub value: i32,
/// }
///
/// let mut registry = RecordRegistry::new();
/// assert!(registry.register::<Foo>());
/// assert!(!registry.register::<Foo>());
///
/// let a = registry.get_type::<Foo>().unwrap();
/// let b = registry.get_type::<Foo>().unwrap();
/// assert!(Arc::ptr_eq(a, b));
/// ```
#[derive(Default)]
pub struct RecordRegistry {
    descriptors: TypeIdMap<Arc<TypeDescriptor>>,
    pub(crate) auto_register_available: bool,
}

impl RecordRegistry {
    /// Create an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            descriptors: TypeIdMap::new(),
            auto_register_available: false,
        }
    }

    /// Register `T` if it is not present yet.
    ///
    /// Returns `false` if the type was already registered.
    pub fn register<T: Record>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        let inserted = !self.descriptors.contains(&type_id);
        if inserted {
            self.descriptors
                .get_or_insert(type_id, Arc::new(T::describe()));
            log::debug!("registered record `{}`", core::any::type_name::<T>());
        }
        inserted
    }

    /// Insert a descriptor unless its type is present, returning the entry
    /// that ends up in the registry.
    pub fn insert_descriptor(&mut self, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
        let type_id = descriptor.type_id();
        if self.descriptors.contains(&type_id) {
            log::debug!(
                "discarded duplicate descriptor of `{}`",
                descriptor.type_name()
            );
        } else {
            log::debug!("cached descriptor of `{}`", descriptor.type_name());
        }
        Arc::clone(self.descriptors.get_or_insert(type_id, Arc::new(descriptor)))
    }

    /// Registers every type annotated with `#[record(auto_register)]`.
    ///
    /// Repeated calls are cheap and never insert duplicates.
    ///
    /// Returns `true` if automatic registration is supported on the current
    /// platform (through the `inventory` crate). Without the `auto_register`
    /// feature this does nothing and returns `false`.
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use f_reflect::derive::Record;
    /// use f_reflect::registry::RecordRegistry;
    ///
    /// #[derive(Record, Default)]
    /// #[record(auto_register)]
    /// struct Foo {
    ///     pub name: Option<String>,
    /// }
    ///
    /// let mut registry = RecordRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_register_available {
                crate::__macro_exports::auto_register::__register_types(self);
            }
            self.auto_register_available
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Arc<TypeDescriptor>> {
        self.descriptors.get(&type_id)
    }

    #[inline]
    pub fn get_type<T: Record>(&self) -> Option<&Arc<TypeDescriptor>> {
        self.descriptors.get_type::<T>()
    }

    /// Number of cached descriptors.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<TypeDescriptor>> {
        self.descriptors.values()
    }
}

// -----------------------------------------------------------------------------
// RecordRegistryArc

use std::sync::{LazyLock, PoisonError};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

static GLOBAL: LazyLock<RecordRegistryArc> = LazyLock::new(|| {
    let registry = RecordRegistryArc::default();
    registry.write().auto_register();
    registry
});

/// A shared, lock-guarded [`RecordRegistry`].
///
/// Lock poisoning is ignored.
#[derive(Clone, Default)]
pub struct RecordRegistryArc {
    /// The wrapped [`RecordRegistry`].
    pub internal: Arc<RwLock<RecordRegistry>>,
}

impl RecordRegistryArc {
    /// The process-wide registry used by the free functions of
    /// [`access`](crate::access).
    ///
    /// Types annotated with `#[record(auto_register)]` are registered when
    /// it is first used.
    #[inline]
    pub fn global() -> &'static RecordRegistryArc {
        &GLOBAL
    }

    /// Takes a read lock on the underlying [`RecordRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, RecordRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`RecordRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, RecordRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The descriptor of the record's concrete type, built on first use.
    #[inline]
    pub fn resolve(&self, record: &dyn Record) -> Arc<TypeDescriptor> {
        let any: &dyn core::any::Any = record;
        self.resolve_with(any.type_id(), record.describer())
    }

    /// The descriptor of `T`, built on first use.
    #[inline]
    pub fn resolve_type<T: Record>(&self) -> Arc<TypeDescriptor> {
        self.resolve_with(TypeId::of::<T>(), T::describe)
    }

    fn resolve_with(&self, type_id: TypeId, describe: fn() -> TypeDescriptor) -> Arc<TypeDescriptor> {
        {
            let registry = self.read();
            if let Some(found) = registry.get(type_id) {
                log::trace!("descriptor cache hit for `{}`", found.type_name());
                return Arc::clone(found);
            }
        }

        // Built without holding the lock; a racing thread may build one too
        // and only the first insert is kept.
        let descriptor = describe();
        debug_assert_eq!(descriptor.type_id(), type_id);
        self.write().insert_descriptor(descriptor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::sync::Barrier;
    use std::thread;

    use super::{RecordRegistry, RecordRegistryArc};
    use crate::Record;
    use crate::derive::Record;

    #[derive(Record, Default)]
    struct Racer {
        pub lap: u32,
    }

    #[derive(Record, Default)]
    struct Other {
        pub name: String,
    }

    #[test]
    fn lookups_share_one_entry() {
        let registry = RecordRegistryArc::default();
        let a = registry.resolve_type::<Racer>();
        let b = registry.resolve(&Racer::default());
        assert!(Arc::ptr_eq(&a, &b));

        let record: &dyn Record = &Other::default();
        let c = registry.resolve(record);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.read().len(), 2);
    }

    #[test]
    fn racing_threads_create_one_entry() {
        const THREADS: usize = 8;

        let registry = RecordRegistryArc::default();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = registry.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry.resolve_type::<Racer>()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.read().len(), 1);
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = RecordRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register::<Racer>());
        let first = Arc::clone(registry.get_type::<Racer>().unwrap());
        assert!(!registry.register::<Racer>());
        let again = registry.insert_descriptor(Racer::describe());
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(registry.len(), 1);
    }

    #[cfg(feature = "auto_register")]
    #[derive(Record, Default)]
    #[record(auto_register)]
    struct Preloaded {
        pub slot: u8,
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn global_registry_preloads_annotated_types() {
        let global = RecordRegistryArc::global().read();
        if global.auto_register_available {
            assert!(global.get_type::<Preloaded>().is_some());
        }
    }
}
