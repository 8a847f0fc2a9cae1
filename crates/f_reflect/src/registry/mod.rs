//! Per-type member tables and the cache that owns them.
//!
//! - [`MemberDescriptor`]: name, kind and type-erased accessors of one member.
//! - [`TypeDescriptor`]: the ordered member table of a [`Record`](crate::Record) type.
//! - [`RecordRegistry`]: at most one [`TypeDescriptor`] per type, never evicted.
//! - [`RecordRegistryArc`]: a lock-guarded shared registry, including the global one.
//!
//! ## auto_register
//!
//! See [`RecordRegistry::auto_register`].
//!
//! Static registration is built on the [`inventory`] crate. On platforms it
//! does not support, `auto_register` returns `false` and registers nothing;
//! descriptors are still built lazily on first access.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod member;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{TypeDescriptor, TypeDescriptorBuilder};
pub use member::{MemberDescriptor, MemberKind};
pub use type_registry::{RecordRegistry, RecordRegistryArc};
