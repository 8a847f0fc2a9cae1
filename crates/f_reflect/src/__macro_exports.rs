//! Items used by the code `#[derive(Record)]` generates. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::Record;
    use crate::registry::RecordRegistry;

    pub struct __AutoRegisterFunc(pub fn(&mut RecordRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub fn __register<T: Record>(registry: &mut RecordRegistry) {
        registry.register::<T>();
    }

    // Only runs where `inventory` works, which is how support is detected.
    fn __mark_available(registry: &mut RecordRegistry) {
        registry.auto_register_available = true;
    }

    inventory::submit! {
        __AutoRegisterFunc(__mark_available)
    }

    pub(crate) fn __register_types(registry: &mut RecordRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
