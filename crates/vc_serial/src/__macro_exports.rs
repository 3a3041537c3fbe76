//! Items used by the code generated by `#[derive(Serializable)]`.
//!
//! Not part of the public API.

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::TypePath;
    use crate::registry::{Serializable, TypeDescriptor, TypeRegistry};

    /// A registration function submitted by the derive macro.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Gives the derive macro a path-stable name for [`TypeRegistry::register`].
    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: Serializable> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered by the static table itself.
    ///
    /// Its presence after [`__register_types`] tells that the platform
    /// supports `inventory`. It carries no marker, so it is classified
    /// as not serializable.
    pub struct __AvailFlag;

    impl TypePath for __AvailFlag {
        fn type_path() -> &'static str {
            "vc_serial::__macro_exports::auto_register::__AvailFlag"
        }

        fn type_name() -> &'static str {
            "__AvailFlag"
        }
    }

    impl Serializable for __AvailFlag {
        fn type_descriptor() -> TypeDescriptor {
            TypeDescriptor::new::<Self>()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    pub(crate) fn __register_types(registry: &mut TypeRegistry) {
        let mut count = 0_usize;
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
            count += 1;
        }
        log::debug!("auto registration ran {count} registration functions");
    }
}
