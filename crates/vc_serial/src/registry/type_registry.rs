use alloc::vec::Vec;
use core::any::TypeId;

use log::{debug, warn};

use crate::engine::SerialEngine;
use crate::error::InitError;
use crate::registry::{Serializable, TypeDescriptor};
use crate::utils::{HashMap, HashSet, TypeIdMap};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The set of types known to the engine, in registration order.
///
/// The registry is the mutable half of initialization: types are added
/// with [`register`](Self::register) (which also registers the types a
/// descriptor refers to), then [`build`](Self::build) consumes the registry
/// and runs the initialization pipeline, producing an immutable
/// [`SerialEngine`].
///
/// Registration order is kept and drives every later phase, so the same
/// registrations always produce the same classification, layers and
/// compilation order.
///
/// # Example
///
/// ```
/// use vc_serial::{Node, Serializable, TypeRegistry};
///
/// #[derive(Serializable, Default, Debug, PartialEq)]
/// #[serial(object, default)]
/// pub struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Point>();
///
/// let engine = registry.build().unwrap();
/// let node = engine.serialize("P", &Point { x: 3, y: 4 }).unwrap();
///
/// assert_eq!(node.child("x").and_then(Node::value), Some("3"));
/// assert_eq!(engine.deserialize::<Point>(&node).unwrap(), Point { x: 3, y: 4 });
/// ```
pub struct TypeRegistry {
    descriptors: Vec<TypeDescriptor>,
    indices: TypeIdMap<usize>,
    type_path_to_index: HashMap<&'static str, usize>,
    ambiguous_paths: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
            indices: TypeIdMap::new(),
            type_path_to_index: HashMap::default(),
            ambiguous_paths: HashSet::default(),
        }
    }

    /// Creates a registry with the built-in primitive types registered.
    ///
    /// - `bool` `char` `String`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `Uuid` (feature `uuid`), `BigInt` (feature `bigint`),
    ///   `Decimal` (feature `decimal`)
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::impls::register_primitives(&mut registry);
        registry
    }

    /// Inserts a descriptor if its type is not registered yet.
    ///
    /// Returns `false` and drops the descriptor if the type already exists,
    /// the first registration wins. The types referenced by the descriptor
    /// are _not_ registered, use [`register`](Self::register) for that.
    pub fn register_descriptor(&mut self, descriptor: TypeDescriptor) -> bool {
        let ty = descriptor.ty();
        let index = self.descriptors.len();
        if !self.indices.try_insert(ty.id(), || index) {
            Self::report_dropped(self.get(ty.id()), &descriptor);
            return false;
        }
        self.descriptors.push(descriptor);

        let path = ty.path();
        if self.ambiguous_paths.contains(path) {
            return true;
        }
        if self.type_path_to_index.contains_key(path) {
            warn!(
                "type path `{path}` is shared by two registered types, \
                 lookup by path is disabled for it"
            );
            self.type_path_to_index.remove(path);
            self.ambiguous_paths.insert(path);
        } else {
            self.type_path_to_index.insert(path, index);
        }
        true
    }

    #[cold]
    fn report_dropped(kept: Option<&TypeDescriptor>, dropped: &TypeDescriptor) {
        let differs = kept.is_some_and(|kept| {
            kept.markers() != dropped.markers()
                || kept.overrides_serialization() != dropped.overrides_serialization()
                || kept.overrides_deserialization() != dropped.overrides_deserialization()
        });
        if differs {
            warn!(
                "`{}` is already registered with a different descriptor, the new one is dropped",
                dropped.ty()
            );
        } else {
            debug!("`{}` is already registered", dropped.ty());
        }
    }

    /// Registers `T` if it is not registered yet, then its dependencies.
    ///
    /// Dependencies are whatever [`Serializable::register_dependencies`]
    /// registers, for derived types the field types and the types named in
    /// `depends_on(..)`. A type already present is skipped together with its
    /// dependencies, so recursive types terminate.
    pub fn register<T: Serializable>(&mut self) {
        if self.register_descriptor(T::type_descriptor()) {
            T::register_dependencies(self);
        }
    }

    /// Registers every non-generic type annotated with
    /// `#[serial(auto_register)]`.
    ///
    /// Returns `true` if automatic registration is supported on the current
    /// platform. Repeated calls are cheap.
    ///
    /// Requires the `auto_register` feature, without it this does nothing
    /// and returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vc_serial::{Serializable, TypeRegistry};
    ///
    /// #[derive(Serializable, Default)]
    /// #[serial(object, default, auto_register)]
    /// pub struct Score {
    ///     value: u32,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains::<Score>());
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            if self.contains::<auto_register::__AvailFlag>() {
                return true;
            }
            auto_register::__register_types(self);
            self.contains::<auto_register::__AvailFlag>()
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Returns `true` if `T` is registered.
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.indices.contains_type::<T>()
    }

    /// Returns the descriptor of a registered type.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeDescriptor> {
        self.indices.get(&type_id).map(|&index| &self.descriptors[index])
    }

    /// Returns the descriptor of the type with the given path.
    ///
    /// Returns `None` for an [ambiguous](Self::is_ambiguous) path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeDescriptor> {
        self.type_path_to_index
            .get(type_path)
            .map(|&index| &self.descriptors[index])
    }

    /// Returns `true` if several registered types share `type_path`.
    ///
    /// Derived paths are `module_path!()` plus the ident, so same-named
    /// types declared in function bodies of one module collide.
    #[inline]
    pub fn is_ambiguous(&self, type_path: &str) -> bool {
        self.ambiguous_paths.contains(type_path)
    }

    /// Iterates the descriptors in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Runs the initialization pipeline and seals the engine.
    ///
    /// Phases, in order: classification, meta-info extraction, containment
    /// checks and dependency graph, layering, delegate compilation. The
    /// first failure aborts initialization.
    pub fn build(self) -> Result<SerialEngine, InitError> {
        SerialEngine::build(self)
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter().map(|d| d.ty())).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::info::{SerialMarkers, TypePath};
    use crate::registry::TypeDescriptor;

    #[test]
    fn new_registers_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.contains::<i32>());
        assert!(registry.contains::<String>());
        assert!(registry.contains::<bool>());
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn registration_order_is_kept() {
        struct A;
        struct B;
        impl TypePath for A {
            fn type_path() -> &'static str {
                "tests::A"
            }
            fn type_name() -> &'static str {
                "A"
            }
        }
        impl TypePath for B {
            fn type_path() -> &'static str {
                "tests::B"
            }
            fn type_name() -> &'static str {
                "B"
            }
        }

        let mut registry = TypeRegistry::empty();
        assert!(registry.register_descriptor(TypeDescriptor::new::<B>()));
        assert!(registry.register_descriptor(TypeDescriptor::new::<A>()));
        assert!(!registry.register_descriptor(TypeDescriptor::new::<B>()));

        let paths: alloc::vec::Vec<_> = registry.iter().map(|d| d.ty().path()).collect();
        assert_eq!(paths, ["tests::B", "tests::A"]);
    }

    #[test]
    fn first_descriptor_wins() {
        struct A;
        impl TypePath for A {
            fn type_path() -> &'static str {
                "tests::A"
            }
            fn type_name() -> &'static str {
                "A"
            }
        }

        let mut registry = TypeRegistry::empty();
        assert!(registry.register_descriptor(
            TypeDescriptor::new::<A>().with_markers(SerialMarkers::OBJECT)
        ));
        assert!(!registry.register_descriptor(
            TypeDescriptor::new::<A>().with_markers(SerialMarkers::FOLDER)
        ));

        assert_eq!(registry.len(), 1);
        let kept = registry.get(TypeId::of::<A>()).unwrap();
        assert_eq!(kept.markers(), SerialMarkers::OBJECT);
    }

    #[test]
    fn shared_type_path_is_ambiguous() {
        mod first {
            pub struct Item;
        }
        mod second {
            pub struct Item;
        }
        impl TypePath for first::Item {
            fn type_path() -> &'static str {
                "tests::Item"
            }
            fn type_name() -> &'static str {
                "Item"
            }
        }
        impl TypePath for second::Item {
            fn type_path() -> &'static str {
                "tests::Item"
            }
            fn type_name() -> &'static str {
                "Item"
            }
        }

        let mut registry = TypeRegistry::new();
        assert!(registry.register_descriptor(TypeDescriptor::new::<first::Item>()));
        assert!(registry.get_with_type_path("tests::Item").is_some());
        assert!(!registry.is_ambiguous("tests::Item"));

        assert!(registry.register_descriptor(TypeDescriptor::new::<second::Item>()));
        assert!(registry.is_ambiguous("tests::Item"));
        assert!(registry.get_with_type_path("tests::Item").is_none());
        assert!(registry.get(TypeId::of::<second::Item>()).is_some());
        assert!(registry.get_with_type_path("i32").is_some());
    }
}
