use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use crate::error::{Direction, FormatError};
use crate::info::{Serializability, Type, TypePath};
use crate::node::Node;
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// Closures

/// A compiled serializer: writes the value into a node with the given name.
pub type SerializeFn = dyn Fn(&str, &dyn Any) -> Result<Node, FormatError> + Send + Sync;

/// A compiled deserializer: reads a fresh value out of a node.
pub type DeserializeFn = dyn Fn(&Node) -> Result<Box<dyn Any>, FormatError> + Send + Sync;

#[inline(always)]
pub(crate) fn erase_serializer<F>(f: F) -> Arc<SerializeFn>
where
    F: Fn(&str, &dyn Any) -> Result<Node, FormatError> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[inline(always)]
pub(crate) fn erase_deserializer<F>(f: F) -> Arc<DeserializeFn>
where
    F: Fn(&Node) -> Result<Box<dyn Any>, FormatError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Downcasts the output of a deserializer.
pub(crate) fn take<T: Any>(node: &Node, value: Box<dyn Any>, ty: Type) -> Result<T, FormatError> {
    match value.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(FormatError::type_mismatch(node.name(), ty)),
    }
}

// -----------------------------------------------------------------------------
// Delegate

/// The compiled serialize and deserialize closures of one type.
///
/// Cloning is cheap, both closures are shared.
#[derive(Clone)]
pub struct Delegate {
    ty: Type,
    category: Serializability,
    serialize: Arc<SerializeFn>,
    deserialize: Arc<DeserializeFn>,
}

impl Delegate {
    #[inline]
    pub(crate) fn new(
        ty: Type,
        category: Serializability,
        serialize: Arc<SerializeFn>,
        deserialize: Arc<DeserializeFn>,
    ) -> Self {
        Self {
            ty,
            category,
            serialize,
            deserialize,
        }
    }

    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn category(&self) -> Serializability {
        self.category
    }

    /// Serializes `value` into a node called `name`.
    #[inline]
    pub fn serialize(&self, name: &str, value: &dyn Any) -> Result<Node, FormatError> {
        (self.serialize)(name, value)
    }

    /// Deserializes a boxed value out of `node`.
    #[inline]
    pub fn deserialize(&self, node: &Node) -> Result<Box<dyn Any>, FormatError> {
        (self.deserialize)(node)
    }

    #[inline]
    pub fn serialize_fn(&self) -> &Arc<SerializeFn> {
        &self.serialize
    }

    #[inline]
    pub fn deserialize_fn(&self) -> &Arc<DeserializeFn> {
        &self.deserialize
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("ty", &self.ty)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Delegates

/// The delegates an override hook may call.
///
/// Holds the compiled delegates of the types a type declares with
/// `#[serial(depends_on(..))]`.
#[derive(Clone, Default, Debug)]
pub struct Delegates {
    delegates: TypeIdMap<Delegate>,
}

impl Delegates {
    #[inline]
    pub(crate) fn insert(&mut self, delegate: Delegate) {
        self.delegates.insert(delegate.ty().id(), delegate);
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Delegate> {
        self.delegates.get(&type_id)
    }

    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.delegates.contains_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    fn delegate<T: TypePath>(&self, direction: Direction) -> Result<&Delegate, FormatError> {
        self.delegates
            .get_type::<T>()
            .ok_or(FormatError::NoDelegate {
                ty: T::type_path(),
                direction,
            })
    }

    /// Serializes a dependency into a node called `name`.
    pub fn serialize<T: TypePath>(&self, name: &str, value: &T) -> Result<Node, FormatError> {
        self.delegate::<T>(Direction::Serialize)?
            .serialize(name, value)
    }

    /// Deserializes a dependency out of `node`.
    pub fn deserialize<T: TypePath>(&self, node: &Node) -> Result<T, FormatError> {
        let value = self.delegate::<T>(Direction::Deserialize)?.deserialize(node)?;
        take(node, value, Type::of::<T>())
    }
}
