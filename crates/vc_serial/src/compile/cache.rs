use alloc::sync::Arc;
use core::any::TypeId;

use crate::compile::{Delegate, DeserializeFn, SerializeFn};
use crate::error::{Direction, InitError};
use crate::info::{Serializability, Type};
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// DelegateTable

/// The serialize and deserialize closures of one category.
#[derive(Default)]
struct DelegateTable {
    serializers: TypeIdMap<Arc<SerializeFn>>,
    deserializers: TypeIdMap<Arc<DeserializeFn>>,
}

// -----------------------------------------------------------------------------
// DelegateCache

/// The write-once store of compiled delegates.
///
/// Keyed by [`TypeId`], with separate serialize and deserialize tables per
/// category. An entry is never replaced: inserting a second closure for
/// the same type and direction is [`InitError::DuplicateDelegate`].
#[derive(Default)]
pub struct DelegateCache {
    types: TypeIdMap<(Type, Serializability)>,
    primitive: DelegateTable,
    object: DelegateTable,
    file: DelegateTable,
    folder: DelegateTable,
}

impl DelegateCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, category: Serializability) -> Option<&DelegateTable> {
        match category {
            Serializability::None => None,
            Serializability::Primitive => Some(&self.primitive),
            Serializability::Object => Some(&self.object),
            Serializability::File => Some(&self.file),
            Serializability::Folder => Some(&self.folder),
        }
    }

    fn table_mut(&mut self, category: Serializability) -> Option<&mut DelegateTable> {
        match category {
            Serializability::None => None,
            Serializability::Primitive => Some(&mut self.primitive),
            Serializability::Object => Some(&mut self.object),
            Serializability::File => Some(&mut self.file),
            Serializability::Folder => Some(&mut self.folder),
        }
    }

    /// Inserts a serializer, fails if `ty` already has one.
    pub fn insert_serializer(
        &mut self,
        ty: Type,
        category: Serializability,
        serializer: Arc<SerializeFn>,
    ) -> Result<(), InitError> {
        let duplicate = InitError::DuplicateDelegate {
            ty,
            direction: Direction::Serialize,
        };
        let table = self.table_mut(category).ok_or(InitError::UnresolvedDependency {
            ty,
            dependency: ty,
        })?;
        table
            .serializers
            .insert_once(ty.id(), serializer)
            .map_err(|_| duplicate)?;
        self.types.insert(ty.id(), (ty, category));
        Ok(())
    }

    /// Inserts a deserializer, fails if `ty` already has one.
    pub fn insert_deserializer(
        &mut self,
        ty: Type,
        category: Serializability,
        deserializer: Arc<DeserializeFn>,
    ) -> Result<(), InitError> {
        let duplicate = InitError::DuplicateDelegate {
            ty,
            direction: Direction::Deserialize,
        };
        let table = self.table_mut(category).ok_or(InitError::UnresolvedDependency {
            ty,
            dependency: ty,
        })?;
        table
            .deserializers
            .insert_once(ty.id(), deserializer)
            .map_err(|_| duplicate)?;
        self.types.insert(ty.id(), (ty, category));
        Ok(())
    }

    /// Inserts both halves of `delegate`.
    pub fn insert(&mut self, delegate: Delegate) -> Result<(), InitError> {
        let ty = delegate.ty();
        let category = delegate.category();
        self.insert_serializer(ty, category, delegate.serialize_fn().clone())?;
        self.insert_deserializer(ty, category, delegate.deserialize_fn().clone())
    }

    /// The category a type's delegates were compiled for.
    #[inline]
    pub fn category(&self, type_id: TypeId) -> Option<Serializability> {
        self.types.get(&type_id).map(|&(_, category)| category)
    }

    pub fn serializer(&self, type_id: TypeId) -> Option<&Arc<SerializeFn>> {
        let category = self.category(type_id)?;
        self.table(category)?.serializers.get(&type_id)
    }

    pub fn deserializer(&self, type_id: TypeId) -> Option<&Arc<DeserializeFn>> {
        let category = self.category(type_id)?;
        self.table(category)?.deserializers.get(&type_id)
    }

    /// Returns both halves of a type's delegate, if both are compiled.
    pub fn get(&self, type_id: TypeId) -> Option<Delegate> {
        let &(ty, category) = self.types.get(&type_id)?;
        let table = self.table(category)?;
        Some(Delegate::new(
            ty,
            category,
            table.serializers.get(&type_id)?.clone(),
            table.deserializers.get(&type_id)?.clone(),
        ))
    }

    /// Number of types with at least one cached closure.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl core::fmt::Debug for DelegateCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelegateCache")
            .field("primitive", &self.primitive.serializers.len())
            .field("object", &self.object.serializers.len())
            .field("file", &self.file.serializers.len())
            .field("folder", &self.folder.serializers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::DelegateCache;
    use crate::compile::{Delegate, erase_deserializer, erase_serializer};
    use crate::error::{Direction, InitError};
    use crate::info::{Serializability, Type};
    use crate::node::Node;

    fn delegate() -> Delegate {
        Delegate::new(
            Type::of::<u8>(),
            Serializability::Primitive,
            erase_serializer(|name, _| Ok(Node::primitive(name, "0"))),
            erase_deserializer(|_| Ok(Box::new(0_u8))),
        )
    }

    #[test]
    fn write_once() {
        let mut cache = DelegateCache::new();
        assert!(cache.insert(delegate()).is_ok());
        assert_eq!(
            cache.insert(delegate()),
            Err(InitError::DuplicateDelegate {
                ty: Type::of::<u8>(),
                direction: Direction::Serialize,
            })
        );
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.category(Type::of::<u8>().id()), Some(Serializability::Primitive));

        let node = cache.get(Type::of::<u8>().id()).unwrap().serialize("v", &0_u8).unwrap();
        assert_eq!(node.value(), Some("0"));
    }

    #[test]
    fn half_delegates() {
        let mut cache = DelegateCache::new();
        let delegate = delegate();
        cache
            .insert_serializer(delegate.ty(), delegate.category(), delegate.serialize_fn().clone())
            .unwrap();

        assert!(cache.serializer(Type::of::<u8>().id()).is_some());
        assert!(cache.deserializer(Type::of::<u8>().id()).is_none());
        assert!(cache.get(Type::of::<u8>().id()).is_none());
    }
}
