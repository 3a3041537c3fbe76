use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::analysis::{Classification, DependencyGraph, containment, extract_all, layering};
use crate::compile::{Compiled, Compiler, Delegate, DelegateCache, take};
use crate::error::{Direction, FormatError, InitError};
use crate::info::{Serializability, Type, TypeInfo, TypeMetaInfo, TypePath};
use crate::node::Node;
use crate::registry::TypeRegistry;
use crate::utils::{HashSet, TypeIdMap};

// -----------------------------------------------------------------------------
// SerialEngine

/// The sealed serialization engine.
///
/// Built once by [`TypeRegistry::build`], immutable afterwards. Every
/// method is a read of the cached delegates and tables, so an engine can be
/// shared between threads behind an [`Arc`].
///
/// # Examples
///
/// ```
/// use vc_serial::{Node, TypeRegistry};
///
/// let engine = TypeRegistry::new().build().unwrap();
///
/// let node = engine.serialize("answer", &42_i32).unwrap();
/// assert_eq!(node, Node::primitive("answer", "42"));
/// assert_eq!(engine.deserialize::<i32>(&node).unwrap(), 42);
/// ```
pub struct SerialEngine {
    classification: Classification,
    metas: TypeIdMap<TypeMetaInfo>,
    infos: TypeIdMap<Arc<TypeInfo>>,
    cache: DelegateCache,
    graph: DependencyGraph,
    object_layers: Vec<Vec<Type>>,
    file_layers: Vec<Vec<Type>>,
    folder_layers: Vec<Vec<Type>>,
    compilation_order: Vec<Type>,
}

impl SerialEngine {
    pub(crate) fn build(registry: TypeRegistry) -> Result<Self, InitError> {
        let classification = Classification::new(&registry)?;

        let mut compiler = Compiler::new(&registry, &classification);
        compiler.register_primitives()?;

        let mut metas = extract_all(&registry, &classification)?;
        for ty in classification.serializable() {
            if let Some(meta) = metas.get_mut(&ty.id()) {
                containment::enforce(meta, &classification)?;
            }
        }
        let graph = DependencyGraph::new(&classification, &metas);
        log::debug!(
            "dependency graph: {} composite types, {} edges",
            graph.nodes().len(),
            graph.edge_count()
        );

        let mut processed: HashSet<TypeId> =
            classification.primitives().iter().map(Type::id).collect();
        let object_layers = layering::layer(
            Serializability::Object,
            classification.objects(),
            &mut processed,
            &graph,
        )?;
        let file_layers = layering::layer(
            Serializability::File,
            classification.files(),
            &mut processed,
            &graph,
        )?;
        let folder_layers = layering::layer(
            Serializability::Folder,
            classification.folders(),
            &mut processed,
            &graph,
        )?;

        compiler.validate_primitives(&mut metas)?;
        for layer in object_layers.iter().chain(&file_layers).chain(&folder_layers) {
            compiler.compile_layer(&mut metas, layer)?;
        }
        let Compiled {
            cache,
            infos,
            order,
        } = compiler.finish();

        log::info!(
            "serial engine sealed: {} types compiled, {} unserializable",
            order.len(),
            classification.unserializable().len()
        );

        Ok(Self {
            classification,
            metas,
            infos,
            cache,
            graph,
            object_layers,
            file_layers,
            folder_layers,
            compilation_order: order,
        })
    }

    // -------------------------------------------------------------------------
    // Serialization

    /// Serializes `value` into a node called `name`.
    ///
    /// Fails with [`FormatError::NoDelegate`] if `T` was not compiled.
    pub fn serialize<T: TypePath>(&self, name: &str, value: &T) -> Result<Node, FormatError> {
        let serializer =
            self.cache
                .serializer(TypeId::of::<T>())
                .ok_or(FormatError::NoDelegate {
                    ty: T::type_path(),
                    direction: Direction::Serialize,
                })?;
        serializer(name, value as &dyn Any)
    }

    /// Deserializes a `T` out of `node`.
    ///
    /// Fails with [`FormatError::NoDelegate`] if `T` was not compiled.
    pub fn deserialize<T: TypePath>(&self, node: &Node) -> Result<T, FormatError> {
        let deserializer =
            self.cache
                .deserializer(TypeId::of::<T>())
                .ok_or(FormatError::NoDelegate {
                    ty: T::type_path(),
                    direction: Direction::Deserialize,
                })?;
        take(node, deserializer(node)?, Type::of::<T>())
    }

    /// Serializes a type-erased value with the delegate of `type_id`.
    pub fn serialize_dyn(
        &self,
        type_id: TypeId,
        name: &str,
        value: &dyn Any,
    ) -> Result<Node, FormatError> {
        let serializer = self
            .cache
            .serializer(type_id)
            .ok_or_else(|| self.no_delegate(type_id, Direction::Serialize))?;
        serializer(name, value)
    }

    /// Deserializes a type-erased value with the delegate of `type_id`.
    pub fn deserialize_dyn(&self, type_id: TypeId, node: &Node) -> Result<Box<dyn Any>, FormatError> {
        let deserializer = self
            .cache
            .deserializer(type_id)
            .ok_or_else(|| self.no_delegate(type_id, Direction::Deserialize))?;
        deserializer(node)
    }

    #[cold]
    fn no_delegate(&self, type_id: TypeId, direction: Direction) -> FormatError {
        let ty = self
            .metas
            .get(&type_id)
            .map(|meta| meta.ty().path())
            .unwrap_or("<unregistered type>");
        FormatError::NoDelegate { ty, direction }
    }

    // -------------------------------------------------------------------------
    // Introspection

    /// The category of a registered type.
    #[inline]
    pub fn serializability(&self, type_id: TypeId) -> Option<Serializability> {
        self.classification.category(type_id)
    }

    /// The resolved info of a serializable type.
    #[inline]
    pub fn type_info(&self, type_id: TypeId) -> Option<&Arc<TypeInfo>> {
        self.infos.get(&type_id)
    }

    /// The extracted meta-info of a serializable type.
    #[inline]
    pub fn meta_info(&self, type_id: TypeId) -> Option<&TypeMetaInfo> {
        self.metas.get(&type_id)
    }

    /// The compiled delegate of a serializable type.
    #[inline]
    pub fn delegate(&self, type_id: TypeId) -> Option<Delegate> {
        self.cache.get(type_id)
    }

    /// The classification buckets.
    #[inline]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// The dependency graph among composite types.
    #[inline]
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    #[inline]
    pub fn object_layers(&self) -> &[Vec<Type>] {
        &self.object_layers
    }

    /// File layers, at most one.
    #[inline]
    pub fn file_layers(&self) -> &[Vec<Type>] {
        &self.file_layers
    }

    #[inline]
    pub fn folder_layers(&self) -> &[Vec<Type>] {
        &self.folder_layers
    }

    /// Every serializable type in the order its delegates were compiled.
    ///
    /// Primitives come first, then objects, files and folders layer by
    /// layer. A type always appears after the types it refers to.
    #[inline]
    pub fn compilation_order(&self) -> &[Type] {
        &self.compilation_order
    }
}

impl fmt::Debug for SerialEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialEngine")
            .field("cache", &self.cache)
            .field("object_layers", &self.object_layers)
            .field("file_layers", &self.file_layers)
            .field("folder_layers", &self.folder_layers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::SerialEngine;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_send_sync() {
        assert_send_sync::<SerialEngine>();
    }
}
