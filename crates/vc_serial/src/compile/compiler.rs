use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::trace;

use crate::analysis::Classification;
use crate::compile::{
    Delegate, DelegateCache, Delegates, DeserializeFn, SerializeFn, erase_deserializer,
    erase_serializer, primitives,
};
use crate::error::{FormatError, InitError};
use crate::info::{Type, TypeInfo, TypeMetaInfo, ValidationStage};
use crate::node::Node;
use crate::registry::{Constructor, SlotDescriptor, SlotKind, TypeDescriptor, TypeRegistry};
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// CompiledSlot

/// A slot bound to the delegates of its type.
struct CompiledSlot {
    slot: SlotDescriptor,
    serialize: Arc<SerializeFn>,
    deserialize: Arc<DeserializeFn>,
}

// -----------------------------------------------------------------------------
// Compiler

/// The output of the compilation pass.
pub(crate) struct Compiled {
    pub cache: DelegateCache,
    pub infos: TypeIdMap<Arc<TypeInfo>>,
    pub order: Vec<Type>,
}

/// Compiles delegates layer by layer into the write-once cache.
///
/// Every type is compiled after the types it refers to, so the delegates
/// of its slots and dependencies are always found in the cache.
pub(crate) struct Compiler<'a> {
    registry: &'a TypeRegistry,
    classification: &'a Classification,
    cache: DelegateCache,
    infos: TypeIdMap<Arc<TypeInfo>>,
    order: Vec<Type>,
}

impl<'a> Compiler<'a> {
    pub fn new(registry: &'a TypeRegistry, classification: &'a Classification) -> Self {
        Self {
            registry,
            classification,
            cache: DelegateCache::new(),
            infos: TypeIdMap::with_capacity(registry.len()),
            order: Vec::new(),
        }
    }

    fn descriptor(&self, ty: Type) -> Result<&'a TypeDescriptor, InitError> {
        self.registry
            .get(ty.id())
            .ok_or(InitError::UnresolvedDependency {
                ty,
                dependency: ty,
            })
    }

    /// Inserts the leaf delegates of every primitive type.
    pub fn register_primitives(&mut self) -> Result<(), InitError> {
        for &ty in self.classification.primitives() {
            let delegate = primitives::compile(self.descriptor(ty)?)?;
            self.cache.insert(delegate)?;
        }
        Ok(())
    }

    /// Resolves and validates the infos of the primitive types.
    pub fn validate_primitives(
        &mut self,
        metas: &mut TypeIdMap<TypeMetaInfo>,
    ) -> Result<(), InitError> {
        for &ty in self.classification.primitives() {
            let meta = metas.get_mut(&ty.id()).ok_or(InitError::UnresolvedDependency {
                ty,
                dependency: ty,
            })?;
            let mut info = TypeInfo::resolve(meta, self.classification.categories(), &self.infos)?;
            info.validate();
            meta.advance(ValidationStage::Validated);
            self.infos.insert(ty.id(), Arc::new(info));
            self.order.push(ty);
        }
        Ok(())
    }

    /// Compiles one layer.
    ///
    /// With the `rayon` feature the types of the layer are compiled in
    /// parallel, they never refer to each other. Insertion is sequential.
    pub fn compile_layer(
        &mut self,
        metas: &mut TypeIdMap<TypeMetaInfo>,
        layer: &[Type],
    ) -> Result<(), InitError> {
        #[cfg(feature = "rayon")]
        let compiled: Vec<(TypeInfo, Delegate)> = {
            use rayon::prelude::*;
            let this = &*self;
            let metas = &*metas;
            layer
                .par_iter()
                .map(|&ty| this.compile_type(metas, ty))
                .collect::<Result<_, _>>()?
        };

        #[cfg(not(feature = "rayon"))]
        let compiled: Vec<(TypeInfo, Delegate)> = layer
            .iter()
            .map(|&ty| self.compile_type(metas, ty))
            .collect::<Result<_, _>>()?;

        for (info, delegate) in compiled {
            let ty = info.ty();
            self.cache.insert(delegate)?;
            self.infos.insert(ty.id(), Arc::new(info));
            if let Some(meta) = metas.get_mut(&ty.id()) {
                meta.advance(ValidationStage::Validated);
            }
            self.order.push(ty);
            trace!("compiled `{ty}`");
        }
        Ok(())
    }

    pub fn finish(self) -> Compiled {
        Compiled {
            cache: self.cache,
            infos: self.infos,
            order: self.order,
        }
    }

    fn compile_type(
        &self,
        metas: &TypeIdMap<TypeMetaInfo>,
        ty: Type,
    ) -> Result<(TypeInfo, Delegate), InitError> {
        let meta = metas.get(&ty.id()).ok_or(InitError::UnresolvedDependency {
            ty,
            dependency: ty,
        })?;
        let descriptor = self.descriptor(ty)?;
        let mut info = TypeInfo::resolve(meta, self.classification.categories(), &self.infos)?;

        let slots: Arc<[CompiledSlot]> = if meta.is_fully_overridden() {
            Arc::new([])
        } else {
            self.compile_slots(ty, descriptor)?.into()
        };

        let serialize = match descriptor.serialize_hook() {
            Some(hook) => {
                let delegates = self.dependency_view(meta)?;
                erase_serializer(move |name, value| hook(name, value, &delegates))
            }
            None => member_serializer(ty, slots.clone()),
        };

        let deserialize = match descriptor.deserialize_hook() {
            Some(hook) => {
                let delegates = self.dependency_view(meta)?;
                erase_deserializer(move |node| hook(node, &delegates))
            }
            None => {
                let constructor =
                    descriptor
                        .constructor()
                        .ok_or(InitError::MissingConstructor {
                            ty,
                            category: meta.category(),
                        })?;
                member_deserializer(ty, constructor, slots)
            }
        };

        info.validate();
        Ok((info, Delegate::new(ty, meta.category(), serialize, deserialize)))
    }

    fn compile_slots(
        &self,
        ty: Type,
        descriptor: &TypeDescriptor,
    ) -> Result<Vec<CompiledSlot>, InitError> {
        descriptor
            .slots()
            .iter()
            .filter(|slot| !slot.is_transient())
            .map(|slot| -> Result<CompiledSlot, InitError> {
                let unresolved = InitError::UnresolvedDependency {
                    ty,
                    dependency: slot.ty(),
                };
                Ok(CompiledSlot {
                    slot: slot.clone(),
                    serialize: self
                        .cache
                        .serializer(slot.ty().id())
                        .ok_or_else(|| unresolved.clone())?
                        .clone(),
                    deserialize: self
                        .cache
                        .deserializer(slot.ty().id())
                        .ok_or(unresolved)?
                        .clone(),
                })
            })
            .collect()
    }

    fn dependency_view(&self, meta: &TypeMetaInfo) -> Result<Delegates, InitError> {
        let mut delegates = Delegates::default();
        for &dependency in meta.dependencies() {
            let delegate = self
                .cache
                .get(dependency.id())
                .ok_or(InitError::UnresolvedDependency {
                    ty: meta.ty(),
                    dependency,
                })?;
            delegates.insert(delegate);
        }
        Ok(delegates)
    }
}

// -----------------------------------------------------------------------------
// Member-compiled closures

fn member_serializer(ty: Type, slots: Arc<[CompiledSlot]>) -> Arc<SerializeFn> {
    erase_serializer(move |name, value| {
        let mut node = Node::new(name);
        for compiled in slots.iter() {
            let slot = &compiled.slot;
            let field = slot
                .get(value)
                .ok_or_else(|| FormatError::type_mismatch(name, ty))?;
            let child = (compiled.serialize)(slot.name(), field)?;
            match slot.kind() {
                SlotKind::Child => node.push_child(child),
                SlotKind::Attribute => {
                    let text = child.value().ok_or_else(|| FormatError::MissingValue {
                        node: child.name().into(),
                        expected: slot.ty().path(),
                    })?;
                    node.set_attribute(slot.name(), text);
                }
            }
        }
        Ok(node)
    })
}

fn member_deserializer(
    ty: Type,
    constructor: Constructor,
    slots: Arc<[CompiledSlot]>,
) -> Arc<DeserializeFn> {
    erase_deserializer(move |node| {
        let mut value: Box<dyn core::any::Any> = constructor();
        for compiled in slots.iter() {
            let slot = &compiled.slot;
            let missing = || FormatError::MissingSlot {
                node: node.name().into(),
                slot: slot.name(),
                expected: ty.path(),
            };
            let field = match slot.kind() {
                SlotKind::Child => {
                    let child = node.child(slot.name()).ok_or_else(missing)?;
                    (compiled.deserialize)(child)?
                }
                SlotKind::Attribute => {
                    let text = node.attribute(slot.name()).ok_or_else(missing)?;
                    (compiled.deserialize)(&Node::primitive(slot.name(), text))?
                }
            };
            slot.set(&mut *value, field)
                .map_err(|_| FormatError::type_mismatch(node.name(), slot.ty()))?;
        }
        Ok(value)
    })
}
