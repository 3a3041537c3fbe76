//! The meta-info extractor.
//!
//! Walks the slots of every serializable type and records a
//! [`TypeMetaInfo`]. Sub-types are extracted before the type that refers
//! to them, recursion is guarded by the stack of types being extracted.

use alloc::vec::Vec;

use log::trace;

use crate::analysis::Classification;
use crate::error::{InitError, TypeList};
use crate::info::{MetaSlot, Serializability, Type, TypeMetaInfo, ValidationStage};
use crate::registry::{SlotKind, TypeDescriptor, TypeRegistry};
use crate::utils::TypeIdMap;

/// Extracts the meta-info of every serializable type.
///
/// The returned meta-infos are in the `PostAnalyzed` stage.
pub fn extract_all(
    registry: &TypeRegistry,
    classification: &Classification,
) -> Result<TypeIdMap<TypeMetaInfo>, InitError> {
    let mut extractor = Extractor::new(registry, classification);
    for ty in classification.serializable() {
        extractor.visit(ty)?;
    }
    Ok(extractor.metas)
}

struct Extractor<'a> {
    registry: &'a TypeRegistry,
    classification: &'a Classification,
    metas: TypeIdMap<TypeMetaInfo>,
    stack: Vec<Type>,
}

impl<'a> Extractor<'a> {
    fn new(registry: &'a TypeRegistry, classification: &'a Classification) -> Self {
        Self {
            registry,
            classification,
            metas: TypeIdMap::with_capacity(registry.len()),
            stack: Vec::new(),
        }
    }

    fn category_of(&self, owner: Type, referenced: Type) -> Result<Serializability, InitError> {
        self.classification
            .category(referenced.id())
            .ok_or(InitError::UnregisteredType {
                ty: owner,
                referenced: referenced.path(),
            })
    }

    fn visit(&mut self, ty: Type) -> Result<(), InitError> {
        if self.metas.contains(&ty.id()) {
            return Ok(());
        }
        if let Some(start) = self.stack.iter().position(|entry| *entry == ty) {
            let mut chain = self.stack[start..].to_vec();
            chain.push(ty);
            return Err(InitError::CircularTypeDependency {
                chain: TypeList::chain(chain),
            });
        }

        let registry = self.registry;
        let Some(descriptor) = registry.get(ty.id()) else {
            // Serializable types always come from the registry.
            return Err(InitError::UnresolvedDependency {
                ty,
                dependency: ty,
            });
        };
        let category = self.category_of(ty, ty)?;

        let mut meta = TypeMetaInfo::new(
            ty,
            category,
            descriptor.overrides_serialization(),
            descriptor.overrides_deserialization(),
        );

        if category == Serializability::Primitive {
            meta.advance(ValidationStage::Analyzed);
            meta.advance(ValidationStage::PostAnalyzed);
            self.metas.insert(ty.id(), meta);
            return Ok(());
        }

        self.stack.push(ty);
        let walked = self.walk(descriptor, &mut meta);
        self.stack.pop();

        // A failed type stays recorded, invalidated.
        if let Err(err) = walked {
            meta.invalidate();
            self.metas.insert(ty.id(), meta);
            return Err(err);
        }

        meta.advance(ValidationStage::PostAnalyzed);
        trace!(
            "extracted `{ty}`: {} slots, {} sub-types, {} explicit dependencies",
            meta.slots().len(),
            meta.sub_types().len(),
            meta.dependencies().len(),
        );
        self.metas.insert(ty.id(), meta);
        Ok(())
    }

    /// Records the slots and dependencies of `meta`, then visits its sub-types.
    fn walk(&mut self, descriptor: &TypeDescriptor, meta: &mut TypeMetaInfo) -> Result<(), InitError> {
        let ty = meta.ty();
        if !meta.is_fully_overridden() {
            for slot in descriptor.slots().iter().filter(|slot| !slot.is_transient()) {
                let slot_category = self.category_of(ty, slot.ty())?;
                if slot.kind() == SlotKind::Attribute && slot_category != Serializability::Primitive
                {
                    return Err(InitError::AttributeSlotNotPrimitive {
                        ty,
                        slot: slot.name(),
                        slot_type: slot.ty(),
                        category: slot_category,
                    });
                }
                meta.push_slot(MetaSlot::new(
                    slot.name(),
                    slot.ty(),
                    slot_category,
                    slot.kind(),
                ));
            }
        }
        for &dependency in descriptor.dependencies() {
            self.category_of(ty, dependency)?;
            meta.push_dependency(dependency);
        }
        meta.advance(ValidationStage::Analyzed);

        for &sub in meta.sub_types() {
            // Unserializable sub-types are reported by the containment check.
            if self.category_of(ty, sub)?.is_serializable() {
                self.visit(sub)?;
            }
        }
        Ok(())
    }
}
