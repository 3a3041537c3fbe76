use alloc::vec::Vec;

use crate::info::{Serializability, Type, ValidationStage};
use crate::registry::SlotKind;

// -----------------------------------------------------------------------------
// MetaSlot

/// A member slot as seen by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaSlot {
    name: &'static str,
    ty: Type,
    category: Serializability,
    kind: SlotKind,
}

impl MetaSlot {
    #[inline]
    pub(crate) const fn new(
        name: &'static str,
        ty: Type,
        category: Serializability,
        kind: SlotKind,
    ) -> Self {
        Self {
            name,
            ty,
            category,
            kind,
        }
    }

    /// Slot name, also the name of the child node or attribute.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the slot.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Category of the declared type.
    #[inline]
    pub const fn category(&self) -> Serializability {
        self.category
    }

    /// Whether the slot is written as a child node or an attribute.
    #[inline]
    pub const fn kind(&self) -> SlotKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// TypeMetaInfo

/// The extracted shape of a classified type.
///
/// Holds the non-transient slots in declaration order, the unique sub-types
/// in first-appearance order and, for override-compiled types, the explicit
/// dependencies declared with `#[serial(depends_on(..))]`.
///
/// Fully override-compiled types have no slots: their shape is whatever
/// the hooks produce.
#[derive(Debug, Clone)]
pub struct TypeMetaInfo {
    ty: Type,
    category: Serializability,
    slots: Vec<MetaSlot>,
    sub_types: Vec<Type>,
    dependencies: Vec<Type>,
    overrides_serialization: bool,
    overrides_deserialization: bool,
    stage: ValidationStage,
}

impl TypeMetaInfo {
    /// Creates an empty meta-info in the `PreAnalyzed` stage.
    pub(crate) fn new(
        ty: Type,
        category: Serializability,
        overrides_serialization: bool,
        overrides_deserialization: bool,
    ) -> Self {
        let mut stage = ValidationStage::Unvalidated;
        stage.advance(ValidationStage::PreAnalyzed);
        Self {
            ty,
            category,
            slots: Vec::new(),
            sub_types: Vec::new(),
            dependencies: Vec::new(),
            overrides_serialization,
            overrides_deserialization,
            stage,
        }
    }

    /// Appends a slot, recording its type as a sub-type on first appearance.
    pub(crate) fn push_slot(&mut self, slot: MetaSlot) {
        if !self.sub_types.contains(&slot.ty) {
            self.sub_types.push(slot.ty);
        }
        self.slots.push(slot);
    }

    /// Records an explicit dependency, ignoring duplicates.
    pub(crate) fn push_dependency(&mut self, ty: Type) {
        if !self.dependencies.contains(&ty) {
            self.dependencies.push(ty);
        }
    }

    #[inline]
    pub(crate) fn advance(&mut self, next: ValidationStage) {
        self.stage.advance(next);
    }

    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.stage.invalidate();
    }

    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub const fn category(&self) -> Serializability {
        self.category
    }

    /// Slots in declaration order.
    #[inline]
    pub fn slots(&self) -> &[MetaSlot] {
        &self.slots
    }

    /// Unique slot types in first-appearance order.
    #[inline]
    pub fn sub_types(&self) -> &[Type] {
        &self.sub_types
    }

    /// Explicit dependencies of override-compiled types.
    #[inline]
    pub fn dependencies(&self) -> &[Type] {
        &self.dependencies
    }

    /// Sub-types followed by the explicit dependencies not already listed.
    pub fn referenced_types(&self) -> impl Iterator<Item = Type> + '_ {
        self.sub_types.iter().copied().chain(
            self.dependencies
                .iter()
                .copied()
                .filter(|ty| !self.sub_types.contains(ty)),
        )
    }

    #[inline]
    pub const fn overrides_serialization(&self) -> bool {
        self.overrides_serialization
    }

    #[inline]
    pub const fn overrides_deserialization(&self) -> bool {
        self.overrides_deserialization
    }

    /// Both halves are provided by user hooks.
    #[inline]
    pub const fn is_fully_overridden(&self) -> bool {
        self.overrides_serialization && self.overrides_deserialization
    }

    #[inline]
    pub const fn stage(&self) -> ValidationStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{MetaSlot, TypeMetaInfo};
    use crate::info::{Serializability, Type, ValidationStage};
    use crate::registry::SlotKind;

    #[test]
    fn sub_types_are_unique() {
        let mut meta = TypeMetaInfo::new(Type::of::<u64>(), Serializability::Object, false, false);
        let i32_ty = Type::of::<i32>();
        let str_ty = Type::of::<alloc::string::String>();

        meta.push_slot(MetaSlot::new("x", i32_ty, Serializability::Primitive, SlotKind::Child));
        meta.push_slot(MetaSlot::new("y", i32_ty, Serializability::Primitive, SlotKind::Child));
        meta.push_slot(MetaSlot::new("s", str_ty, Serializability::Primitive, SlotKind::Attribute));
        meta.push_dependency(i32_ty);
        meta.push_dependency(Type::of::<bool>());

        assert_eq!(meta.slots().len(), 3);
        assert_eq!(meta.sub_types(), &[i32_ty, str_ty]);

        let referenced: Vec<Type> = meta.referenced_types().collect();
        assert_eq!(referenced, [i32_ty, str_ty, Type::of::<bool>()]);
        assert_eq!(meta.stage(), ValidationStage::PreAnalyzed);
    }
}
