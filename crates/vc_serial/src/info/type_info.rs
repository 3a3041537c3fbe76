use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::InitError;
use crate::info::{Serializability, Type, TypeMetaInfo, ValidationStage};
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// TypeInfoKind

/// Category-specific resolved sub-types.
///
/// Each sub-type appears once, in first-appearance order.
#[derive(Debug, Clone)]
pub enum TypeInfoKind {
    Primitive,
    Object {
        sub_primitives: Vec<Arc<TypeInfo>>,
        sub_objects: Vec<Arc<TypeInfo>>,
    },
    File {
        sub_objects: Vec<Arc<TypeInfo>>,
    },
    Folder {
        sub_files: Vec<Arc<TypeInfo>>,
        sub_folders: Vec<Arc<TypeInfo>>,
    },
}

// -----------------------------------------------------------------------------
// TypeInfo

/// The resolved shape of a serializable type.
///
/// Unlike [`TypeMetaInfo`], the sub-types of a `TypeInfo` are themselves
/// resolved `TypeInfo`s, so the whole tree below a type can be walked
/// without looking anything up.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    ty: Type,
    kind: TypeInfoKind,
    stage: ValidationStage,
}

impl TypeInfo {
    /// Resolves `meta` against the already resolved `TypeInfo`s.
    ///
    /// Every referenced non-primitive type must be present in `resolved`,
    /// which the layering order guarantees. Primitive sub-types are looked
    /// up the same way, they are resolved before any composite type.
    ///
    /// The returned info is in the `Processed` stage.
    pub(crate) fn resolve(
        meta: &TypeMetaInfo,
        categories: &TypeIdMap<Serializability>,
        resolved: &TypeIdMap<Arc<TypeInfo>>,
    ) -> Result<TypeInfo, InitError> {
        let mut stage = ValidationStage::Unvalidated;
        stage.advance(ValidationStage::PreAnalyzed);

        let mut primitives = Vec::new();
        let mut objects = Vec::new();
        let mut files = Vec::new();
        let mut folders = Vec::new();

        for sub in meta.referenced_types() {
            let category = categories.get(&sub.id()).copied().unwrap_or_default();
            match category {
                Serializability::Primitive => primitives.push(sub),
                Serializability::Object => objects.push(sub),
                Serializability::File => files.push(sub),
                Serializability::Folder => folders.push(sub),
                Serializability::None => {
                    return Err(InitError::ContainmentViolation {
                        container: meta.ty(),
                        container_category: meta.category(),
                        sub_type: sub,
                        sub_category: category,
                    });
                }
            }
        }
        stage.advance(ValidationStage::Analyzed);

        let lookup = |types: Vec<Type>| -> Result<Vec<Arc<TypeInfo>>, InitError> {
            types
                .into_iter()
                .map(|sub| {
                    resolved
                        .get(&sub.id())
                        .cloned()
                        .ok_or(InitError::UnresolvedDependency {
                            ty: meta.ty(),
                            dependency: sub,
                        })
                })
                .collect()
        };

        stage.advance(ValidationStage::PreProcessed);
        let kind = match meta.category() {
            Serializability::Primitive => TypeInfoKind::Primitive,
            Serializability::Object => TypeInfoKind::Object {
                sub_primitives: lookup(primitives)?,
                sub_objects: lookup(objects)?,
            },
            Serializability::File => TypeInfoKind::File {
                sub_objects: lookup(objects)?,
            },
            Serializability::Folder => TypeInfoKind::Folder {
                sub_files: lookup(files)?,
                sub_folders: lookup(folders)?,
            },
            Serializability::None => {
                return Err(InitError::UnresolvedDependency {
                    ty: meta.ty(),
                    dependency: meta.ty(),
                });
            }
        };
        stage.advance(ValidationStage::Processed);

        Ok(TypeInfo {
            ty: meta.ty(),
            kind,
            stage,
        })
    }

    /// Marks the info as validated once its delegates are compiled.
    #[inline]
    pub(crate) fn validate(&mut self) {
        self.stage.advance(ValidationStage::Validated);
    }

    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub const fn kind(&self) -> &TypeInfoKind {
        &self.kind
    }

    #[inline]
    pub const fn stage(&self) -> ValidationStage {
        self.stage
    }

    /// The category the info was resolved for.
    pub const fn serializability(&self) -> Serializability {
        match self.kind {
            TypeInfoKind::Primitive => Serializability::Primitive,
            TypeInfoKind::Object { .. } => Serializability::Object,
            TypeInfoKind::File { .. } => Serializability::File,
            TypeInfoKind::Folder { .. } => Serializability::Folder,
        }
    }

    /// All resolved sub-types, grouped by category.
    pub fn sub_infos(&self) -> impl Iterator<Item = &Arc<TypeInfo>> {
        let (first, second): (&[Arc<TypeInfo>], &[Arc<TypeInfo>]) = match &self.kind {
            TypeInfoKind::Primitive => (&[], &[]),
            TypeInfoKind::Object {
                sub_primitives,
                sub_objects,
            } => (sub_primitives, sub_objects),
            TypeInfoKind::File { sub_objects } => (sub_objects, &[]),
            TypeInfoKind::Folder {
                sub_files,
                sub_folders,
            } => (sub_files, sub_folders),
        };
        first.iter().chain(second)
    }
}
