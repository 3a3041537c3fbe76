//! The type classifier.
//!
//! Assigns every registered type exactly one [`Serializability`], following
//! these rules in order:
//!
//! 1. Several markers: [`InitError::ConflictingSerializability`].
//! 2. No marker: `None`.
//! 3. Not public, or abstract: `None`.
//! 4. No default constructor and not fully override-compiled:
//!    [`InitError::MissingConstructor`].
//! 5. Otherwise the category of the marker.

use alloc::vec::Vec;
use core::any::TypeId;

use log::{debug, trace};

use crate::error::InitError;
use crate::info::{Serializability, Type};
use crate::registry::{TypeDescriptor, TypeRegistry};
use crate::utils::TypeIdMap;

/// Classifies a single type.
///
/// # Examples
///
/// ```
/// use vc_serial::analysis::classify;
/// use vc_serial::info::{SerialMarkers, Serializability};
/// use vc_serial::registry::TypeDescriptor;
///
/// let descriptor = TypeDescriptor::new::<u32>()
///     .with_markers(SerialMarkers::PRIMITIVE)
///     .with_default::<u32>();
/// assert_eq!(classify::classify(&descriptor), Ok(Serializability::Primitive));
///
/// let conflicting = descriptor.with_markers(SerialMarkers::OBJECT);
/// assert!(classify::classify(&conflicting).is_err());
/// ```
pub fn classify(descriptor: &TypeDescriptor) -> Result<Serializability, InitError> {
    let ty = descriptor.ty();
    let category = descriptor
        .markers()
        .serializability()
        .map_err(|markers| InitError::ConflictingSerializability { ty, markers })?;

    if category == Serializability::None {
        trace!("`{ty}` declares no serializability marker, skipped");
        return Ok(Serializability::None);
    }

    if !descriptor.is_public() || descriptor.is_abstract() {
        debug!(
            "`{ty}` is marked {category} but is not eligible (public: {}, abstract: {}), skipped",
            descriptor.is_public(),
            descriptor.is_abstract(),
        );
        return Ok(Serializability::None);
    }

    if descriptor.constructor().is_none() && !descriptor.is_fully_overridden() {
        return Err(InitError::MissingConstructor { ty, category });
    }

    trace!("`{ty}` classified as {category}");
    Ok(category)
}

// -----------------------------------------------------------------------------
// Classification

/// The result of classifying every registered type.
///
/// Each type sits in exactly one of five buckets, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    categories: TypeIdMap<Serializability>,
    unserializable: Vec<Type>,
    primitives: Vec<Type>,
    objects: Vec<Type>,
    files: Vec<Type>,
    folders: Vec<Type>,
}

impl Classification {
    /// Classifies every type of `registry`, stopping at the first error.
    pub fn new(registry: &TypeRegistry) -> Result<Self, InitError> {
        let mut classification = Self::default();
        for descriptor in registry.iter() {
            let category = classify(descriptor)?;
            classification.insert(descriptor.ty(), category);
        }
        debug!(
            "classified {} types: {} primitive, {} object, {} file, {} folder, {} unserializable",
            registry.len(),
            classification.primitives.len(),
            classification.objects.len(),
            classification.files.len(),
            classification.folders.len(),
            classification.unserializable.len(),
        );
        Ok(classification)
    }

    fn insert(&mut self, ty: Type, category: Serializability) {
        if self.categories.insert(ty.id(), category).is_some() {
            return;
        }
        let bucket = match category {
            Serializability::None => &mut self.unserializable,
            Serializability::Primitive => &mut self.primitives,
            Serializability::Object => &mut self.objects,
            Serializability::File => &mut self.files,
            Serializability::Folder => &mut self.folders,
        };
        bucket.push(ty);
    }

    /// The category of a registered type, `None` if it was never registered.
    #[inline]
    pub fn category(&self, type_id: TypeId) -> Option<Serializability> {
        self.categories.get(&type_id).copied()
    }

    /// The category of every registered type.
    #[inline]
    pub fn categories(&self) -> &TypeIdMap<Serializability> {
        &self.categories
    }

    /// The types of one category, in registration order.
    pub fn bucket(&self, category: Serializability) -> &[Type] {
        match category {
            Serializability::None => &self.unserializable,
            Serializability::Primitive => &self.primitives,
            Serializability::Object => &self.objects,
            Serializability::File => &self.files,
            Serializability::Folder => &self.folders,
        }
    }

    /// Every serializable type, bucket by bucket.
    pub fn serializable(&self) -> impl Iterator<Item = Type> + '_ {
        Serializability::SERIALIZABLE
            .into_iter()
            .flat_map(|category| self.bucket(category).iter().copied())
    }

    #[inline]
    pub fn unserializable(&self) -> &[Type] {
        &self.unserializable
    }

    #[inline]
    pub fn primitives(&self) -> &[Type] {
        &self.primitives
    }

    #[inline]
    pub fn objects(&self) -> &[Type] {
        &self.objects
    }

    #[inline]
    pub fn files(&self) -> &[Type] {
        &self.files
    }

    #[inline]
    pub fn folders(&self) -> &[Type] {
        &self.folders
    }
}

#[cfg(test)]
mod tests {
    use super::{Classification, classify};
    use crate::error::InitError;
    use crate::info::{SerialMarkers, Serializability, Type, TypePath};
    use crate::registry::{TypeDescriptor, TypeRegistry, Visibility};

    #[derive(Default)]
    struct Probe;

    impl TypePath for Probe {
        fn type_path() -> &'static str {
            "tests::Probe"
        }
        fn type_name() -> &'static str {
            "Probe"
        }
    }

    fn sample() -> TypeDescriptor {
        TypeDescriptor::new::<Probe>().with_default::<Probe>()
    }

    #[test]
    fn no_marker_is_none() {
        assert_eq!(classify(&sample()), Ok(Serializability::None));
    }

    #[test]
    fn conflicting_markers_are_fatal() {
        let descriptor = sample().with_markers(SerialMarkers::OBJECT | SerialMarkers::FILE);
        assert_eq!(
            classify(&descriptor),
            Err(InitError::ConflictingSerializability {
                ty: Type::of::<Probe>(),
                markers: SerialMarkers::OBJECT | SerialMarkers::FILE,
            })
        );
    }

    #[test]
    fn ineligible_types_are_excluded() {
        let private = sample()
            .with_markers(SerialMarkers::OBJECT)
            .with_visibility(Visibility::Restricted);
        assert_eq!(classify(&private), Ok(Serializability::None));

        let abstract_ty = sample().with_markers(SerialMarkers::FILE).with_abstract(true);
        assert_eq!(classify(&abstract_ty), Ok(Serializability::None));
    }

    #[test]
    fn constructor_is_required() {
        let descriptor = TypeDescriptor::new::<Probe>().with_markers(SerialMarkers::OBJECT);
        assert!(matches!(
            classify(&descriptor),
            Err(InitError::MissingConstructor { category: Serializability::Object, .. })
        ));
    }

    #[test]
    fn buckets_follow_registration_order() {
        let mut registry = TypeRegistry::empty();
        registry.register::<u8>();
        registry.register_descriptor(sample().with_markers(SerialMarkers::FOLDER));
        registry.register::<i64>();

        let classification = Classification::new(&registry).unwrap();
        assert_eq!(classification.primitives(), &[Type::of::<u8>(), Type::of::<i64>()]);
        assert_eq!(classification.folders(), &[Type::of::<Probe>()]);
        assert_eq!(
            classification.category(Type::of::<Probe>().id()),
            Some(Serializability::Folder)
        );
        assert_eq!(classification.serializable().count(), 3);
        assert!(classification.objects().is_empty());
    }
}
