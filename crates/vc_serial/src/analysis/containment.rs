//! The containment rules between categories.
//!
//! | Container   | May contain         |
//! |-------------|---------------------|
//! | `Primitive` | nothing             |
//! | `Object`    | `Primitive`, `Object` |
//! | `File`      | `Object`            |
//! | `Folder`    | `File`, `Folder`    |
//!
//! Explicit dependencies of override-compiled types follow the same table.

use crate::analysis::Classification;
use crate::error::InitError;
use crate::info::{Serializability, TypeMetaInfo, ValidationStage};

/// Returns `true` if a `container` type may hold a `sub` type.
///
/// ```
/// use vc_serial::Serializability::*;
/// use vc_serial::analysis::containment::allows;
///
/// assert!(allows(Object, Primitive));
/// assert!(allows(Folder, File));
/// assert!(!allows(File, Primitive));
/// assert!(!allows(Object, None));
/// ```
pub const fn allows(container: Serializability, sub: Serializability) -> bool {
    use Serializability::*;
    matches!(
        (container, sub),
        (Object, Primitive | Object) | (File, Object) | (Folder, File | Folder)
    )
}

/// Checks every referenced type of `meta` against the containment table.
///
/// On success the meta-info advances to `Processed`, on a violation it is
/// invalidated.
pub fn enforce(meta: &mut TypeMetaInfo, classification: &Classification) -> Result<(), InitError> {
    let container_category = meta.category();
    let violation = meta.referenced_types().find_map(|sub_type| {
        let sub_category = classification.category(sub_type.id()).unwrap_or_default();
        (!allows(container_category, sub_category)).then_some((sub_type, sub_category))
    });

    if let Some((sub_type, sub_category)) = violation {
        meta.invalidate();
        return Err(InitError::ContainmentViolation {
            container: meta.ty(),
            container_category,
            sub_type,
            sub_category,
        });
    }

    meta.advance(ValidationStage::Processed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{allows, enforce};
    use crate::analysis::Classification;
    use crate::error::InitError;
    use crate::info::{Serializability, Type, TypeMetaInfo, ValidationStage};

    #[test]
    fn table() {
        let allowed = [
            (Serializability::Object, Serializability::Primitive),
            (Serializability::Object, Serializability::Object),
            (Serializability::File, Serializability::Object),
            (Serializability::Folder, Serializability::File),
            (Serializability::Folder, Serializability::Folder),
        ];

        let all = [
            Serializability::None,
            Serializability::Primitive,
            Serializability::Object,
            Serializability::File,
            Serializability::Folder,
        ];
        for container in all {
            for sub in all {
                assert_eq!(
                    allows(container, sub),
                    allowed.contains(&(container, sub)),
                    "{container} containing {sub}"
                );
            }
        }
    }

    #[test]
    fn violation_invalidates() {
        let classification = Classification::default();
        let mut meta = TypeMetaInfo::new(Type::of::<u8>(), Serializability::Folder, false, false);
        meta.push_dependency(Type::of::<u16>());

        assert!(matches!(
            enforce(&mut meta, &classification),
            Err(InitError::ContainmentViolation {
                sub_category: Serializability::None,
                ..
            })
        ));
        assert_eq!(meta.stage(), ValidationStage::Invalidated);
    }
}
