use core::fmt;

// -----------------------------------------------------------------------------
// Serializability

/// The category a type is classified into.
///
/// Assigned once per type by the
/// [classifier](crate::analysis::classify), immutable afterwards.
///
/// The categories form a containment hierarchy, see
/// [`containment`](crate::analysis::containment):
///
/// - `Primitive`: leaf, stored as a textual value.
/// - `Object`: made of `Primitive` and `Object` slots.
/// - `File`: made of `Object` slots.
/// - `Folder`: made of `File` and `Folder` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Serializability {
    /// Not serializable, silently excluded.
    #[default]
    None,
    Primitive,
    Object,
    File,
    Folder,
}

impl Serializability {
    /// All categories except `None`, in containment order.
    pub const SERIALIZABLE: [Serializability; 4] = [
        Serializability::Primitive,
        Serializability::Object,
        Serializability::File,
        Serializability::Folder,
    ];

    /// Returns `true` for every category except `None`.
    #[inline]
    pub const fn is_serializable(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` for categories whose delegates are compiled from slots.
    #[inline]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::File | Self::Folder)
    }

    /// The marker that declares this category.
    #[inline]
    pub const fn marker(self) -> SerialMarkers {
        match self {
            Self::None => SerialMarkers::empty(),
            Self::Primitive => SerialMarkers::PRIMITIVE,
            Self::Object => SerialMarkers::OBJECT,
            Self::File => SerialMarkers::FILE,
            Self::Folder => SerialMarkers::FOLDER,
        }
    }
}

impl fmt::Display for Serializability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.pad("None"),
            Self::Primitive => f.pad("Primitive"),
            Self::Object => f.pad("Object"),
            Self::File => f.pad("File"),
            Self::Folder => f.pad("Folder"),
        }
    }
}

// -----------------------------------------------------------------------------
// SerialMarkers

bitflags::bitflags! {
    /// Serialization capability markers declared by a type.
    ///
    /// A serializable type declares exactly one of them, declaring several
    /// is rejected during classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SerialMarkers: u8 {
        const PRIMITIVE = 1 << 0;
        const OBJECT = 1 << 1;
        const FILE = 1 << 2;
        const FOLDER = 1 << 3;
    }
}

impl SerialMarkers {
    /// The category of a single marker, `None` for an empty set.
    ///
    /// Returns `Err` with the conflicting set if several markers are present.
    pub fn serializability(self) -> Result<Serializability, SerialMarkers> {
        if self.bits().count_ones() > 1 {
            return Err(self);
        }
        Ok(if self.contains(Self::PRIMITIVE) {
            Serializability::Primitive
        } else if self.contains(Self::OBJECT) {
            Serializability::Object
        } else if self.contains(Self::FILE) {
            Serializability::File
        } else if self.contains(Self::FOLDER) {
            Serializability::Folder
        } else {
            Serializability::None
        })
    }
}

impl fmt::Display for SerialMarkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            f.write_str(name)?;
        }
        if first {
            f.write_str("<none>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{SerialMarkers, Serializability};

    #[test]
    fn single_marker_maps_to_category() {
        for category in Serializability::SERIALIZABLE {
            assert_eq!(category.marker().serializability(), Ok(category));
        }
        assert_eq!(SerialMarkers::empty().serializability(), Ok(Serializability::None));
    }

    #[test]
    fn composite_categories() {
        let composite: alloc::vec::Vec<_> = Serializability::SERIALIZABLE
            .into_iter()
            .filter(|category| category.is_composite())
            .collect();
        assert_eq!(
            composite,
            [Serializability::Object, Serializability::File, Serializability::Folder]
        );
        assert!(!Serializability::None.is_composite());
    }

    #[test]
    fn several_markers_conflict() {
        let markers = SerialMarkers::OBJECT | SerialMarkers::FILE;
        assert_eq!(markers.serializability(), Err(markers));
        assert_eq!(markers.to_string(), "OBJECT | FILE");
    }
}
