//! Error types.
//!
//! - [`InitError`]: raised while building a [`SerialEngine`], no engine is produced.
//! - [`FormatError`]: raised by a single serialize or deserialize call.
//!
//! [`SerialEngine`]: crate::SerialEngine

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

use crate::info::{SerialMarkers, Serializability, Type};

// -----------------------------------------------------------------------------
// TypeList

/// An ordered list of types, displayed joined by a separator.
///
/// Used for dependency chains (`A -> B -> A`) and sets of stuck types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeList {
    types: Vec<Type>,
    separator: &'static str,
}

impl TypeList {
    /// A chain of dependencies, `A -> B -> C`.
    #[inline]
    pub fn chain(types: Vec<Type>) -> Self {
        Self {
            types,
            separator: " -> ",
        }
    }

    /// A plain set of types, `A, B, C`.
    #[inline]
    pub fn set(types: Vec<Type>) -> Self {
        Self {
            types,
            separator: ", ",
        }
    }

    #[inline]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    #[inline]
    pub fn contains(&self, ty: &Type) -> bool {
        self.types.contains(ty)
    }
}

impl fmt::Display for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.types.iter();
        if let Some(first) = iter.next() {
            fmt::Display::fmt(first, f)?;
            for ty in iter {
                f.write_str(self.separator)?;
                fmt::Display::fmt(ty, f)?;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// InitError

/// An error raised while building a [`SerialEngine`](crate::SerialEngine).
///
/// Every variant is fatal: initialization stops at the first error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InitError {
    #[error("type `{ty}` declares conflicting serializability markers: {markers}")]
    ConflictingSerializability { ty: Type, markers: SerialMarkers },

    #[error(
        "type `{ty}` is marked {category} but has no default constructor and does not override both serialization and deserialization"
    )]
    MissingConstructor {
        ty: Type,
        category: Serializability,
    },

    #[error(
        "primitive type `{ty}` has neither a text codec nor an override hook for {direction}"
    )]
    MissingPrimitiveCodec { ty: Type, direction: Direction },

    #[error("a {direction} delegate for `{ty}` is already registered")]
    DuplicateDelegate { ty: Type, direction: Direction },

    #[error("type `{ty}` references `{referenced}` which was never registered")]
    UnregisteredType { ty: Type, referenced: &'static str },

    #[error(
        "slot `{slot}` of `{ty}` is written as an attribute but its type `{slot_type}` is {category}, not primitive"
    )]
    AttributeSlotNotPrimitive {
        ty: Type,
        slot: &'static str,
        slot_type: Type,
        category: Serializability,
    },

    #[error("circular type dependency: {chain}")]
    CircularTypeDependency { chain: TypeList },

    #[error("cyclic dependency among {category} types [{remaining}], cycle: {cycle}")]
    CyclicDependency {
        category: Serializability,
        remaining: TypeList,
        cycle: TypeList,
    },

    #[error(
        "{container_category} type `{container}` cannot contain `{sub_type}` of category {sub_category}"
    )]
    ContainmentViolation {
        container: Type,
        container_category: Serializability,
        sub_type: Type,
        sub_category: Serializability,
    },

    #[error("type `{ty}` depends on `{dependency}` which has not been resolved")]
    UnresolvedDependency { ty: Type, dependency: Type },
}

/// The half of a delegate an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Serialize,
    Deserialize,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Serialize => "serialize",
            Self::Deserialize => "deserialize",
        })
    }
}

// -----------------------------------------------------------------------------
// FormatError

/// An error raised by a single serialize or deserialize call.
///
/// The engine stays usable after a `FormatError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("node `{node}`: cannot parse {value:?} as `{expected}`: {reason}")]
    MalformedPrimitive {
        node: String,
        value: String,
        expected: &'static str,
        reason: String,
    },

    #[error("node `{node}` of `{expected}` has no slot `{slot}`")]
    MissingSlot {
        node: String,
        slot: &'static str,
        expected: &'static str,
    },

    #[error("node `{node}` has no `Value` attribute for `{expected}`")]
    MissingValue {
        node: String,
        expected: &'static str,
    },

    #[error("no {direction} delegate for `{ty}`")]
    NoDelegate {
        ty: &'static str,
        direction: Direction,
    },

    #[error("expected a value of type `{expected}` at `{node}`")]
    TypeMismatch {
        node: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Custom(Box<str>),
}

impl FormatError {
    /// Creates a [`FormatError::Custom`], for use in override hooks.
    #[inline]
    pub fn custom(message: impl fmt::Display) -> Self {
        use alloc::string::ToString;
        Self::Custom(message.to_string().into_boxed_str())
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn type_mismatch(node: &str, expected: Type) -> Self {
        Self::TypeMismatch {
            node: node.into(),
            expected: expected.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{InitError, TypeList};
    use crate::info::{SerialMarkers, Type};

    #[test]
    fn chain_display() {
        let chain = TypeList::chain(vec![Type::of::<u8>(), Type::of::<u16>(), Type::of::<u8>()]);
        assert_eq!(chain.to_string(), "u8 -> u16 -> u8");
        assert_eq!(TypeList::set(vec![Type::of::<u8>()]).to_string(), "u8");
        assert_eq!(TypeList::default().to_string(), "");
    }

    #[test]
    fn conflicting_markers_message() {
        let err = InitError::ConflictingSerializability {
            ty: Type::of::<u8>(),
            markers: SerialMarkers::OBJECT | SerialMarkers::FILE,
        };
        assert_eq!(
            err.to_string(),
            "type `u8` declares conflicting serializability markers: OBJECT | FILE"
        );
    }
}
