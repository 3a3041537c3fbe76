use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt::{self, Display};
use core::str::FromStr;

use crate::compile::Delegates;
use crate::error::FormatError;
use crate::info::{SerialMarkers, Type, TypePath};
use crate::node::Node;
use crate::registry::{DeserializeOverride, SerializeOverride, SlotDescriptor};

// -----------------------------------------------------------------------------
// Hooks

/// Type-erased constructor of a default value.
pub type Constructor = fn() -> Box<dyn Any>;

/// Type-erased [`SerializeOverride::serialize`].
pub type SerializeHook = fn(&str, &dyn Any, &Delegates) -> Result<Node, FormatError>;

/// Type-erased [`DeserializeOverride::deserialize`].
pub type DeserializeHook = fn(&Node, &Delegates) -> Result<Box<dyn Any>, FormatError>;

fn construct_default<T: Default + Any>() -> Box<dyn Any> {
    Box::new(T::default())
}

fn serialize_hook<T: SerializeOverride>(
    name: &str,
    value: &dyn Any,
    delegates: &Delegates,
) -> Result<Node, FormatError> {
    match value.downcast_ref::<T>() {
        Some(value) => T::serialize(name, value, delegates),
        None => Err(FormatError::type_mismatch(name, Type::of::<T>())),
    }
}

fn deserialize_hook<T: DeserializeOverride>(
    node: &Node,
    delegates: &Delegates,
) -> Result<Box<dyn Any>, FormatError> {
    T::deserialize(node, delegates).map(|value| Box::new(value) as Box<dyn Any>)
}

// -----------------------------------------------------------------------------
// TextCodec

/// The textual round-trip of a primitive type.
///
/// Built from `Display` and `FromStr`, see [`TextCodec::of`].
#[derive(Clone, Copy)]
pub struct TextCodec {
    format: fn(&dyn Any) -> Option<String>,
    parse: fn(&str) -> Result<Box<dyn Any>, String>,
}

fn format_text<T: Display + Any>(value: &dyn Any) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}

fn parse_text<T>(text: &str) -> Result<Box<dyn Any>, String>
where
    T: FromStr + Any,
    T::Err: Display,
{
    match text.parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(err.to_string()),
    }
}

impl TextCodec {
    /// Creates the codec of `T`.
    #[inline]
    pub fn of<T>() -> Self
    where
        T: Display + FromStr + Any,
        T::Err: Display,
    {
        Self {
            format: format_text::<T>,
            parse: parse_text::<T>,
        }
    }

    /// Formats `value`, `None` if it has another type than the codec's.
    #[inline]
    pub fn format(&self, value: &dyn Any) -> Option<String> {
        (self.format)(value)
    }

    /// Parses `text`, the error is the reason reported by `FromStr`.
    #[inline]
    pub fn parse(&self, text: &str) -> Result<Box<dyn Any>, String> {
        (self.parse)(text)
    }
}

impl fmt::Debug for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCodec").finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Visibility

/// Visibility of a registered type.
///
/// Only public types are eligible for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The registration record of a type.
///
/// Everything the initialization pipeline knows about a type comes from
/// its descriptor: identity, eligibility, markers, slots and hooks.
///
/// `#[derive(Serializable)]` builds it from the item and its `#[serial]`
/// attributes. A manual [`Serializable`](crate::Serializable) impl builds
/// it with the `with_*` methods:
///
/// ```
/// use vc_serial::info::{SerialMarkers, TypePath};
/// use vc_serial::registry::{SlotDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// impl TypePath for Point {
///     fn type_path() -> &'static str { "demo::Point" }
///     fn type_name() -> &'static str { "Point" }
/// }
///
/// let descriptor = TypeDescriptor::new::<Point>()
///     .with_markers(SerialMarkers::OBJECT)
///     .with_default::<Point>()
///     .with_slot(SlotDescriptor::new::<Point, i32>("x", |p| &p.x, |p, v| p.x = v))
///     .with_slot(SlotDescriptor::new::<Point, i32>("y", |p| &p.y, |p, v| p.y = v));
///
/// assert_eq!(descriptor.slots().len(), 2);
/// assert!(descriptor.constructor().is_some());
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
    ty: Type,
    visibility: Visibility,
    is_abstract: bool,
    markers: SerialMarkers,
    constructor: Option<Constructor>,
    text_codec: Option<TextCodec>,
    slots: Vec<SlotDescriptor>,
    dependencies: Vec<Type>,
    serialize_hook: Option<SerializeHook>,
    deserialize_hook: Option<DeserializeHook>,
}

impl TypeDescriptor {
    /// Creates the descriptor of a public, concrete type without markers.
    pub fn new<T: TypePath>() -> Self {
        Self {
            ty: Type::of::<T>(),
            visibility: Visibility::Public,
            is_abstract: false,
            markers: SerialMarkers::empty(),
            constructor: None,
            text_codec: None,
            slots: Vec::new(),
            dependencies: Vec::new(),
            serialize_hook: None,
            deserialize_hook: None,
        }
    }

    #[inline]
    #[track_caller]
    fn assert_is<T: 'static>(&self) {
        debug_assert_eq!(
            TypeId::of::<T>(),
            self.ty.id(),
            "descriptor of `{}` configured with another type",
            self.ty
        );
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Adds capability markers.
    #[inline]
    pub fn with_markers(mut self, markers: SerialMarkers) -> Self {
        self.markers |= markers;
        self
    }

    /// Uses `T::default` as constructor.
    #[track_caller]
    pub fn with_default<T: Default + Any>(mut self) -> Self {
        self.assert_is::<T>();
        self.constructor = Some(construct_default::<T>);
        self
    }

    /// Uses `Display` and `FromStr` of `T` as primitive delegates.
    #[track_caller]
    pub fn with_text_codec<T>(mut self) -> Self
    where
        T: Display + FromStr + Any,
        T::Err: Display,
    {
        self.assert_is::<T>();
        self.text_codec = Some(TextCodec::of::<T>());
        self
    }

    /// Appends a member slot.
    #[inline]
    pub fn with_slot(mut self, slot: SlotDescriptor) -> Self {
        self.slots.push(slot);
        self
    }

    /// Declares a dependency of the override hooks on `T`.
    #[inline]
    pub fn with_dependency<T: TypePath>(self) -> Self {
        self.with_dependency_type(Type::of::<T>())
    }

    /// Declares a dependency of the override hooks.
    pub fn with_dependency_type(mut self, ty: Type) -> Self {
        if !self.dependencies.contains(&ty) {
            self.dependencies.push(ty);
        }
        self
    }

    /// Serializes with [`SerializeOverride::serialize`] instead of the slots.
    #[track_caller]
    pub fn with_serialize_override<T: SerializeOverride>(mut self) -> Self {
        self.assert_is::<T>();
        self.serialize_hook = Some(serialize_hook::<T>);
        self
    }

    /// Deserializes with [`DeserializeOverride::deserialize`] instead of the slots.
    #[track_caller]
    pub fn with_deserialize_override<T: DeserializeOverride>(mut self) -> Self {
        self.assert_is::<T>();
        self.deserialize_hook = Some(deserialize_hook::<T>);
        self
    }

    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[inline]
    pub fn markers(&self) -> SerialMarkers {
        self.markers
    }

    #[inline]
    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    #[inline]
    pub fn text_codec(&self) -> Option<TextCodec> {
        self.text_codec
    }

    /// Slots in declaration order, including transient ones.
    #[inline]
    pub fn slots(&self) -> &[SlotDescriptor] {
        &self.slots
    }

    #[inline]
    pub fn dependencies(&self) -> &[Type] {
        &self.dependencies
    }

    #[inline]
    pub fn serialize_hook(&self) -> Option<SerializeHook> {
        self.serialize_hook
    }

    #[inline]
    pub fn deserialize_hook(&self) -> Option<DeserializeHook> {
        self.deserialize_hook
    }

    #[inline]
    pub fn overrides_serialization(&self) -> bool {
        self.serialize_hook.is_some()
    }

    #[inline]
    pub fn overrides_deserialization(&self) -> bool {
        self.deserialize_hook.is_some()
    }

    /// Both halves are provided by override hooks.
    #[inline]
    pub fn is_fully_overridden(&self) -> bool {
        self.overrides_serialization() && self.overrides_deserialization()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("ty", &self.ty)
            .field("visibility", &self.visibility)
            .field("is_abstract", &self.is_abstract)
            .field("markers", &self.markers)
            .field("default", &self.constructor.is_some())
            .field("slots", &self.slots)
            .field("dependencies", &self.dependencies)
            .field("overrides_serialization", &self.overrides_serialization())
            .field("overrides_deserialization", &self.overrides_deserialization())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::TextCodec;

    #[test]
    fn text_codec_round_trip() {
        let codec = TextCodec::of::<i32>();

        assert_eq!(codec.format(&42_i32).as_deref(), Some("42"));
        assert_eq!(codec.format(&42_u8), None);

        let value = codec.parse("-7").unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&-7));
        assert!(codec.parse("abc").is_err());

        let codec = TextCodec::of::<String>();
        let value = codec.parse("").unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some(""));
    }
}
