use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::info::{Type, TypePath};

// -----------------------------------------------------------------------------
// SlotKind

/// How a slot is written into the node of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotKind {
    /// A child node named after the slot.
    #[default]
    Child,
    /// An attribute named after the slot, carrying the primitive's value.
    ///
    /// Only valid for primitive slots.
    Attribute,
}

// -----------------------------------------------------------------------------
// Accessors

/// Type-erased read access to a slot.
///
/// Returns `None` if the owner is not of the expected type.
pub type SlotGetter = dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync;

/// Type-erased write access to a slot.
///
/// Hands the value back if the owner or the value has an unexpected type.
pub type SlotSetter = dyn Fn(&mut dyn Any, Box<dyn Any>) -> Result<(), Box<dyn Any>> + Send + Sync;

#[inline(always)]
fn erase_getter<F>(f: F) -> Arc<SlotGetter>
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[inline(always)]
fn erase_setter<F>(f: F) -> Arc<SlotSetter>
where
    F: Fn(&mut dyn Any, Box<dyn Any>) -> Result<(), Box<dyn Any>> + Send + Sync + 'static,
{
    Arc::new(f)
}

// -----------------------------------------------------------------------------
// SlotDescriptor

/// A serializable member of a type.
///
/// Generated by `#[derive(Serializable)]` for every field not marked
/// `#[serial(skip)]`, or built by hand:
///
/// ```
/// use vc_serial::registry::{SlotDescriptor, SlotKind};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// let x = SlotDescriptor::new::<Point, i32>("x", |p| &p.x, |p, v| p.x = v);
/// let y = SlotDescriptor::new::<Point, i32>("y", |p| &p.y, |p, v| p.y = v)
///     .with_kind(SlotKind::Attribute);
///
/// let mut point = Point::default();
/// y.set(&mut point, Box::new(4_i32)).ok().unwrap();
///
/// assert_eq!(point.y, 4);
/// assert_eq!(x.get(&point).and_then(|v| v.downcast_ref::<i32>()), Some(&0));
/// ```
#[derive(Clone)]
pub struct SlotDescriptor {
    name: &'static str,
    ty: Type,
    kind: SlotKind,
    transient: bool,
    getter: Arc<SlotGetter>,
    setter: Arc<SlotSetter>,
}

impl SlotDescriptor {
    /// Creates a slot of type `S` in owner `O`.
    pub fn new<O: Any, S: TypePath>(
        name: &'static str,
        get: fn(&O) -> &S,
        set: fn(&mut O, S),
    ) -> Self {
        let getter = erase_getter(move |owner| {
            owner
                .downcast_ref::<O>()
                .map(|owner| get(owner) as &dyn Any)
        });
        let setter = erase_setter(move |owner, value| {
            let Some(owner) = owner.downcast_mut::<O>() else {
                return Err(value);
            };
            let value = value.downcast::<S>()?;
            set(owner, *value);
            Ok(())
        });
        Self {
            name,
            ty: Type::of::<S>(),
            kind: SlotKind::Child,
            transient: false,
            getter,
            setter,
        }
    }

    /// Sets the [`SlotKind`].
    #[inline]
    pub fn with_kind(mut self, kind: SlotKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the slot as transient, it is ignored by the extractor.
    #[inline]
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    #[inline]
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    /// Reads the slot of `owner`.
    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.getter)(owner)
    }

    /// Writes `value` into the slot of `owner`.
    #[inline]
    pub fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.setter)(owner, value)
    }
}

impl fmt::Debug for SlotDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .field("transient", &self.transient)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::SlotDescriptor;

    #[derive(Default)]
    struct Owner {
        a: u8,
        b: String,
    }

    #[test]
    fn get_and_set() {
        let a = SlotDescriptor::new::<Owner, u8>("a", |o| &o.a, |o, v| o.a = v);
        let b = SlotDescriptor::new::<Owner, String>("b", |o| &o.b, |o, v| o.b = v);

        let mut owner = Owner::default();
        assert!(a.set(&mut owner, Box::new(7_u8)).is_ok());
        assert!(b.set(&mut owner, Box::new(String::from("seven"))).is_ok());

        assert_eq!(owner.a, 7);
        assert_eq!(b.get(&owner).and_then(|v| v.downcast_ref::<String>()).map(String::as_str), Some("seven"));
    }

    #[test]
    fn mismatched_types_are_rejected() {
        let a = SlotDescriptor::new::<Owner, u8>("a", |o| &o.a, |o, v| o.a = v);

        let mut owner = Owner::default();
        let rejected = a.set(&mut owner, Box::new(7_u16)).unwrap_err();
        assert_eq!(rejected.downcast_ref::<u16>(), Some(&7));

        let mut other = 0_u32;
        assert!(a.set(&mut other, Box::new(1_u8)).is_err());
        assert!(a.get(&other).is_none());
        assert_eq!(owner.a, 0);
    }
}
