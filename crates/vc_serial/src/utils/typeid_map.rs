use core::any::TypeId;
use core::fmt::Debug;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::utils::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// The registry, the classification tables and the delegate cache are all
/// keyed by type identity. Entries of the delegate cache must never be
/// replaced, so besides the usual operations the map offers
/// [`insert_once`](TypeIdMap::insert_once), which refuses to overwrite.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_serial::utils::TypeIdMap;
///
/// let mut map = TypeIdMap::<&str>::new();
/// assert!(map.insert_once(TypeId::of::<u8>(), "first").is_ok());
///
/// let rejected = map.insert_once(TypeId::of::<u8>(), "second").unwrap_err();
/// assert_eq!(rejected.into_value(), "second");
/// assert_eq!(map.get_type::<u8>(), Some(&"first"));
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

/// The value handed back by [`TypeIdMap::insert_once`] when the key is taken.
#[derive(Debug)]
pub struct Occupied<V> {
    type_id: TypeId,
    value: V,
}

impl<V> Occupied<V> {
    /// The key that already had an entry.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the rejected value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Sized for a whole registry up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, NoOpHashState))
    }

    /// Inserts `value` only if `type_id` has no entry yet.
    ///
    /// On success returns a reference to the stored value, otherwise the
    /// map is left unchanged and the value is returned inside [`Occupied`].
    pub fn insert_once(&mut self, type_id: TypeId, value: V) -> Result<&V, Occupied<V>> {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => Ok(entry.insert(value)),
            Entry::Occupied(_) => Err(Occupied { type_id, value }),
        }
    }

    /// Like [`insert_once`](Self::insert_once), but builds the value lazily.
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        let Entry::Vacant(entry) = self.0.entry(type_id) else {
            return false;
        };
        entry.insert(f());
        true
    }

    /// Overwrites the entry of `type_id`.
    ///
    /// Only the analysis tables use this; the delegate cache goes through
    /// [`insert_once`](Self::insert_once).
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.0.get(&TypeId::of::<T>())
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.0.contains_key(&TypeId::of::<T>())
    }

    /// Number of types with an entry.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        TypeIdMap(self.0.clone())
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn insert_once_keeps_first_value() {
        let mut map = TypeIdMap::new();
        assert_eq!(map.insert_once(TypeId::of::<i32>(), 1).ok(), Some(&1));

        let err = map.insert_once(TypeId::of::<i32>(), 2).unwrap_err();
        assert_eq!(err.type_id(), TypeId::of::<i32>());
        assert_eq!(err.into_value(), 2);
        assert_eq!(map.get_type::<i32>(), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn try_insert_is_lazy() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<u8>(), || 7));
        assert!(!map.try_insert(TypeId::of::<u8>(), || unreachable!()));
        assert!(map.contains_type::<u8>());
        assert!(!map.contains_type::<u16>());
    }
}
