//! The fixed-size slot table and its id cache.

use std::fmt;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::hash::{slot_of, TABLE_SIZE};

/// Two-component value stored per slot (e.g. base and percent modifier).
pub type Payload = [f32; 2];

/// Resolved slot handle.
///
/// Always in `0..TABLE_SIZE`. The safe constructors either mask or check, so
/// holding a `SlotId` is proof that indexing the slot array with it is in
/// bounds. Ids are only meaningful for the table that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u16);

impl SlotId {
    /// Largest valid id.
    pub const MAX: SlotId = SlotId((TABLE_SIZE - 1) as u16);

    /// Checked conversion from a raw index.
    #[inline]
    pub fn new(raw: usize) -> Option<Self> {
        (raw < TABLE_SIZE).then(|| Self(raw as u16))
    }

    /// Unchecked conversion from a raw index.
    ///
    /// # Safety
    ///
    /// `raw` must be less than [`TABLE_SIZE`]. Ids built from anything else make
    /// [`PercentTable::get_unchecked`] and [`PercentTable::set_unchecked`]
    /// read or write out of bounds.
    #[inline]
    pub unsafe fn new_unchecked(raw: usize) -> Self {
        debug_assert!(raw < TABLE_SIZE, "slot index {raw} out of range");
        Self(raw as u16)
    }

    /// Caller has already masked `masked` into range.
    #[inline]
    pub(crate) fn from_masked(masked: i32) -> Self {
        debug_assert!((0..TABLE_SIZE as i32).contains(&masked));
        Self(masked as u16)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<SlotId> for usize {
    #[inline]
    fn from(id: SlotId) -> usize {
        id.index()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String-keyed lookup table backed by a fixed array of [`TABLE_SIZE`] slots.
///
/// Keys are hashed with [`crate::hash::hash`] and masked to a slot. There is no
/// collision resolution: two keys that land on the same slot share it, and the
/// most recent write wins. The first resolution of each key is memoized so
/// repeated string lookups skip the hash; callers on a hot path should call
/// [`PercentTable::id`] once and use [`PercentTable::get_unchecked`] /
/// [`PercentTable::set_unchecked`] afterwards.
#[derive(Clone)]
pub struct PercentTable {
    /// Always exactly `TABLE_SIZE` long.
    slots: Box<[Option<Payload>]>,
    /// Memoized key -> slot. Grows monotonically.
    ids: FxHashMap<Box<str>, SlotId>,
    /// Last key to claim each slot through `validate_key`.
    #[cfg(any(debug_assertions, feature = "collision-check"))]
    pub(crate) claims: FxHashMap<SlotId, Box<str>>,
}

impl PercentTable {
    pub fn new() -> Self {
        debug!("allocating percent table with {TABLE_SIZE} slots");
        Self {
            slots: vec![None; TABLE_SIZE].into_boxed_slice(),
            ids: FxHashMap::default(),
            #[cfg(any(debug_assertions, feature = "collision-check"))]
            claims: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of distinct keys resolved so far.
    #[inline]
    pub fn resolved_len(&self) -> usize {
        self.ids.len()
    }

    /// Number of slots holding a payload.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Resolve `key` to its slot, memoizing the result on first use.
    ///
    /// Repeated calls for the same key return the same id for the lifetime of
    /// the table.
    pub fn resolve(&mut self, key: &str) -> SlotId {
        if let Some(&id) = self.ids.get(key) {
            return id;
        }
        let id = slot_of(key);
        trace!("resolved {key:?} to slot {id}");
        self.ids.insert(key.into(), id);
        id
    }

    /// Pre-resolve `key` for use with the indexed accessors.
    #[inline]
    pub fn id(&mut self, key: &str) -> SlotId {
        self.resolve(key)
    }

    /// Cached id for `key`, without resolving it.
    pub fn cached_id(&self, key: &str) -> Option<SlotId> {
        self.ids.get(key).copied()
    }

    /// Payload in `key`'s slot, or `None` if the slot was never written.
    ///
    /// A colliding key written later will be visible here.
    pub fn get(&mut self, key: &str) -> Option<Payload> {
        let id = self.resolve(key);
        self.get_unchecked(id)
    }

    /// Overwrite `key`'s slot, including a value left by a colliding key.
    pub fn set(&mut self, key: &str, value: Payload) {
        let id = self.resolve(key);
        self.set_unchecked(id, value);
    }

    pub fn is_set(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Hot-path read: no hashing, no cache probe, no bounds check.
    #[inline(always)]
    pub fn get_unchecked(&self, id: SlotId) -> Option<Payload> {
        // SAFETY: every `SlotId` is < TABLE_SIZE and `slots` is never resized.
        unsafe { *self.slots.get_unchecked(id.index()) }
    }

    /// Hot-path write: no hashing, no cache probe, no bounds check.
    #[inline(always)]
    pub fn set_unchecked(&mut self, id: SlotId, value: Payload) {
        // SAFETY: every `SlotId` is < TABLE_SIZE and `slots` is never resized.
        unsafe {
            *self.slots.get_unchecked_mut(id.index()) = Some(value);
        }
    }

    /// Bounds-checked read by raw index. Returns `None` if `index` is outside
    /// the table, `Some(None)` for an unset slot.
    pub fn get_by_index(&self, index: usize) -> Option<Option<Payload>> {
        self.slots.get(index).copied()
    }

    /// Approximate heap bytes held by the table.
    pub fn memory_usage(&self) -> usize {
        let entry = std::mem::size_of::<(Box<str>, SlotId)>() + 1;
        let mut total = self.slots.len() * std::mem::size_of::<Option<Payload>>()
            + self.ids.capacity() * entry
            + self.ids.keys().map(|k| k.len()).sum::<usize>();
        #[cfg(any(debug_assertions, feature = "collision-check"))]
        {
            let claim = std::mem::size_of::<(SlotId, Box<str>)>() + 1;
            total += self.claims.capacity() * claim
                + self.claims.values().map(|k| k.len()).sum::<usize>();
        }
        total
    }
}

impl Default for PercentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PercentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PercentTable")
            .field("capacity", &self.capacity())
            .field("resolved", &self.ids.len())
            .field("occupied", &self.occupied())
            .finish()
    }
}
