//! Polynomial string hash and slot masking.
//!
//! The hash is deliberately weak: `h = h * 31 + unit` over the raw UTF-8 bytes
//! of the key with wrapping 32-bit signed arithmetic. It is cheap and
//! deterministic, and collisions are expected.

use crate::table::SlotId;

/// log2 of the number of slots.
pub const TABLE_BITS: u32 = 14;

/// Number of slots in every table (16384).
pub const TABLE_SIZE: usize = 1 << TABLE_BITS;

pub(crate) const SLOT_MASK: i32 = (TABLE_SIZE - 1) as i32;

/// Hash `key` to a signed 32-bit value.
///
/// Folds the raw UTF-8 bytes of `key`; no Unicode normalization is applied.
/// ASCII keys hash the same as a UTF-16 code-unit fold would. Non-ASCII keys
/// do not: `"é"` folds the two bytes `0xC3 0xA9`, not the single unit `0xE9`.
#[inline]
pub fn hash(key: &str) -> i32 {
    let mut h: i32 = 0;
    for &unit in key.as_bytes() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    h
}

/// Hash and mask `key` to its slot, bypassing any id cache.
#[inline]
pub fn slot_of(key: &str) -> SlotId {
    SlotId::from_masked(hash(key) & SLOT_MASK)
}
