//! # percent-table
//!
//! A fixed-size, string-keyed lookup table for per-frame hot paths.
//!
//! Keys are hashed once with a cheap 31-polynomial hash, masked to one of
//! 16384 slots, and the resulting [`SlotId`] is memoized per key. Callers that
//! repeat a lookup many times resolve the id once with [`PercentTable::id`] and
//! then read and write through [`PercentTable::get_unchecked`] and
//! [`PercentTable::set_unchecked`], which do no hashing, no map probing and no
//! bounds checks.
//!
//! There is no collision resolution. Distinct keys may share a slot, in which
//! case the last write wins. Debug builds (or the `collision-check` feature)
//! provide [`PercentTable::validate_key`] to catch this during development.
//! The validator's tests run in every debug test build; the release opt-in is
//! covered by `cargo test --release --features collision-check`.
//!
//! ## Example
//!
//! ```rust
//! use percent_table::PercentTable;
//!
//! let mut table = PercentTable::new();
//! table.set("move_speed", [1.0, 0.5]);
//! assert_eq!(table.get("move_speed"), Some([1.0, 0.5]));
//! assert_eq!(table.get("never_set"), None);
//!
//! // Resolve once, then use the id on the hot path.
//! let id = table.id("move_speed");
//! for _ in 0..1000 {
//!     let [base, percent] = table.get_unchecked(id).unwrap_or([0.0, 0.0]);
//!     assert_eq!(base * percent, 0.5);
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod hash;
pub mod table;

#[cfg(any(debug_assertions, feature = "collision-check"))]
mod collision;

#[cfg(any(debug_assertions, feature = "collision-check"))]
pub use collision::CollisionError;
pub use hash::{hash, slot_of, TABLE_BITS, TABLE_SIZE};
pub use table::{Payload, PercentTable, SlotId};


#[cfg(test)]
mod proptests;
