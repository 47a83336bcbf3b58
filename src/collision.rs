//! Development-time collision detection.
//!
//! Only compiled with `debug_assertions` or the `collision-check` feature; a
//! plain release build carries neither the reverse map nor the validator.

use std::fmt;

use log::warn;

use crate::hash::slot_of;
use crate::table::{PercentTable, SlotId};

/// Two distinct keys hash to the same slot.
#[derive(Clone, PartialEq, Eq)]
pub struct CollisionError {
    existing: Box<str>,
    incoming: Box<str>,
    slot: SlotId,
}

impl CollisionError {
    /// Key that claimed the slot first.
    pub fn existing(&self) -> &str {
        &self.existing
    }

    /// Key that was being validated.
    pub fn incoming(&self) -> &str {
        &self.incoming
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hash collision: {:?} and {:?} both map to slot {}",
            self.existing, self.incoming, self.slot
        )
    }
}

impl fmt::Debug for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("CollisionError")
                .field("existing", &self.existing)
                .field("incoming", &self.incoming)
                .field("slot", &self.slot)
                .finish();
        }
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for CollisionError {}

impl PercentTable {
    /// Check that no other validated key shares `key`'s slot.
    ///
    /// Hashes `key` directly rather than consulting the id cache. On success the
    /// slot is recorded as claimed by `key`; validating the same key again is a
    /// no-op. A collision is meant to abort the run: widen the table or rename
    /// the key.
    pub fn validate_key(&mut self, key: &str) -> Result<SlotId, CollisionError> {
        let slot = slot_of(key);
        match self.claims.get(&slot) {
            Some(existing) if **existing != *key => {
                let err = CollisionError {
                    existing: existing.clone(),
                    incoming: key.into(),
                    slot,
                };
                warn!("{err}");
                Err(err)
            }
            Some(_) => Ok(slot),
            None => {
                self.claims.insert(slot, key.into());
                Ok(slot)
            }
        }
    }

    /// Key currently claiming `slot`, if any was validated.
    pub fn claimed_key(&self, slot: SlotId) -> Option<&str> {
        self.claims.get(&slot).map(|k| &**k)
    }
}
