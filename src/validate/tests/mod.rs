//! Test modules for scan validation
//!
//! Split by decision branch: format preconditions, the previous-pack
//! confirmation gate, and cross-slot uniqueness.

mod uniqueness;

use super::SlotQuery;
use crate::inventory::SlotId;
use std::collections::HashMap;

/// Fixed-state fake implementing the validator's read seam
#[derive(Default)]
pub(super) struct FakeSlots {
    pub previous: HashMap<SlotId, String>,
    pub active: HashMap<String, SlotId>,
}

impl FakeSlots {
    pub fn with_previous(mut self, slot: u64, gamepack: &str) -> Self {
        self.previous
            .insert(SlotId::new(slot).unwrap(), gamepack.to_string());
        self
    }

    pub fn with_active(mut self, gamepack: &str, slot: u64) -> Self {
        self.active
            .insert(gamepack.to_string(), SlotId::new(slot).unwrap());
        self
    }
}

impl SlotQuery for FakeSlots {
    fn previous_gamepack(&self, id: SlotId) -> Option<String> {
        self.previous.get(&id).cloned()
    }

    fn active_duplicate_slot(&self, gamepack: &str, except: SlotId) -> Option<SlotId> {
        self.active
            .get(gamepack)
            .copied()
            .filter(|slot| *slot != except)
    }
}

pub(super) fn slot(n: u64) -> SlotId {
    SlotId::new(n).unwrap()
}
