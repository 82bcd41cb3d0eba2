//! Next-slot selection
//!
//! After each accepted scan the operator's target moves to the slot that
//! still needs attention. Priority is strict so a walk through a fresh rack
//! always makes forward progress before cycling back: pending work first,
//! then never-touched slots, then anything not yet scanned (which revisits
//! explicitly-empty slots), and finally slot 1 once everything is Scanned.

use super::slot::{Slot, SlotId, SlotStatus};

/// Pick the next slot needing attention.
pub fn next_slot(slots: &[Slot]) -> SlotId {
    if let Some(slot) = slots.iter().find(|s| s.status == SlotStatus::Pending) {
        return slot.id;
    }
    if let Some(slot) = slots
        .iter()
        .find(|s| s.status == SlotStatus::Empty && s.pack.is_untouched())
    {
        return slot.id;
    }
    if let Some(slot) = slots.iter().find(|s| s.status != SlotStatus::Scanned) {
        return slot.id;
    }
    SlotId::FIRST
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::slot::{PackState, SLOT_COUNT};

    fn fresh_rack() -> Vec<Slot> {
        (1..=SLOT_COUNT as u64)
            .map(|id| Slot::empty(SlotId::new(id).unwrap()))
            .collect()
    }

    fn scan(slots: &mut [Slot], id: u64) {
        let slot = &mut slots[id as usize - 1];
        slot.status = SlotStatus::Scanned;
        slot.pack = PackState::occupied(format!("{:014}", id));
    }

    #[test]
    fn test_fresh_rack_starts_at_slot_one() {
        let slots = fresh_rack();
        assert_eq!(next_slot(&slots), SlotId::FIRST);
    }

    #[test]
    fn test_untouched_slots_come_in_order() {
        let mut slots = fresh_rack();
        scan(&mut slots, 1);
        scan(&mut slots, 2);
        assert_eq!(next_slot(&slots), SlotId::new(3).unwrap());
    }

    #[test]
    fn test_pending_slot_wins_over_untouched() {
        let mut slots = fresh_rack();
        slots[6].status = SlotStatus::Pending;
        assert_eq!(next_slot(&slots), SlotId::new(7).unwrap());
    }

    #[test]
    fn test_explicitly_empty_revisited_after_untouched() {
        let mut slots = fresh_rack();
        for id in 1..=SLOT_COUNT as u64 {
            scan(&mut slots, id);
        }
        // Slot 5 was confirmed empty: not Scanned, but also not untouched
        slots[4].status = SlotStatus::Empty;
        slots[4].pack = PackState::ConfirmedEmpty;
        // Slot 9 untouched again after a clear
        slots[8].status = SlotStatus::Empty;
        slots[8].pack = PackState::Untouched;

        assert_eq!(next_slot(&slots), SlotId::new(9).unwrap());

        scan(&mut slots, 9);
        assert_eq!(next_slot(&slots), SlotId::new(5).unwrap());
    }

    #[test]
    fn test_fully_scanned_rack_falls_back_to_slot_one() {
        let mut slots = fresh_rack();
        for id in 1..=SLOT_COUNT as u64 {
            scan(&mut slots, id);
        }
        assert_eq!(next_slot(&slots), SlotId::FIRST);
    }
}
