//! Cross-slot uniqueness for today

use super::{slot, FakeSlots};
use crate::core::time::MockClock;
use crate::inventory::{GameCatalog, InventoryStore, SlotId};
use crate::validate::{validate, ScanDecision};
use std::sync::Arc;

#[test]
fn test_active_duplicate_on_other_slot_rejected() {
    let store = FakeSlots::default().with_active("10234567890", 2);

    assert_eq!(
        validate("10234567890123", slot(7), &store),
        ScanDecision::Reject {
            reason: "Gamepack 10234567890 is already active in Slot 2".to_string()
        }
    );
}

#[test]
fn test_duplicate_on_target_slot_itself_does_not_reject() {
    let store = FakeSlots::default().with_active("10234567890", 7);

    assert_eq!(
        validate("10234567890123", slot(7), &store),
        ScanDecision::Accept
    );
}

#[test]
fn test_sold_out_pack_becomes_reusable() {
    // Against the real store: slot 2 holds the pack today, slot 7 scans it
    let clock = Arc::new(MockClock::new());
    let mut store = InventoryStore::new(clock, GameCatalog::builtin());
    let a = SlotId::new(2).unwrap();
    let b = SlotId::new(7).unwrap();

    store.update_slot(a, "10234567890123");
    assert!(matches!(
        validate("10234567890123", b, &store),
        ScanDecision::Reject { .. }
    ));

    store.mark_as_sold_out(a);
    assert_eq!(validate("10234567890123", b, &store), ScanDecision::Accept);
}

#[test]
fn test_prior_day_occurrence_does_not_block() {
    let clock = Arc::new(MockClock::new());
    let mut store = InventoryStore::new(clock.clone(), GameCatalog::builtin());
    let a = SlotId::new(2).unwrap();
    let b = SlotId::new(7).unwrap();

    store.update_slot(a, "10234567890123");
    clock.advance(chrono::Duration::days(1));

    assert_eq!(validate("10234567890123", b, &store), ScanDecision::Accept);
}
