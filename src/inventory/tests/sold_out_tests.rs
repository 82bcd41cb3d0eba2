//! Sold-out transitions and the day-scoped ledger

use crate::core::time::MockClock;
use crate::inventory::{GameCatalog, InventoryStore, SlotId};
use chrono::Duration;
use std::sync::Arc;

fn store_with_clock() -> (InventoryStore, Arc<MockClock>) {
    let clock = Arc::new(MockClock::new());
    let store = InventoryStore::new(clock.clone(), GameCatalog::builtin());
    (store, clock)
}

fn slot(n: u64) -> SlotId {
    SlotId::new(n).unwrap()
}

#[test]
fn test_sold_out_creates_ledger_record_with_catalog_data() {
    let (mut store, _clock) = store_with_clock();
    store.update_slot(slot(1), "10234567890123");

    let record = store.mark_as_sold_out(slot(1)).cloned().unwrap();

    assert!(store.slot(slot(1)).sold_out);
    // Status is untouched by the sold-out transition
    assert_eq!(store.slot(slot(1)).status, crate::inventory::SlotStatus::Scanned);
    assert_eq!(record.gamepack_number, "10234567890");
    assert_eq!(record.game_name, "Lucky 7s");
    assert_eq!(record.price, "$1");
    assert_eq!(record.slot_id, slot(1));
}

#[test]
fn test_sold_out_unknown_prefix_uses_fallback_entry() {
    let (mut store, _clock) = store_with_clock();
    store.update_slot(slot(2), "99999123456789");

    let record = store.mark_as_sold_out(slot(2)).cloned().unwrap();

    assert_eq!(record.game_name, "Unknown Game");
    assert_eq!(record.price, "N/A");
    assert_eq!(record.kind, "N/A");
}

#[test]
fn test_sold_out_on_untouched_slot_is_a_no_op() {
    let (mut store, _clock) = store_with_clock();

    assert!(store.mark_as_sold_out(slot(3)).is_none());
    assert!(!store.slot(slot(3)).sold_out);
    assert!(store.sold_out_packs().is_empty());
}

#[test]
fn test_sold_out_on_confirmed_empty_slot_is_a_no_op() {
    let (mut store, _clock) = store_with_clock();
    store.mark_as_empty(slot(3));

    assert!(store.mark_as_sold_out(slot(3)).is_none());
    assert!(!store.slot(slot(3)).sold_out);
    assert!(store.sold_out_packs().is_empty());
}

#[test]
fn test_ledger_records_are_unique_per_event() {
    let (mut store, clock) = store_with_clock();
    store.update_slot(slot(1), "10234567890123");
    store.mark_as_sold_out(slot(1));

    clock.advance(Duration::milliseconds(5));
    store.update_slot(slot(1), "10234567890123");
    store.mark_as_sold_out(slot(1));

    let ids: Vec<&str> = store.sold_out_packs().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_today_filter_excludes_prior_days() {
    let (mut store, clock) = store_with_clock();
    store.update_slot(slot(1), "10234567890123");
    store.mark_as_sold_out(slot(1));

    clock.advance(Duration::days(1));
    store.update_slot(slot(2), "20117888999000");
    store.mark_as_sold_out(slot(2));

    let today = store.sold_out_packs_today();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].gamepack_number, "20117888999");
    // Full ledger still holds both
    assert_eq!(store.sold_out_packs().len(), 2);
}

#[test]
fn test_today_records_sorted_newest_first() {
    let (mut store, clock) = store_with_clock();
    store.update_slot(slot(1), "10234567890123");
    store.mark_as_sold_out(slot(1));

    clock.advance(Duration::minutes(10));
    store.update_slot(slot(2), "20117888999000");
    store.mark_as_sold_out(slot(2));

    let today = store.sold_out_packs_today();
    assert_eq!(today[0].gamepack_number, "20117888999");
    assert_eq!(today[1].gamepack_number, "10234567890");
}

#[test]
fn test_duplicate_query_respects_sold_out_and_day() {
    let (mut store, clock) = store_with_clock();
    store.update_slot(slot(1), "10234567890123");

    // Active same-day duplicate on another slot is found
    assert_eq!(
        store.active_duplicate_slot("10234567890", slot(2)),
        Some(slot(1))
    );
    // The slot being written never blocks itself
    assert_eq!(store.active_duplicate_slot("10234567890", slot(1)), None);

    // Sold out no longer blocks
    store.mark_as_sold_out(slot(1));
    assert_eq!(store.active_duplicate_slot("10234567890", slot(2)), None);

    // A prior-day occurrence does not block either
    store.update_slot(slot(1), "10234567890123");
    clock.advance(Duration::days(1));
    assert_eq!(store.active_duplicate_slot("10234567890", slot(2)), None);
}
