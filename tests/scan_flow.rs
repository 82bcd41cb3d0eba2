//! End-to-end scan flow: fragments through the debounced buffer, extraction,
//! validation and store application, under paused tokio time.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use packtrack::core::time::SystemClock;
use packtrack::inventory::{next_slot, GameCatalog, InventoryStore, SlotId, SlotStatus};
use packtrack::scan::{ScanBuffer, TokioFlushScheduler};
use packtrack::validate::{validate, ScanDecision};

async fn settle() {
    // Let spawned timer tasks observe the advanced clock
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_fragmented_scan_flushes_once_after_quiet_delay() {
    let (flush_tx, mut flush_rx) = mpsc::unbounded_channel();
    let mut buffer = ScanBuffer::new(TokioFlushScheduler::new(flush_tx));
    buffer.set_delay(Duration::from_millis(500));

    buffer.on_fragment("1234");
    tokio::time::advance(Duration::from_millis(50)).await;
    settle().await;
    // Incomplete: nothing scheduled, nothing fired
    assert!(flush_rx.try_recv().is_err());

    buffer.on_fragment("5678901234\n");
    tokio::time::advance(Duration::from_millis(450)).await;
    settle().await;
    // Quiet delay not yet elapsed since the terminator fragment
    assert!(flush_rx.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(60)).await;
    let generation = flush_rx.recv().await.unwrap();
    assert!(buffer.scheduler().is_current(generation));

    assert_eq!(buffer.flush(), "12345678901234");

    // Exactly one flush signal for the whole scan
    settle().await;
    assert!(flush_rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_trailing_fragment_restarts_quiet_delay() {
    let (flush_tx, mut flush_rx) = mpsc::unbounded_channel();
    let mut buffer = ScanBuffer::new(TokioFlushScheduler::new(flush_tx));
    buffer.set_delay(Duration::from_millis(500));

    buffer.on_fragment("123456789012\n");
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;

    // Straggler digits from a slow link supersede the pending flush
    buffer.on_fragment("34");
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    // Old deadline passed but was superseded; any signal that slipped out
    // before the abort must read stale
    if let Ok(generation) = flush_rx.try_recv() {
        assert!(!buffer.scheduler().is_current(generation));
    }

    tokio::time::advance(Duration::from_millis(250)).await;
    let generation = loop {
        let g = flush_rx.recv().await.unwrap();
        if buffer.scheduler().is_current(g) {
            break g;
        }
    };
    assert!(buffer.scheduler().is_current(generation));
    assert_eq!(buffer.flush(), "12345678901234");
}

#[tokio::test(start_paused = true)]
async fn test_scan_to_store_round_trip() {
    let (flush_tx, mut flush_rx) = mpsc::unbounded_channel();
    let mut buffer = ScanBuffer::new(TokioFlushScheduler::new(flush_tx));
    let mut store = InventoryStore::new(Arc::new(SystemClock), GameCatalog::builtin());
    let mut target = SlotId::FIRST;

    // Full 24-digit frame, no terminator needed
    buffer.on_fragment("102345678901234567890123");
    tokio::time::advance(Duration::from_millis(501)).await;
    let generation = flush_rx.recv().await.unwrap();
    assert!(buffer.scheduler().is_current(generation));

    let identifier = buffer.flush();
    assert_eq!(identifier, "10234567890123");

    match validate(&identifier, target, &store) {
        ScanDecision::Accept => {
            store.update_slot(target, &identifier);
            target = next_slot(store.slots());
        }
        other => panic!("expected Accept, got {:?}", other),
    }

    assert_eq!(store.slot(SlotId::FIRST).status, SlotStatus::Scanned);
    assert_eq!(store.slot(SlotId::FIRST).gamepack(), Some("10234567890"));
    assert_eq!(target, SlotId::new(2).unwrap());

    // The same pack is now refused on the new target
    assert!(matches!(
        validate(&identifier, target, &store),
        ScanDecision::Reject { .. }
    ));

    // Until it sells out
    store.mark_as_sold_out(SlotId::FIRST);
    assert_eq!(validate(&identifier, target, &store), ScanDecision::Accept);
    let today = store.sold_out_packs_today();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].game_name, "Lucky 7s");
}
