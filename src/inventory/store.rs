//! InventoryStore - exclusive owner of slot and ledger state
//!
//! All mutations of slot state go through the store's operations; everything
//! else sees read-only snapshots. Operations are synchronous in-memory
//! writes applied whole, so under the application's single serialized event
//! loop the state is immediately consistent. A concurrent host would need to
//! wrap the store in a single writer lock, since an accept decision and its
//! slot update must be atomic relative to the uniqueness query.

use crate::core::time::SharedClock;
use crate::validate::SlotQuery;

use super::catalog::GameCatalog;
use super::ledger::SoldOutPack;
use super::slot::{PackState, Slot, SlotId, SlotStatus, SLOT_COUNT};

pub struct InventoryStore {
    slots: Vec<Slot>,
    ledger: Vec<SoldOutPack>,
    catalog: GameCatalog,
    clock: SharedClock,
}

impl InventoryStore {
    /// Build the fixed 20-slot collection, all untouched. Construction is
    /// the only initialization path, so live state can never be
    /// re-initialized by accident.
    pub fn new(clock: SharedClock, catalog: GameCatalog) -> Self {
        let slots = (1..=SLOT_COUNT as u64)
            .map(|id| Slot::empty(SlotId::new(id).expect("fixed range")))
            .collect();
        Self {
            slots,
            ledger: Vec::new(),
            catalog,
            clock,
        }
    }

    /// Read-only snapshot of all slots, in id order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.index()]
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    /// Apply an accepted scan: the slot now holds the captured pack.
    pub fn update_slot(&mut self, id: SlotId, barcode: &str) {
        let now = self.clock.now();
        let slot = &mut self.slots[id.index()];
        slot.status = SlotStatus::Scanned;
        slot.pack = PackState::occupied(barcode);
        slot.sold_out = false;
        slot.updated_at = Some(now);
        log::info!(
            "slot {}: scanned pack {}",
            id,
            slot.gamepack().unwrap_or_default()
        );
    }

    /// Reset a slot to its never-touched state.
    pub fn clear_slot(&mut self, id: SlotId) {
        self.slots[id.index()] = Slot::empty(id);
        log::info!("slot {}: cleared", id);
    }

    /// Record that the operator confirmed this slot holds nothing. Distinct
    /// from a cleared slot: the slot was looked at, and renders with the
    /// sentinel barcode at the wire.
    pub fn mark_as_empty(&mut self, id: SlotId) {
        let now = self.clock.now();
        let slot = &mut self.slots[id.index()];
        slot.status = SlotStatus::Empty;
        slot.pack = PackState::ConfirmedEmpty;
        slot.updated_at = Some(now);
        log::info!("slot {}: confirmed empty", id);
    }

    /// Mark the slot's current pack sold out and append a ledger record.
    ///
    /// A slot without a real pack (untouched or confirmed empty) is a
    /// documented no-op, not an error: nothing flips and no record is
    /// created. Returns the created record, if any.
    pub fn mark_as_sold_out(&mut self, id: SlotId) -> Option<&SoldOutPack> {
        let gamepack = match self.slots[id.index()].gamepack() {
            Some(gamepack) => gamepack.to_string(),
            None => {
                log::debug!("slot {}: sold-out ignored, no pack present", id);
                return None;
            }
        };

        let now = self.clock.now();
        let info = self.catalog.for_gamepack(&gamepack).clone();
        self.slots[id.index()].sold_out = true;
        self.ledger.push(SoldOutPack {
            id: SoldOutPack::event_id(&gamepack, now),
            gamepack_number: gamepack.clone(),
            game_name: info.name,
            price: info.price,
            kind: info.kind,
            sold_out_date: now,
            slot_id: id,
        });
        log::info!("slot {}: pack {} sold out", id, gamepack);
        self.ledger.last()
    }

    /// The gamepack previously captured for this slot, when it holds one
    pub fn previous_gamepack(&self, id: SlotId) -> Option<&str> {
        self.slot(id).gamepack()
    }

    /// Find another slot that already holds this gamepack actively today:
    /// written today, not sold out, and not the slot being written. Sold-out
    /// and prior-day occurrences never block reuse.
    pub fn active_duplicate_slot(&self, gamepack: &str, except: SlotId) -> Option<SlotId> {
        let today = self.clock.now().date_naive();
        self.slots
            .iter()
            .find(|slot| {
                slot.id != except
                    && !slot.sold_out
                    && slot.gamepack() == Some(gamepack)
                    && slot.updated_at.map(|t| t.date_naive()) == Some(today)
            })
            .map(|slot| slot.id)
    }

    /// Today's sold-out records, newest first
    pub fn sold_out_packs_today(&self) -> Vec<SoldOutPack> {
        let today = self.clock.now().date_naive();
        let mut packs: Vec<SoldOutPack> = self
            .ledger
            .iter()
            .filter(|pack| pack.sold_out_date.date_naive() == today)
            .cloned()
            .collect();
        packs.sort_by(|a, b| b.sold_out_date.cmp(&a.sold_out_date));
        packs
    }

    /// Full ledger, in event order
    pub fn sold_out_packs(&self) -> &[SoldOutPack] {
        &self.ledger
    }
}

impl SlotQuery for InventoryStore {
    fn previous_gamepack(&self, id: SlotId) -> Option<String> {
        InventoryStore::previous_gamepack(self, id).map(str::to_string)
    }

    fn active_duplicate_slot(&self, gamepack: &str, except: SlotId) -> Option<SlotId> {
        InventoryStore::active_duplicate_slot(self, gamepack, except)
    }
}
