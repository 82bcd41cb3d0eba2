//! Slot inventory and sold-out ledger
//!
//! The store is the single owner of the 20-slot collection and the sold-out
//! pack ledger. Everything else either reads through its query methods or
//! mutates through its operations; nothing mutates slot state from outside.
//! The store is an explicit, injectable value rather than an ambient
//! singleton, so tests construct one per case with a pinned clock.

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod navigator;
pub mod slot;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{GameCatalog, GameInfo};
pub use error::{InventoryError, InventoryResult};
pub use ledger::SoldOutPack;
pub use navigator::next_slot;
pub use slot::{PackState, Slot, SlotId, SlotStatus, SLOT_COUNT};
pub use store::InventoryStore;
