//! Slot model
//!
//! A slot is one physical dispenser position. The collection is fixed at 20,
//! created at startup and only ever reset, never grown or shrunk. Occupancy
//! is a tagged [`PackState`] internally; the legacy all-zero sentinel
//! strings exist only at the serde boundary, where the original wire shape
//! (camelCase fields, optional sentinel barcode/gamepack) is preserved.

use crate::scan::GAMEPACK_LEN;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

use super::error::{InventoryError, InventoryResult};

/// Number of physical dispenser slots
pub const SLOT_COUNT: u8 = 20;

/// Gamepack sentinel marking a slot explicitly confirmed empty
pub const SENTINEL_GAMEPACK: &str = "00000000000";

/// Barcode sentinel matching [`SENTINEL_GAMEPACK`], padded to identifier length
pub const SENTINEL_BARCODE: &str = "00000000000000";

/// Derive the gamepack number from a captured identifier: its first 11
/// digits, or the whole string when shorter.
pub fn gamepack_of(identifier: &str) -> &str {
    &identifier[..identifier.len().min(GAMEPACK_LEN)]
}

/// Validated slot identity, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(u8);

impl SlotId {
    pub const FIRST: SlotId = SlotId(1);

    /// Construct a slot id, rejecting anything outside 1..=20
    pub fn new(id: u64) -> InventoryResult<Self> {
        if (1..=SLOT_COUNT as u64).contains(&id) {
            Ok(SlotId(id as u8))
        } else {
            Err(InventoryError::UnknownSlot {
                id,
                max: SLOT_COUNT,
            })
        }
    }

    /// Zero-based index into the slot collection
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen-facing slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum SlotStatus {
    Empty,
    Scanned,
    Pending,
}

/// What the slot is known to hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackState {
    /// Never written since startup or last clear
    Untouched,
    /// Operator explicitly confirmed the slot holds nothing
    ConfirmedEmpty,
    /// An active ticket pack; `gamepack` is always derived from `barcode`
    Occupied { barcode: String, gamepack: String },
}

impl PackState {
    /// Build an occupied state from a captured barcode
    pub fn occupied(barcode: impl Into<String>) -> Self {
        let barcode = barcode.into();
        let gamepack = gamepack_of(&barcode).to_string();
        PackState::Occupied { barcode, gamepack }
    }

    /// The real gamepack number, if one is present
    pub fn gamepack(&self) -> Option<&str> {
        match self {
            PackState::Occupied { gamepack, .. } => Some(gamepack),
            _ => None,
        }
    }

    pub fn is_untouched(&self) -> bool {
        matches!(self, PackState::Untouched)
    }
}

/// One dispenser slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SlotRecord", try_from = "SlotRecord")]
pub struct Slot {
    pub id: SlotId,
    pub status: SlotStatus,
    pub pack: PackState,
    pub sold_out: bool,
    pub updated_at: Option<DateTime<Local>>,
}

impl Slot {
    /// A freshly initialized, never-touched slot
    pub fn empty(id: SlotId) -> Self {
        Self {
            id,
            status: SlotStatus::Empty,
            pack: PackState::Untouched,
            sold_out: false,
            updated_at: None,
        }
    }

    /// The slot's current gamepack, when it holds a real pack
    pub fn gamepack(&self) -> Option<&str> {
        self.pack.gamepack()
    }
}

/// Legacy wire shape: optional barcode/gamepack strings with the all-zero
/// sentinels standing in for "explicitly empty"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotRecord {
    id: SlotId,
    status: SlotStatus,
    barcode: Option<String>,
    gamepack_number: Option<String>,
    sold_out: bool,
    timestamp: Option<DateTime<Local>>,
}

impl From<Slot> for SlotRecord {
    fn from(slot: Slot) -> Self {
        let (barcode, gamepack_number) = match slot.pack {
            PackState::Untouched => (None, None),
            PackState::ConfirmedEmpty => (
                Some(SENTINEL_BARCODE.to_string()),
                Some(SENTINEL_GAMEPACK.to_string()),
            ),
            PackState::Occupied { barcode, gamepack } => (Some(barcode), Some(gamepack)),
        };
        SlotRecord {
            id: slot.id,
            status: slot.status,
            barcode,
            gamepack_number,
            sold_out: slot.sold_out,
            timestamp: slot.updated_at,
        }
    }
}

impl TryFrom<SlotRecord> for Slot {
    type Error = String;

    fn try_from(record: SlotRecord) -> Result<Self, Self::Error> {
        let pack = match record.barcode {
            None => PackState::Untouched,
            Some(barcode) if barcode == SENTINEL_BARCODE => PackState::ConfirmedEmpty,
            Some(barcode) => {
                if !barcode.chars().all(|c| c.is_ascii_digit()) {
                    return Err(format!("barcode {:?} is not all digits", barcode));
                }
                let derived = gamepack_of(&barcode).to_string();
                if let Some(stored) = &record.gamepack_number {
                    if stored != &derived {
                        return Err(format!(
                            "gamepack {} does not match barcode {}",
                            stored, barcode
                        ));
                    }
                }
                PackState::Occupied {
                    gamepack: derived,
                    barcode,
                }
            }
        };
        Ok(Slot {
            id: record.id,
            status: record.status,
            pack,
            sold_out: record.sold_out,
            updated_at: record.timestamp,
        })
    }
}
