//! Sold-out pack ledger records
//!
//! One immutable record per sold-out event. Records accumulate for the life
//! of the process and are only ever filtered and sorted, never mutated.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::slot::SlotId;

/// Historical record of a pack confirmed sold out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldOutPack {
    /// Unique per event: gamepack number plus the event instant
    pub id: String,
    pub gamepack_number: String,
    pub game_name: String,
    pub price: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sold_out_date: DateTime<Local>,
    pub slot_id: SlotId,
}

impl SoldOutPack {
    /// Derive the event id from the gamepack and instant
    pub fn event_id(gamepack: &str, at: DateTime<Local>) -> String {
        format!("{}-{}", gamepack, at.timestamp_millis())
    }
}
