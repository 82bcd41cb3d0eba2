//! Scan validation
//!
//! `validate` is a pure decision function: given an extracted identifier, a
//! target slot and read-only access to slot state, it decides whether the
//! scan is applied, refused, or needs the operator to confirm the fate of
//! the pack previously in the slot. It never mutates anything and never
//! fails past its boundary; every refusal carries a typed reason string.
//! Applying the consequences (sold-out transition, slot update) is the
//! host's job.

#[cfg(test)]
mod tests;

use crate::inventory::slot::{gamepack_of, SlotId, SENTINEL_GAMEPACK};
use crate::scan::IDENTIFIER_LEN;

/// Reason shown when nothing was entered
pub const MSG_EMPTY: &str = "Please enter a barcode";

/// Reason shown when the capture is shorter than an identifier
pub const MSG_TOO_SHORT: &str = "Barcode must be at least 14 digits";

/// Reason shown when non-digit characters survive into the identifier
pub const MSG_NOT_NUMERIC: &str = "Barcode must contain only numbers";

/// Read-only slot state the validator needs
///
/// Implemented by the inventory store; tests substitute fixed fakes.
pub trait SlotQuery {
    /// The gamepack currently held by this slot, when it holds a real one
    fn previous_gamepack(&self, id: SlotId) -> Option<String>;

    /// Another slot already holding this gamepack actively today
    fn active_duplicate_slot(&self, gamepack: &str, except: SlotId) -> Option<SlotId>;
}

/// Outcome of validating one scan against one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDecision {
    /// Apply the scan to the slot
    Accept,
    /// Refuse the scan; the reason is operator-facing
    Reject { reason: String },
    /// The slot already holds a different pack. The host must ask whether
    /// that pack sold out, and only on "yes" mark it sold out and apply the
    /// scan; on "no" the scan is discarded.
    RequiresConfirmation {
        previous_gamepack: String,
        message: String,
    },
}

/// Validate an extracted identifier against a target slot.
///
/// Checks short-circuit in order: format preconditions, the explicit-empty
/// sentinel bypass, the previous-pack confirmation gate, then cross-slot
/// uniqueness for today.
pub fn validate(identifier: &str, slot_id: SlotId, store: &dyn SlotQuery) -> ScanDecision {
    let identifier = identifier.trim();

    if identifier.is_empty() {
        return ScanDecision::Reject {
            reason: MSG_EMPTY.to_string(),
        };
    }
    if identifier.len() < IDENTIFIER_LEN {
        return ScanDecision::Reject {
            reason: MSG_TOO_SHORT.to_string(),
        };
    }
    if !identifier.chars().all(|c| c.is_ascii_digit()) {
        return ScanDecision::Reject {
            reason: MSG_NOT_NUMERIC.to_string(),
        };
    }

    let gamepack = gamepack_of(identifier);

    // Scanning the all-zero card is the operator's "this slot is empty"
    // gesture; it bypasses every business rule
    if gamepack == SENTINEL_GAMEPACK {
        return ScanDecision::Accept;
    }

    if let Some(previous) = store.previous_gamepack(slot_id) {
        if previous != gamepack {
            return ScanDecision::RequiresConfirmation {
                message: format!(
                    "Was the previous pack ({}) in Slot {} completely sold out?",
                    previous, slot_id
                ),
                previous_gamepack: previous,
            };
        }
    }

    if let Some(other) = store.active_duplicate_slot(gamepack, slot_id) {
        return ScanDecision::Reject {
            reason: format!(
                "Gamepack {} is already active in Slot {}",
                gamepack, other
            ),
        };
    }

    ScanDecision::Accept
}
