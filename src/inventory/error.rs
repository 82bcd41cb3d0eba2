//! Inventory error types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Slot number must be between 1 and {max}, got {id}")]
    UnknownSlot { id: u64, max: u8 },
}

impl ContextualError for InventoryError {
    fn is_user_actionable(&self) -> bool {
        match self {
            InventoryError::UnknownSlot { .. } => true,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            InventoryError::UnknownSlot { .. } => {
                Some("Slot number must be between 1 and 20")
            }
        }
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;
