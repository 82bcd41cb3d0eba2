//! Clock abstraction for testable time-dependent logic
//!
//! Slot timestamps, the "today" scoping of the uniqueness check and the
//! sold-out ledger all go through this trait, so tests can pin the calendar
//! day instead of racing midnight.

use chrono::{DateTime, Local};
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

/// Abstraction over wall-clock time for timestamps and day-scoped queries
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> DateTime<Local>;
}

/// Production clock using the actual system time
#[derive(Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Shared clock handle as held by components that need one
pub type SharedClock = Arc<dyn Clock>;

/// Mock clock for deterministic testing
#[cfg(test)]
pub struct MockClock {
    current: Mutex<DateTime<Local>>,
}

#[cfg(test)]
impl MockClock {
    /// Create a mock clock pinned to the real current time
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    /// Create a mock clock starting at the given instant
    pub fn starting_at(start: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: chrono::Duration) {
        let mut current = self.current.lock().unwrap();
        *current += duration;
    }

    /// Set the clock to an absolute instant
    pub fn set(&self, instant: DateTime<Local>) {
        let mut current = self.current.lock().unwrap();
        *current = instant;
    }
}

#[cfg(test)]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap()
    }
}
