//! Fragment accumulation and debounced auto-submit
//!
//! One physical scan can arrive as several input events, and the terminator
//! keystroke can land slightly before trailing digits on a slow wedge link.
//! The buffer therefore never submits on the terminator itself: once the
//! accumulated text looks complete it schedules a flush after a quiet delay,
//! and any further fragment restarts the clock. Latency is traded for
//! completeness, which is why the delay stays operator-configurable.

use super::scheduler::FlushScheduler;
use super::{extract_identifier, FRAME_LEN, RAW_CEILING};
use std::time::Duration;

/// Default quiet delay before a complete-looking scan is flushed
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Lowest delay the host may configure
pub const MIN_DELAY_MS: u64 = 100;

/// Highest delay the host may configure
pub const MAX_DELAY_MS: u64 = 1000;

/// Accumulates raw scanner fragments and debounces submission
///
/// At most one flush is ever pending; every fragment cancels and, when the
/// completion predicate holds, reschedules it. The scheduler is a port so
/// the buffer runs identically under tokio and under test doubles.
pub struct ScanBuffer<S: FlushScheduler> {
    pending: String,
    delay: Duration,
    scheduler: S,
}

impl<S: FlushScheduler> ScanBuffer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            pending: String::new(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            scheduler,
        }
    }

    /// Append one raw input fragment.
    ///
    /// Any pending flush is cancelled first. If the accumulated text now
    /// satisfies the completion predicate, a fresh flush is scheduled after
    /// the configured quiet delay.
    pub fn on_fragment(&mut self, text: &str) {
        self.pending.push_str(text);
        self.scheduler.cancel();

        if self.looks_complete() {
            log::trace!(
                "scan looks complete ({} raw chars), scheduling flush in {:?}",
                self.pending.len(),
                self.delay
            );
            self.scheduler.schedule(self.delay);
        }
    }

    /// Flush the accumulated text through the extractor.
    ///
    /// Cancels any pending timer, clears the buffer, and returns the
    /// extracted identifier (possibly short or empty). Called by the host on
    /// timer fire or on an explicit manual submit, which bypasses the
    /// completion predicate entirely.
    pub fn flush(&mut self) -> String {
        self.scheduler.cancel();
        let raw = std::mem::take(&mut self.pending);
        let identifier = extract_identifier(&raw);
        log::debug!(
            "flushed scan: {} raw chars -> identifier {:?}",
            raw.len(),
            identifier
        );
        identifier
    }

    /// Discard the accumulated text without submitting it.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.pending.clear();
    }

    /// Completion predicate over the accumulated text: a terminator has
    /// arrived, a full fixed-length frame of digits is present, or the raw
    /// length hit the safety ceiling.
    fn looks_complete(&self) -> bool {
        if self.pending.contains('\n') || self.pending.contains('\r') {
            return true;
        }
        let digit_count = self
            .pending
            .chars()
            .filter(|c| c.is_ascii_digit())
            .count();
        digit_count >= FRAME_LEN || self.pending.len() >= RAW_CEILING
    }

    /// Quiet delay currently in effect
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Set the quiet delay. Range enforcement (100–1000 ms) is the host's
    /// responsibility; the buffer applies whatever it is given.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Raw text accumulated since the last flush
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Access the scheduler, e.g. to check signal generations
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
