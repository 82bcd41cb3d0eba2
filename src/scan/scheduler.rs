//! Flush scheduling port for the scan buffer
//!
//! The buffer never touches a timer directly; it asks a [`FlushScheduler`]
//! to deliver one flush signal after a delay. Scheduling always supersedes
//! any earlier request, which is the only cancellation semantic the buffer
//! needs. The tokio implementation drives the real event loop; tests swap in
//! a recording double and never wait on the wall clock.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Single-shot delayed flush signal with supersede-cancels semantics
pub trait FlushScheduler {
    /// Schedule a flush after `delay`, cancelling any pending one
    fn schedule(&mut self, delay: Duration);

    /// Cancel the pending flush, if any
    fn cancel(&mut self);
}

/// Tokio-backed scheduler delivering flush signals onto an event channel
///
/// Each schedule spawns a sleep task and aborts the previous one. An abort
/// can race an already-sent signal, so every signal carries a generation
/// number; the event loop must discard signals whose generation is not
/// [`current_generation`](Self::current_generation).
pub struct TokioFlushScheduler {
    notify: UnboundedSender<u64>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TokioFlushScheduler {
    pub fn new(notify: UnboundedSender<u64>) -> Self {
        Self {
            notify,
            generation: 0,
            task: None,
        }
    }

    /// Generation of the most recently scheduled flush
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Whether a delivered signal is still the live one
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }
}

impl FlushScheduler for TokioFlushScheduler {
    fn schedule(&mut self, delay: Duration) {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let notify = self.notify.clone();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means shutdown; nothing to do
            let _ = notify.send(generation);
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioFlushScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Recording scheduler for deterministic buffer tests
#[cfg(test)]
#[derive(Default)]
pub struct RecordingScheduler {
    /// Delays passed to `schedule`, in call order
    pub scheduled: Vec<Duration>,
    /// Number of `cancel` calls that found a pending flush
    pub cancelled: usize,
    /// Whether a flush is currently pending
    pub pending: bool,
}

#[cfg(test)]
impl FlushScheduler for RecordingScheduler {
    fn schedule(&mut self, delay: Duration) {
        self.cancel();
        self.scheduled.push(delay);
        self.pending = true;
    }

    fn cancel(&mut self) {
        if self.pending {
            self.cancelled += 1;
            self.pending = false;
        }
    }
}
