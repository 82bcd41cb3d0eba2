//! Scan capture pipeline
//!
//! Keyboard-wedge scanners deliver a scan as a burst of keystrokes with no
//! framing guarantees: fragments may arrive split across input events, the
//! terminator may land before trailing digits, and the payload carries
//! prefix/suffix noise around the 14 digits that matter. This module turns
//! that stream into a single validated identifier in two stages:
//!
//! - [`buffer::ScanBuffer`] accumulates fragments and decides, through a
//!   debounced timer, when one physical scan is complete.
//! - [`extract`] locates the canonical 14-digit ticket identifier inside the
//!   accumulated raw text.
//!
//! Scheduling is abstracted behind [`scheduler::FlushScheduler`] so the
//! buffer logic runs identically under tokio and under test doubles.

pub mod buffer;
pub mod extract;
pub mod scheduler;

pub use buffer::ScanBuffer;
pub use extract::{analyze, extract_identifier, ScanAnalysis};
pub use scheduler::{FlushScheduler, TokioFlushScheduler};

/// Length of a canonical ticket identifier
pub const IDENTIFIER_LEN: usize = 14;

/// Length of the gamepack number (leading digits of the identifier)
pub const GAMEPACK_LEN: usize = 11;

/// Fixed scanner frame length; payloads at least this long carry the
/// identifier in the first 14 digits of the trailing 24
pub const FRAME_LEN: usize = 24;

/// Raw buffer length at which a scan is considered complete regardless of
/// terminator, bounding buffer growth on misbehaving scanners
pub const RAW_CEILING: usize = 30;
