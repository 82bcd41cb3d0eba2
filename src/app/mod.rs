//! Application host layer
//!
//! Wires the scan pipeline, validator and inventory store into an
//! interactive session: CLI parsing, config loading, logging setup, and the
//! single serialized event loop that owns all state.

pub mod cli;
pub mod event_controller;
pub mod startup;
