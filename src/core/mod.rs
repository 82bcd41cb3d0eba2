//! Core utilities shared across the application
//!
//! Small domain-agnostic building blocks: the error handling contract and
//! the clock abstraction used for timestamps and day-scoped queries.

pub mod error_handling;
pub mod time;
