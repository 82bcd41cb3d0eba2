//! Test modules for the inventory store
//!
//! Organized by functional area: slot lifecycle operations and the sold-out
//! ledger with its day-scoped queries.

mod sold_out_tests;
