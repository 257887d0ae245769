//! Two-fund growth comparison: month-by-month ledgers with deposits, compounding
//! returns and pro-rata fees, plus the ROI and fee-drag summaries that go with them.
//!
//! [`crate::core`] holds the pure computation; [`crate::api`] wraps it in an HTTP server and a CLI.

pub mod api;
pub mod core;
