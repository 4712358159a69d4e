//! Normalization and display metadata for heterogeneous policy payloads.
//!
//! The backend names the same concept differently between endpoints
//! (`policyNumber` vs `policyNo`, `personName` vs `customerName`), so this
//! crate reconciles records into a consistent shape for tables and
//! aggregation. It never fails: missing fields degrade to empty strings or
//! zero.

pub mod columns;
pub mod record;
pub mod stats;

pub use columns::{derive_columns, format_header};
pub use record::{normalize, parse_amount, PolicyRecord};
pub use stats::{tally_statuses, total_amount, StatusTally};
