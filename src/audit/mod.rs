//! Audit logging for Ledgerbook
//!
//! Every successful book or entry mutation is appended to `audit.log` as a
//! JSON line carrying the before/after state and a short change summary.

mod diff;
mod entry;
mod logger;

pub use diff::entry_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
