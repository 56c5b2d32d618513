//! Service layer for Ledgerbook
//!
//! Sits between the CLI and storage: validates through the ledger model,
//! persists through a provider and records the audit trail.

pub mod ledger;

pub use ledger::LedgerService;
