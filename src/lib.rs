//! Ledgerbook - multi-book income and expense ledger
//!
//! Entries are grouped into named books, filtered by month, year and kind,
//! and summed into income, expense and balance totals.
//!
//! # Architecture
//!
//! - `models`: entries, books, filters and the in-memory [`models::Ledger`]
//! - `storage`: the [`storage::PersistenceProvider`] seam plus JSON-file and
//!   in-memory providers
//! - `services`: [`services::LedgerService`], which validates, persists and
//!   commits every mutation
//! - `audit`: JSON-lines audit trail
//! - `export`: CSV of a filtered view, JSON/YAML of a whole scope
//! - `config`: paths, settings and tracing setup
//! - `display`, `cli`: terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ledgerbook::config::Settings;
//! use ledgerbook::models::{EntryKind, FilterSelection, FixedClock, Money};
//! use ledgerbook::services::LedgerService;
//! use ledgerbook::storage::MemoryProvider;
//!
//! let clock = Arc::new(FixedClock::ymd(2025, 1, 10).unwrap());
//! let mut service = LedgerService::open(MemoryProvider::new(), &Settings::default(), clock)?;
//!
//! service.create_book("Home")?;
//! service.add_entry("Home", "Salary", Money::from_cents(100_000), EntryKind::Income)?;
//! service.add_entry("Home", "Rent", Money::from_cents(40_000), EntryKind::Expense)?;
//!
//! let totals = service.totals(&FilterSelection::new("Home", 2025));
//! assert_eq!(totals.balance(), Money::from_cents(60_000));
//! # Ok::<(), ledgerbook::error::LedgerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
