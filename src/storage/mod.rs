//! Storage layer for Ledgerbook
//!
//! Defines the [`PersistenceProvider`] seam the ledger service writes
//! through, plus two providers: a local JSON file per scope and an
//! in-memory store.

pub mod file_io;
pub mod json_file;
pub mod memory;
pub mod provider;

pub use file_io::{read_json, write_json_atomic};
pub use json_file::JsonFileProvider;
pub use memory::MemoryProvider;
pub use provider::{PersistenceProvider, StoredLedger, LEDGER_SCHEMA_VERSION};
