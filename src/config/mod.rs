//! Configuration module for Ledgerbook
//!
//! - Data directory resolution
//! - User settings persistence
//! - Tracing subscriber setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
