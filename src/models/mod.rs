//! Core data models for Ledgerbook
//!
//! Entries, books, money and the in-memory [`Ledger`] that ties them
//! together and answers filtered views and totals.

pub mod book;
pub mod clock;
pub mod entry;
pub mod filter;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod scope;

pub use book::Book;
pub use clock::{Clock, FixedClock, SystemClock};
pub use entry::{Entry, EntryKind};
pub use filter::{FilterSelection, KindFilter, MonthFilter};
pub use ids::{EntryId, IdGenerator};
pub use ledger::{Ledger, RenameOutcome, Totals};
pub use money::Money;
pub use scope::Scope;
