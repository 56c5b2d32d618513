//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger service.

pub mod book;
pub mod entry;
pub mod export;
pub mod summary;

use clap::Args;

use crate::models::{EntryKind, FilterSelection, KindFilter, MonthFilter};
use crate::services::LedgerService;
use crate::storage::PersistenceProvider;

pub use book::{handle_book_command, BookCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use summary::{handle_summary_command, handle_years_command};

/// Month/year/kind options shared by listing, totals and CSV export
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Book to show (defaults to the active book)
    #[arg(short, long)]
    pub book: Option<String>,

    /// Month: all, 0-11, or a name such as "jan"
    #[arg(short, long, value_parser = parse_month)]
    pub month: Option<MonthFilter>,

    /// Year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Kind: all, income or expense
    #[arg(short, long, value_parser = parse_kind_filter)]
    pub kind: Option<KindFilter>,
}

impl ViewArgs {
    /// Resolve the options against the service's active book and clock
    pub fn selection<P: PersistenceProvider>(&self, service: &LedgerService<P>) -> FilterSelection {
        let book = resolve_book(self.book.as_deref(), service);
        FilterSelection::new(book, self.year.unwrap_or_else(|| service.current_year()))
            .month(self.month.unwrap_or_default())
            .kind(self.kind.unwrap_or_default())
    }
}

/// The named book, else the active one, else the first one
pub(crate) fn resolve_book<P: PersistenceProvider>(
    book: Option<&str>,
    service: &LedgerService<P>,
) -> String {
    book.map(str::to_string)
        .or_else(|| service.active_book().map(str::to_string))
        .or_else(|| service.book_names().first().map(|s| s.to_string()))
        .unwrap_or_default()
}

pub(crate) fn parse_month(s: &str) -> Result<MonthFilter, String> {
    MonthFilter::parse(s)
        .ok_or_else(|| format!("invalid month '{}': use all, 0-11 or a month name", s))
}

pub(crate) fn parse_kind_filter(s: &str) -> Result<KindFilter, String> {
    KindFilter::parse(s).ok_or_else(|| format!("invalid kind '{}': use all, income or expense", s))
}

pub(crate) fn parse_kind(s: &str) -> Result<EntryKind, String> {
    EntryKind::parse(s).ok_or_else(|| format!("invalid kind '{}': use income or expense", s))
}
