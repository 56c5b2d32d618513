//! JSON export of a whole scope

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Book, Ledger, Scope};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every book and entry of one scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the application that wrote the export
    pub app_version: String,

    /// `local` or `user:<id>`
    pub scope: String,

    pub active_book: Option<String>,

    pub books: Vec<Book>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub book_count: usize,

    pub entry_count: usize,

    /// Earliest entry date, if any
    pub earliest_entry: Option<String>,

    /// Latest entry date, if any
    pub latest_entry: Option<String>,
}

impl FullExport {
    pub fn from_ledger(ledger: &Ledger, scope: &Scope) -> Self {
        let books = ledger.books().to_vec();
        let dates = || books.iter().flat_map(|b| b.entries.iter()).map(|e| e.occurred_on);

        let metadata = ExportMetadata {
            book_count: books.len(),
            entry_count: books.iter().map(Book::len).sum(),
            earliest_entry: dates().min().map(|d| d.to_string()),
            latest_entry: dates().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            scope: scope.to_string(),
            active_book: ledger.active_book().map(str::to_string),
            books,
            metadata,
        }
    }
}

/// Write the full export as JSON
pub fn export_full_json<W: Write>(
    ledger: &Ledger,
    scope: &Scope,
    writer: W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = FullExport::from_ledger(ledger, scope);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))
}
