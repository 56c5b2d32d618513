//! CSV export of a filtered view
//!
//! One row per entry in view order under the header
//! `Date,Description,Type,Amount`.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Entry;

pub const CSV_HEADER: [&str; 4] = ["Date", "Description", "Type", "Amount"];

fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Write `entries` as CSV
///
/// `Date` is the stored display date, `Type` is `Income` or `Expense` and
/// `Amount` is the unsigned decimal magnitude. Descriptions containing
/// commas, quotes or newlines are quoted.
pub fn export_view_csv<'a, W, I>(entries: I, writer: W) -> LedgerResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Entry>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER).map_err(export_err)?;

    let mut rows = 0;
    for entry in entries {
        out.write_record([
            entry.display_date.clone(),
            entry.description.clone(),
            entry.kind.to_string(),
            entry.amount.to_decimal_string(),
        ])
        .map_err(export_err)?;
        rows += 1;
    }

    out.flush().map_err(export_err)?;
    Ok(rows)
}
