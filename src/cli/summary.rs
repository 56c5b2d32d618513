//! Totals and year commands

use super::{resolve_book, ViewArgs};
use crate::config::Settings;
use crate::display::{format_totals, format_years};
use crate::error::LedgerResult;
use crate::services::LedgerService;
use crate::storage::PersistenceProvider;

/// Print income, expense and balance for a book and period
///
/// A `--kind` option is accepted for symmetry with `entry list` but has no
/// effect on the totals.
pub fn handle_summary_command<P: PersistenceProvider>(
    service: &LedgerService<P>,
    settings: &Settings,
    view: &ViewArgs,
) -> LedgerResult<()> {
    let selection = view.selection(service);
    let totals = service.totals(&selection);
    print!(
        "{}",
        format_totals(&selection, &totals, &settings.currency_symbol)
    );
    Ok(())
}

/// Print the years that can be selected for a book
pub fn handle_years_command<P: PersistenceProvider>(
    service: &LedgerService<P>,
    book: Option<&str>,
) -> LedgerResult<()> {
    let book = resolve_book(book, service);
    println!("{}", format_years(&service.available_years(&book)));
    Ok(())
}
