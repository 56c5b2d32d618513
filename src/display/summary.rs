//! Totals, book list and year list formatting

use crate::models::{FilterSelection, Totals};

/// Format the totals panel for a selection
pub fn format_totals(selection: &FilterSelection, totals: &Totals, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {} {}\n",
        selection.book, selection.month, selection.year
    ));
    output.push_str(&format!(
        "  Income:  {:>14}\n",
        totals.income.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Expense: {:>14}\n",
        totals.expense.format_with_symbol(currency)
    ));
    output.push_str(&format!("  {:-<23}\n", ""));
    output.push_str(&format!(
        "  Balance: {:>14}\n",
        totals.balance().format_with_symbol(currency)
    ));

    output
}

/// Format book names with entry counts, marking the active book
pub fn format_book_list(books: &[(&str, usize)], active: Option<&str>) -> String {
    if books.is_empty() {
        return "No books found.".to_string();
    }

    let name_width = books.iter().map(|(name, _)| name.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    for (name, count) in books {
        let marker = if Some(*name) == active { "*" } else { " " };
        output.push_str(&format!(
            "{} {:<name_width$}  {} {}\n",
            marker,
            name,
            count,
            if *count == 1 { "entry" } else { "entries" },
            name_width = name_width,
        ));
    }

    output
}

/// One year per line, newest first
pub fn format_years(years: &[i32]) -> String {
    years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
