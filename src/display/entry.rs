//! Entry display formatting

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Entry;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl EntryRow {
    fn new(entry: &Entry, currency: &str) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.display_date.clone(),
            description: entry.description.clone(),
            kind: entry.kind.to_string(),
            amount: entry.amount.format_with_symbol(currency),
        }
    }
}

/// Format entries as a table in the order given
pub fn format_entry_table(entries: &[&Entry], currency: &str) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }

    let rows: Vec<EntryRow> = entries.iter().map(|e| EntryRow::new(e, currency)).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(4), Alignment::right());
    table.to_string()
}

/// Format a single entry's details
pub fn format_entry_details(entry: &Entry, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry: {}\n", entry.id));
    output.push_str(&format!("  Book:        {}\n", entry.book_name));
    output.push_str(&format!("  Date:        {}\n", entry.display_date));
    output.push_str(&format!("  Description: {}\n", entry.description));
    output.push_str(&format!("  Type:        {}\n", entry.kind));
    output.push_str(&format!(
        "  Amount:      {}\n",
        entry.amount.format_with_symbol(currency)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, EntryKind, Money};
    use chrono::NaiveDate;

    fn entry() -> Entry {
        Entry::new(
            EntryId::from_raw(42),
            "Home",
            "Groceries",
            Money::from_cents(2599),
            EntryKind::Expense,
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            "%Y-%m-%d",
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_entry_table(&[], "$"), "No entries found.");
    }

    #[test]
    fn test_table_contains_rows() {
        let entry = entry();
        let table = format_entry_table(&[&entry], "€");
        assert!(table.contains("Description"));
        assert!(table.contains("Groceries"));
        assert!(table.contains("€25.99"));
        assert!(table.contains("2025-02-03"));
    }

    #[test]
    fn test_details() {
        let details = format_entry_details(&entry(), "$");
        assert!(details.starts_with("Entry: 42\n"));
        assert!(details.contains("Type:        Expense"));
        assert!(details.contains("Amount:      $25.99"));
    }
}
