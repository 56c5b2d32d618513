//! Book model
//!
//! A book is a named ledger holding its entries most-recent-first.

use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// A named ledger
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Book {
    /// Unique name within the owning scope
    pub name: String,

    /// Entries, most recently created first
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Book {
    /// Create an empty book
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put an entry at the head of the book
    pub fn push_front(&mut self, entry: Entry) {
        self.entries.insert(0, entry);
    }

    /// Relabel the book and every entry in it
    ///
    /// Returns how many entries were relabeled.
    pub fn relabel(&mut self, new_name: &str) -> usize {
        let old_name = std::mem::replace(&mut self.name, new_name.to_string());
        let mut relabeled = 0;
        for entry in self.entries.iter_mut().filter(|e| e.book_name == old_name) {
            entry.book_name = new_name.to_string();
            relabeled += 1;
        }
        relabeled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, EntryKind, Money};
    use chrono::NaiveDate;

    fn entry(id: i64, book: &str) -> Entry {
        Entry::new(
            EntryId::from_raw(id),
            book,
            format!("item {}", id),
            Money::from_cents(100),
            EntryKind::Expense,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "%Y-%m-%d",
        )
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut book = Book::new("Home");
        book.push_front(entry(1, "Home"));
        book.push_front(entry(2, "Home"));
        assert_eq!(book.entries[0].id.as_i64(), 2);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_relabel() {
        let mut book = Book::new("Home");
        book.push_front(entry(1, "Home"));
        book.push_front(entry(2, "Home"));

        assert_eq!(book.relabel("House"), 2);
        assert_eq!(book.name, "House");
        assert!(book.entries.iter().all(|e| e.book_name == "House"));
    }
}
