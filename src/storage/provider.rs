//! Persistence provider abstraction
//!
//! The ledger service talks to storage only through [`PersistenceProvider`].
//! Each method is one request; a provider that cannot apply a request in
//! full must fail it without partial effects where it is able to.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Book, Entry, EntryId};

/// Current on-disk schema version of a ledger file
pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// Everything a provider stores for one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLedger {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Last book the user had selected
    #[serde(default)]
    pub active_book: Option<String>,

    /// Books in creation order
    #[serde(default)]
    pub books: Vec<Book>,
}

fn default_schema_version() -> u32 {
    LEDGER_SCHEMA_VERSION
}

impl Default for StoredLedger {
    fn default() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            active_book: None,
            books: Vec::new(),
        }
    }
}

impl StoredLedger {
    /// Check stored data before handing it to the ledger
    pub fn validate(&self) -> LedgerResult<()> {
        if self.schema_version > LEDGER_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "Ledger schema version {} is newer than supported version {}",
                self.schema_version, LEDGER_SCHEMA_VERSION
            )));
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for book in &self.books {
            if book.name.trim().is_empty() {
                return Err(LedgerError::Storage("Stored book has an empty name".into()));
            }
            if !names.insert(book.name.as_str()) {
                return Err(LedgerError::Storage(format!(
                    "Book '{}' is stored twice",
                    book.name
                )));
            }
            for entry in &book.entries {
                entry
                    .validate()
                    .map_err(|e| LedgerError::Storage(format!("Entry {}: {}", entry.id, e)))?;
                if entry.book_name != book.name {
                    return Err(LedgerError::Storage(format!(
                        "Entry {} is labeled '{}' but stored in book '{}'",
                        entry.id, entry.book_name, book.name
                    )));
                }
                if !ids.insert(entry.id) {
                    return Err(LedgerError::Storage(format!(
                        "Entry id {} is stored twice",
                        entry.id
                    )));
                }
            }
        }
        Ok(())
    }

    fn book_mut(&mut self, name: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.name == name)
    }

    /// Add an empty book unless one with that name exists
    pub fn ensure_book(&mut self, name: &str) -> bool {
        if self.books.iter().any(|b| b.name == name) {
            return false;
        }
        self.books.push(Book::new(name));
        true
    }

    /// Insert an entry at the head of its book, creating the book if needed
    pub fn insert_entry(&mut self, entry: &Entry) {
        self.ensure_book(&entry.book_name);
        if let Some(book) = self.book_mut(&entry.book_name) {
            book.push_front(entry.clone());
        }
    }

    /// Replace a stored entry with the same id
    pub fn update_entry(&mut self, entry: &Entry) -> LedgerResult<()> {
        let slot = self
            .books
            .iter_mut()
            .flat_map(|b| b.entries.iter_mut())
            .find(|e| e.id == entry.id)
            .ok_or_else(|| LedgerError::entry_not_found(entry.id.to_string()))?;
        *slot = entry.clone();
        Ok(())
    }

    pub fn delete_entry(&mut self, id: EntryId) -> LedgerResult<()> {
        for book in &mut self.books {
            if let Some(pos) = book.entries.iter().position(|e| e.id == id) {
                book.entries.remove(pos);
                return Ok(());
            }
        }
        Err(LedgerError::entry_not_found(id.to_string()))
    }

    /// Relabel a book and its entries; returns the number of relabeled entries
    pub fn relabel_book(&mut self, old_name: &str, new_name: &str) -> LedgerResult<usize> {
        if self.books.iter().any(|b| b.name == new_name) {
            return Err(LedgerError::book_exists(new_name));
        }
        let relabeled = self
            .book_mut(old_name)
            .ok_or_else(|| LedgerError::book_not_found(old_name))?
            .relabel(new_name);
        if self.active_book.as_deref() == Some(old_name) {
            self.active_book = Some(new_name.to_string());
        }
        Ok(relabeled)
    }
}

/// Storage backend for one scope's books and entries
pub trait PersistenceProvider {
    /// Whether the backend can currently accept writes
    fn is_available(&self) -> bool {
        true
    }

    /// Read every book and entry of the scope
    fn load_all(&self) -> LedgerResult<StoredLedger>;

    /// Record a new empty book and make it the active book, in one request
    ///
    /// Backends that only know about entries may ignore this; the book then
    /// exists client-side until its first entry is stored.
    fn create_book(&self, _name: &str) -> LedgerResult<()> {
        Ok(())
    }

    fn insert_entry(&self, entry: &Entry) -> LedgerResult<()>;

    /// Store the new description/amount/kind of an existing entry
    fn update_entry(&self, entry: &Entry) -> LedgerResult<()>;

    fn delete_entry(&self, id: EntryId) -> LedgerResult<()>;

    /// Move every entry labeled `old_name` to `new_name` in one request
    fn relabel_book(&self, old_name: &str, new_name: &str) -> LedgerResult<usize>;

    /// Remember the selected book; a no-op for backends without that notion
    fn store_active_book(&self, _name: &str) -> LedgerResult<()> {
        Ok(())
    }
}
