//! Local JSON file provider
//!
//! Keeps one scope's ledger in a single JSON file. Every request rewrites the
//! whole file atomically, so a relabel either lands for every entry or for
//! none of them.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, EntryId, Scope};

use super::file_io::{read_json, write_json_atomic};
use super::provider::{PersistenceProvider, StoredLedger};

/// Persistence provider backed by `data/<scope>.json`
pub struct JsonFileProvider {
    path: PathBuf,
    /// `None` until the file has been read
    data: RwLock<Option<StoredLedger>>,
}

impl JsonFileProvider {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    /// Provider for the ledger file of a scope
    pub fn for_scope(paths: &LedgerPaths, scope: &Scope) -> Self {
        Self::new(paths.ledger_file(scope))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> LedgerResult<StoredLedger> {
        let stored: StoredLedger = read_json(&self.path)?;
        stored.validate()?;
        Ok(stored)
    }

    /// Apply a change to a copy of the stored ledger and write it out
    ///
    /// The cached copy is only replaced after the file write succeeds.
    fn apply<T>(&self, change: impl FnOnce(&mut StoredLedger) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut next = match data.as_ref() {
            Some(current) => current.clone(),
            None => self.read_file()?,
        };
        let result = change(&mut next)?;
        write_json_atomic(&self.path, &next)?;
        *data = Some(next);
        Ok(result)
    }
}

impl PersistenceProvider for JsonFileProvider {
    fn load_all(&self) -> LedgerResult<StoredLedger> {
        let stored = self.read_file()?;
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = Some(stored.clone());
        Ok(stored)
    }

    fn create_book(&self, name: &str) -> LedgerResult<()> {
        self.apply(|stored| {
            stored.ensure_book(name);
            stored.active_book = Some(name.to_string());
            Ok(())
        })
    }

    fn insert_entry(&self, entry: &Entry) -> LedgerResult<()> {
        self.apply(|stored| {
            stored.insert_entry(entry);
            Ok(())
        })
    }

    fn update_entry(&self, entry: &Entry) -> LedgerResult<()> {
        self.apply(|stored| stored.update_entry(entry))
    }

    fn delete_entry(&self, id: EntryId) -> LedgerResult<()> {
        self.apply(|stored| stored.delete_entry(id))
    }

    fn relabel_book(&self, old_name: &str, new_name: &str) -> LedgerResult<usize> {
        self.apply(|stored| stored.relabel_book(old_name, new_name))
    }

    fn store_active_book(&self, name: &str) -> LedgerResult<()> {
        self.apply(|stored| {
            stored.active_book = Some(name.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_provider() -> (TempDir, JsonFileProvider) {
        let temp_dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(temp_dir.path().join("local.json"));
        (temp_dir, provider)
    }

    fn entry(id: i64, book: &str, description: &str) -> Entry {
        Entry::new(
            EntryId::from_raw(id),
            book,
            description,
            Money::from_cents(1999),
            EntryKind::Expense,
            NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            "%Y-%m-%d",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, provider) = create_test_provider();
        let stored = provider.load_all().unwrap();
        assert!(stored.books.is_empty());
        assert!(!provider.path().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, provider) = create_test_provider();
        provider.load_all().unwrap();
        provider.create_book("Savings").unwrap();
        provider.insert_entry(&entry(1, "Home", "Rent")).unwrap();
        provider.store_active_book("Home").unwrap();

        let reopened = JsonFileProvider::new(temp_dir.path().join("local.json"));
        let stored = reopened.load_all().unwrap();
        assert_eq!(stored.books.len(), 2);
        assert_eq!(stored.books[0].name, "Savings");
        assert_eq!(stored.books[1].entries[0].description, "Rent");
        assert_eq!(stored.active_book.as_deref(), Some("Home"));
    }

    #[test]
    fn test_create_book_stores_active_book() {
        let (temp_dir, provider) = create_test_provider();
        provider.create_book("Travel").unwrap();

        let stored = JsonFileProvider::new(temp_dir.path().join("local.json"))
            .load_all()
            .unwrap();
        assert_eq!(stored.books[0].name, "Travel");
        assert_eq!(stored.active_book.as_deref(), Some("Travel"));
    }

    #[test]
    fn test_write_without_load_keeps_existing_file() {
        let (temp_dir, provider) = create_test_provider();
        provider.insert_entry(&entry(1, "Home", "first")).unwrap();

        let second = JsonFileProvider::new(temp_dir.path().join("local.json"));
        second.insert_entry(&entry(2, "Home", "second")).unwrap();

        let stored = second.load_all().unwrap();
        assert_eq!(stored.books[0].entries.len(), 2);
    }

    #[test]
    fn test_update_delete_and_relabel() {
        let (_temp_dir, provider) = create_test_provider();
        provider.insert_entry(&entry(1, "Home", "Rent")).unwrap();
        provider.insert_entry(&entry(2, "Home", "Food")).unwrap();

        let mut revised = entry(1, "Home", "Rent (March)");
        revised.amount = Money::from_cents(50000);
        provider.update_entry(&revised).unwrap();
        provider.delete_entry(EntryId::from_raw(2)).unwrap();
        assert_eq!(provider.relabel_book("Home", "Flat").unwrap(), 1);

        let stored = provider.load_all().unwrap();
        let book = &stored.books[0];
        assert_eq!(book.name, "Flat");
        assert_eq!(book.entries.len(), 1);
        assert_eq!(book.entries[0].description, "Rent (March)");
        assert_eq!(book.entries[0].book_name, "Flat");
    }

    #[test]
    fn test_failed_request_leaves_file_untouched() {
        let (_temp_dir, provider) = create_test_provider();
        provider.insert_entry(&entry(1, "Home", "Rent")).unwrap();
        let before = std::fs::read_to_string(provider.path()).unwrap();

        assert!(provider.delete_entry(EntryId::from_raw(42)).is_err());
        assert!(provider.relabel_book("Nowhere", "Else").is_err());

        assert_eq!(std::fs::read_to_string(provider.path()).unwrap(), before);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let (_temp_dir, provider) = create_test_provider();
        std::fs::write(
            provider.path(),
            r#"{"books": [{"name": "Home"}, {"name": "Home"}]}"#,
        )
        .unwrap();
        assert!(matches!(provider.load_all(), Err(LedgerError::Storage(_))));
    }
}
