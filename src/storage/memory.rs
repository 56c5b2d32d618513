//! In-process provider
//!
//! Holds a scope's ledger in memory. It can be switched offline to behave
//! like an unreachable remote backend: while offline every request fails
//! fast with [`LedgerError::Unavailable`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Book, Entry, EntryId};

use super::provider::{PersistenceProvider, StoredLedger};

pub struct MemoryProvider {
    data: RwLock<StoredLedger>,
    online: AtomicBool,
    writes: AtomicUsize,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// Provider pre-populated with books
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            data: RwLock::new(StoredLedger {
                books,
                ..StoredLedger::default()
            }),
            online: AtomicBool::new(true),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Number of successful write requests served
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the stored state
    pub fn snapshot(&self) -> LedgerResult<StoredLedger> {
        self.data
            .read()
            .map(|data| data.clone())
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn ensure_online(&self) -> LedgerResult<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LedgerError::Unavailable("backend is offline".into()))
        }
    }

    fn apply<T>(&self, change: impl FnOnce(&mut StoredLedger) -> LedgerResult<T>) -> LedgerResult<T> {
        self.ensure_online()?;
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut next = data.clone();
        let result = change(&mut next)?;
        *data = next;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(result)
    }
}

impl PersistenceProvider for MemoryProvider {
    fn is_available(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn load_all(&self) -> LedgerResult<StoredLedger> {
        self.ensure_online()?;
        let stored = self.snapshot()?;
        stored.validate()?;
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
