//! Ledger service
//!
//! Owns the in-memory [`Ledger`] of one scope and the provider that persists
//! it. Each mutation is validated by the model, sent to the provider as a
//! single request and only then committed in memory, so a rejected request
//! leaves the model exactly as it was.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::audit::{entry_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Book, Clock, Entry, EntryId, EntryKind, FilterSelection, Ledger, Money, RenameOutcome,
    Totals,
};
use crate::storage::PersistenceProvider;

/// Service for book and entry management on top of a provider
pub struct LedgerService<P: PersistenceProvider> {
    provider: P,
    ledger: Ledger,
    audit: Option<AuditLogger>,
}

impl<P: PersistenceProvider> LedgerService<P> {
    /// Load the scope's books from `provider`
    ///
    /// A scope with no books gets `settings.default_book_name`. The stored
    /// active book is restored if it still exists.
    pub fn open(provider: P, settings: &Settings, clock: Arc<dyn Clock>) -> LedgerResult<Self> {
        let stored = provider.load_all()?;
        stored.validate()?;
        debug!(
            books = stored.books.len(),
            active = ?stored.active_book,
            "loaded ledger"
        );

        let mut ledger =
            Ledger::from_books(stored.books, clock).with_date_format(&settings.date_format)?;

        if ledger.ensure_default_book(&settings.default_book_name) {
            // The book is usable even if the backend cannot record it yet.
            if let Err(e) = provider.create_book(&settings.default_book_name) {
                warn!(book = %settings.default_book_name, error = %e, "could not store default book");
            }
        }

        if let Some(active) = stored.active_book.as_deref() {
            if ledger.set_active_book(active).is_err() {
                debug!(book = active, "stored active book no longer exists");
            }
        }

        Ok(Self {
            provider,
            ledger,
            audit: None,
        })
    }

    /// Record every successful mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn ensure_available(&self) -> LedgerResult<()> {
        if self.provider.is_available() {
            Ok(())
        } else {
            Err(LedgerError::Unavailable(
                "the ledger backend is not reachable".into(),
            ))
        }
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    fn request<T>(&self, what: &str, result: LedgerResult<T>) -> LedgerResult<T> {
        result.map_err(|e| {
            warn!(request = what, error = %e, "provider rejected request");
            e
        })
    }

    // === Books ===

    /// Create an empty book and make it active
    pub fn create_book(&mut self, name: &str) -> LedgerResult<Book> {
        let name = self.ledger.check_new_book_name(name)?;
        self.ensure_available()?;
        self.request("create_book", self.provider.create_book(&name))?;

        let book = self.ledger.commit_new_book(name);

        self.record(AuditEntry::create(
            EntityType::Book,
            book.name.clone(),
            Some(book.name.clone()),
            &book,
        ));
        info!(book = %book.name, "created book");
        Ok(book)
    }

    /// Rename a book and every entry labeled with it
    pub fn rename_book(&mut self, old_name: &str, new_name: &str) -> LedgerResult<RenameOutcome> {
        let new_name = match self.ledger.check_rename(old_name, new_name)? {
            Some(name) => name,
            None => return Ok(RenameOutcome::Unchanged),
        };
        self.ensure_available()?;
        self.request(
            "relabel_book",
            self.provider.relabel_book(old_name, &new_name),
        )?;

        let relabeled = self.ledger.commit_rename(old_name, &new_name);
        self.record(AuditEntry::rename(old_name, &new_name, relabeled));
        info!(from = old_name, to = %new_name, relabeled, "renamed book");
        Ok(RenameOutcome::Renamed { relabeled })
    }

    /// Make `name` the active book and remember the choice
    pub fn select_book(&mut self, name: &str) -> LedgerResult<()> {
        if self.ledger.book(name).is_none() {
            return Err(LedgerError::book_not_found(name));
        }
        self.ensure_available()?;
        self.request("store_active_book", self.provider.store_active_book(name))?;
        self.ledger.set_active_book(name)?;
        debug!(book = name, "selected book");
        Ok(())
    }

    pub fn active_book(&self) -> Option<&str> {
        self.ledger.active_book()
    }

    pub fn book_names(&self) -> Vec<&str> {
        self.ledger.book_names()
    }

    // === Entries ===

    /// Record a new entry dated today at the head of `book_name`
    pub fn add_entry(
        &mut self,
        book_name: &str,
        description: &str,
        amount: Money,
        kind: EntryKind,
    ) -> LedgerResult<Entry> {
        let entry = self
            .ledger
            .prepare_entry(book_name, description, amount, kind)?;
        self.ensure_available()?;
        self.request("insert_entry", self.provider.insert_entry(&entry))?;

        self.ledger.commit_entry(entry.clone());
        self.record(AuditEntry::create(
            EntityType::Entry,
            entry.id.to_string(),
            Some(entry.description.clone()),
            &entry,
        ));
        info!(id = %entry.id, book = %entry.book_name, kind = %entry.kind, "added entry");
        Ok(entry)
    }

    /// Change description, amount and kind of an existing entry
    pub fn update_entry(
        &mut self,
        id: EntryId,
        description: &str,
        amount: Money,
        kind: EntryKind,
    ) -> LedgerResult<Entry> {
        let revised = self.ledger.prepare_update(id, description, amount, kind)?;
        let before = self
            .ledger
            .entry(id)
            .cloned()
            .ok_or_else(|| LedgerError::entry_not_found(id.to_string()))?;
        self.ensure_available()?;
        self.request("update_entry", self.provider.update_entry(&revised))?;

        self.ledger.commit_update(revised.clone())?;
        self.record(AuditEntry::update(
            EntityType::Entry,
            id.to_string(),
            Some(revised.description.clone()),
            &before,
            &revised,
            entry_diff(&before, &revised),
        ));
        info!(id = %id, "updated entry");
        Ok(revised)
    }

    /// Remove an entry; its book stays even when it becomes empty
    pub fn delete_entry(&mut self, id: EntryId) -> LedgerResult<Entry> {
        if self.ledger.entry(id).is_none() {
            return Err(LedgerError::entry_not_found(id.to_string()));
        }
        self.ensure_available()?;
        self.request("delete_entry", self.provider.delete_entry(id))?;

        let removed = self.ledger.delete_entry(id)?;
        self.record(AuditEntry::delete(
            EntityType::Entry,
            id.to_string(),
            Some(removed.description.clone()),
            &removed,
        ));
        info!(id = %id, book = %removed.book_name, "deleted entry");
        Ok(removed)
    }

    // === Queries ===

    pub fn filtered_view(&self, selection: &FilterSelection) -> Vec<&Entry> {
        self.ledger.view(selection)
    }

    /// Totals for the selection's book and period; its kind is ignored
    pub fn totals(&self, selection: &FilterSelection) -> Totals {
        self.ledger
            .totals(&selection.book, selection.month, selection.year)
    }

    pub fn available_years(&self, book_name: &str) -> Vec<i32> {
        self.ledger.available_years(book_name)
    }

    pub fn current_year(&self) -> i32 {
        self.ledger.current_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedClock, KindFilter};
    use crate::storage::{JsonFileProvider, MemoryProvider};
    use tempfile::TempDir;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::ymd(2025, 3, 14).unwrap())
    }

    fn open_memory() -> LedgerService<MemoryProvider> {
        LedgerService::open(MemoryProvider::new(), &Settings::default(), clock()).unwrap()
    }

    #[test]
    fn test_open_materializes_default_book() {
        let service = open_memory();
        assert_eq!(service.book_names(), vec!["Main"]);
        assert_eq!(service.active_book(), Some("Main"));

        let stored = service.provider().snapshot().unwrap();
        assert_eq!(stored.books.len(), 1);
    }

    #[test]
    fn test_add_entry_persists_and_commits() {
        let mut service = open_memory();
        let entry = service
            .add_entry("Main", "Salary", Money::from_cents(100000), EntryKind::Income)
            .unwrap();

        assert_eq!(entry.display_date, "2025-03-14");
        assert_eq!(entry.month, 2);

        let stored = service.provider().snapshot().unwrap();
        assert_eq!(stored.books[0].entries[0].id, entry.id);
        assert_eq!(service.ledger().entry_count(), 1);
    }

    #[test]
    fn test_offline_provider_leaves_model_untouched() {
        let mut service = open_memory();
        service
            .add_entry("Main", "Salary", Money::from_cents(100000), EntryKind::Income)
            .unwrap();
        service.provider().set_online(false);

        let err = service
            .add_entry("Main", "Rent", Money::from_cents(40000), EntryKind::Expense)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(_)));

        let err = service.rename_book("Main", "Home").unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(_)));

        assert_eq!(service.ledger().entry_count(), 1);
        assert_eq!(service.book_names(), vec!["Main"]);
    }

    #[test]
    fn test_validation_runs_before_availability() {
        let mut service = open_memory();
        service.provider().set_online(false);

        let err = service
            .add_entry("Main", "   ", Money::from_cents(100), EntryKind::Expense)
            .unwrap_err();
        assert!(matches!(err, LedgerError::EmptyDescription));
    }

    #[test]
    fn test_rename_relabels_provider_and_model() {
        let mut service = open_memory();
        service
            .add_entry("Main", "Salary", Money::from_cents(100000), EntryKind::Income)
            .unwrap();
        service
            .add_entry("Main", "Rent", Money::from_cents(40000), EntryKind::Expense)
            .unwrap();

        let outcome = service.rename_book("Main", "Home").unwrap();
        assert_eq!(outcome, RenameOutcome::Renamed { relabeled: 2 });
        assert_eq!(service.active_book(), Some("Home"));

        let stored = service.provider().snapshot().unwrap();
        assert_eq!(stored.books[0].name, "Home");
        assert!(stored.books[0].entries.iter().all(|e| e.book_name == "Home"));

        let selection = FilterSelection::new("Home", 2025);
        assert_eq!(service.filtered_view(&selection).len(), 2);
    }

    #[test]
    fn test_create_book_is_one_request() {
        let mut service = open_memory();
        let writes = service.provider().write_count();

        service.create_book("Travel").unwrap();
        assert_eq!(service.provider().write_count(), writes + 1);
        assert_eq!(service.active_book(), Some("Travel"));

        let stored = service.provider().snapshot().unwrap();
        assert_eq!(stored.active_book.as_deref(), Some("Travel"));
        assert!(stored.books.iter().any(|b| b.name == "Travel"));
    }

    #[test]
    fn test_open_rejects_unusable_date_format() {
        let settings = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        let result = LedgerService::open(MemoryProvider::new(), &settings, clock());
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_rename_to_same_name_writes_nothing() {
        let mut service = open_memory();
        let writes = service.provider().write_count();
        assert_eq!(
            service.rename_book("Main", "Main").unwrap(),
            RenameOutcome::Unchanged
        );
        assert_eq!(service.provider().write_count(), writes);
    }

    #[test]
    fn test_update_and_delete() {
        let mut service = open_memory();
        let entry = service
            .add_entry("Main", "Rent", Money::from_cents(40000), EntryKind::Expense)
            .unwrap();

        let revised = service
            .update_entry(entry.id, "Refund", Money::from_cents(5000), EntryKind::Income)
            .unwrap();
        assert_eq!(revised.occurred_on, entry.occurred_on);
        assert_eq!(revised.book_name, "Main");

        let stored = service.provider().snapshot().unwrap();
        assert_eq!(stored.books[0].entries[0].description, "Refund");

        service.delete_entry(entry.id).unwrap();
        assert_eq!(service.ledger().entry_count(), 0);
        assert_eq!(service.book_names(), vec!["Main"]);

        let err = service.delete_entry(entry.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_totals_ignore_kind() {
        let mut service = open_memory();
        service
            .add_entry("Main", "Salary", Money::from_cents(100000), EntryKind::Income)
            .unwrap();
        service
            .add_entry("Main", "Rent", Money::from_cents(40000), EntryKind::Expense)
            .unwrap();

        let selection = FilterSelection::new("Main", 2025).kind(KindFilter::Income);
        assert_eq!(service.filtered_view(&selection).len(), 1);

        let totals = service.totals(&selection);
        assert_eq!(totals.income, Money::from_cents(100000));
        assert_eq!(totals.expense, Money::from_cents(40000));
        assert_eq!(totals.balance(), Money::from_cents(60000));
    }

    #[test]
    fn test_select_book_is_restored_on_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("local.json");

        {
            let mut service =
                LedgerService::open(JsonFileProvider::new(path.clone()), &Settings::default(), clock())
                    .unwrap();
            service.create_book("Travel").unwrap();
            service.select_book("Main").unwrap();
        }

        let service =
            LedgerService::open(JsonFileProvider::new(path), &Settings::default(), clock()).unwrap();
        assert_eq!(service.book_names(), vec!["Main", "Travel"]);
        assert_eq!(service.active_book(), Some("Main"));
    }

    #[test]
    fn test_provider_error_leaves_model_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("local.json");
        let mut service =
            LedgerService::open(JsonFileProvider::new(path.clone()), &Settings::default(), clock())
                .unwrap();

        // A directory in place of the file makes the next write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = service
            .add_entry("Main", "Rent", Money::from_cents(40000), EntryKind::Expense)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert_eq!(service.ledger().entry_count(), 0);
    }

    #[test]
    fn test_unreadable_file_fails_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("local.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = LedgerService::open(JsonFileProvider::new(path), &Settings::default(), clock());
        assert!(matches!(result, Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_audit_records_mutations() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().join("audit.log"));
        let mut service = open_memory().with_audit(logger);

        let entry = service
            .add_entry("Main", "Rent", Money::from_cents(40000), EntryKind::Expense)
            .unwrap();
        service
            .update_entry(entry.id, "Rent", Money::from_cents(45000), EntryKind::Expense)
            .unwrap();
        service.rename_book("Main", "Home").unwrap();

        let log = AuditLogger::new(temp.path().join("audit.log"));
        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("amount: 400.00 -> 450.00")
        );
        assert_eq!(entries[2].entity_type, EntityType::Book);
    }
}
