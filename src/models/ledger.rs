//! The Ledger Model
//!
//! Owns the books of one scope and their entries, answers the filtered view,
//! totals and available-years queries, and enforces the book lifecycle rules.
//! Everything here is in memory; persistence is the caller's concern.
//!
//! Mutations come in two halves so a caller can put a persistence request
//! between validation and commit: `prepare_*`/`check_*` validate and build
//! the change without touching any book, and `commit_*` applies it. The
//! one-shot methods (`create_book`, `add_entry`, ...) do both.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Datelike;

use super::book::Book;
use super::clock::Clock;
use super::entry::{
    check_amount, normalize_description, validate_date_format, Entry, EntryKind,
    DEFAULT_DATE_FORMAT,
};
use super::filter::{in_period, FilterSelection, KindFilter, MonthFilter};
use super::ids::{EntryId, IdGenerator};
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Income and expense sums over a month/year window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    /// Income minus expense
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    fn record(&mut self, entry: &Entry) {
        match entry.kind {
            EntryKind::Income => self.income += entry.amount,
            EntryKind::Expense => self.expense += entry.amount,
        }
    }
}

/// Result of a rename request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The new name equals the old one; nothing to do
    Unchanged,
    /// The book was renamed and `relabeled` entries moved with it
    Renamed { relabeled: usize },
}

/// In-memory ledger for a single scope
pub struct Ledger {
    books: Vec<Book>,
    active: Option<String>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    date_format: String,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            books: Vec::new(),
            active: None,
            ids: IdGenerator::new(),
            clock,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Create a ledger from books loaded out of storage
    ///
    /// Book order is kept; the first book becomes active.
    pub fn from_books(books: Vec<Book>, clock: Arc<dyn Clock>) -> Self {
        let mut ledger = Self::new(clock);
        for entry in books.iter().flat_map(|b| b.entries.iter()) {
            ledger.ids.observe(entry.id);
        }
        ledger.active = books.first().map(|b| b.name.clone());
        ledger.books = books;
        ledger
    }

    /// Set the strftime format used for entry display dates
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> LedgerResult<Self> {
        let date_format = date_format.into();
        validate_date_format(&date_format)?;
        self.date_format = date_format;
        Ok(self)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, name: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.name == name)
    }

    fn book_mut(&mut self, name: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.name == name)
    }

    /// Book names in creation order
    pub fn book_names(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn active_book(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Point the active book at an existing book
    pub fn set_active_book(&mut self, name: &str) -> LedgerResult<()> {
        if self.book(name).is_none() {
            return Err(LedgerError::book_not_found(name));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Materialize `name` as the first book if the ledger has none
    ///
    /// Returns true if a book was created.
    pub fn ensure_default_book(&mut self, name: &str) -> bool {
        if !self.books.is_empty() {
            return false;
        }
        self.books.push(Book::new(name));
        self.active = Some(name.to_string());
        true
    }

    /// Look up an entry in any book
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.books
            .iter()
            .flat_map(|b| b.entries.iter())
            .find(|e| e.id == id)
    }

    pub fn entry_count(&self) -> usize {
        self.books.iter().map(Book::len).sum()
    }

    pub fn current_year(&self) -> i32 {
        self.clock.today().year()
    }

    // ------------------------------------------------------------------
    // Book lifecycle
    // ------------------------------------------------------------------

    /// Validate a name for a new book, returning it trimmed
    pub fn check_new_book_name(&self, name: &str) -> LedgerResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.book(name).is_some() {
            return Err(LedgerError::book_exists(name));
        }
        Ok(name.to_string())
    }

    /// Append an empty book that already passed [`Self::check_new_book_name`]
    pub fn commit_new_book(&mut self, name: String) -> Book {
        let book = Book::new(name.clone());
        self.books.push(book.clone());
        self.active = Some(name);
        book
    }

    /// Create an empty book and make it active
    pub fn create_book(&mut self, name: &str) -> LedgerResult<Book> {
        let name = self.check_new_book_name(name)?;
        Ok(self.commit_new_book(name))
    }

    /// Validate a rename
    ///
    /// Returns `None` when the new name equals the old one, otherwise the
    /// trimmed new name.
    pub fn check_rename(&self, old_name: &str, new_name: &str) -> LedgerResult<Option<String>> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.book(old_name).is_none() {
            return Err(LedgerError::book_not_found(old_name));
        }
        if new_name == old_name {
            return Ok(None);
        }
        if self.book(new_name).is_some() {
            return Err(LedgerError::book_exists(new_name));
        }
        Ok(Some(new_name.to_string()))
    }

    /// Apply a rename that already passed [`Self::check_rename`]
    pub fn commit_rename(&mut self, old_name: &str, new_name: &str) -> usize {
        let relabeled = match self.book_mut(old_name) {
            Some(book) => book.relabel(new_name),
            None => return 0,
        };
        if self.active.as_deref() == Some(old_name) {
            self.active = Some(new_name.to_string());
        }
        relabeled
    }

    /// Rename a book, relabeling every entry that carries the old name
    pub fn rename_book(&mut self, old_name: &str, new_name: &str) -> LedgerResult<RenameOutcome> {
        match self.check_rename(old_name, new_name)? {
            None => Ok(RenameOutcome::Unchanged),
            Some(new_name) => Ok(RenameOutcome::Renamed {
                relabeled: self.commit_rename(old_name, &new_name),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    /// Validate input and build a new entry dated today
    ///
    /// Allocates the id but does not insert the entry.
    pub fn prepare_entry(
        &mut self,
        book_name: &str,
        description: &str,
        amount: Money,
        kind: EntryKind,
    ) -> LedgerResult<Entry> {
        let book_name = book_name.trim();
        if book_name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let description = normalize_description(description)?;
        check_amount(amount)?;

        let id = self.ids.next(self.clock.now_millis());
        Ok(Entry::new(
            id,
            book_name,
            description,
            amount,
            kind,
            self.clock.today(),
            &self.date_format,
        ))
    }

    /// Insert a prepared entry at the head of its book
    ///
    /// A book that does not exist yet is created.
    pub fn commit_entry(&mut self, entry: Entry) {
        self.ids.observe(entry.id);
        match self.book_mut(&entry.book_name) {
            Some(book) => book.push_front(entry),
            None => {
                let mut book = Book::new(entry.book_name.clone());
                book.push_front(entry);
                self.books.push(book);
            }
        }
    }

    /// Record a new entry dated today at the head of `book_name`
    pub fn add_entry(
        &mut self,
        book_name: &str,
        description: &str,
        amount: Money,
        kind: EntryKind,
    ) -> LedgerResult<Entry> {
        let entry = self.prepare_entry(book_name, description, amount, kind)?;
        self.commit_entry(entry.clone());
        Ok(entry)
    }

    /// Validate an update and return the revised copy of the entry
    pub fn prepare_update(
        &self,
        id: EntryId,
        description: &str,
        amount: Money,
        kind: EntryKind,
    ) -> LedgerResult<Entry> {
        let current = self
            .entry(id)
            .ok_or_else(|| LedgerError::entry_not_found(id.to_string()))?;
        let description = normalize_description(description)?;
        check_amount(amount)?;

        let mut revised = current.clone();
        revised.revise(description, amount, kind);
        Ok(revised)
    }

    /// Replace an entry in place with its revised copy
    pub fn commit_update(&mut self, revised: Entry) -> LedgerResult<()> {
        let slot = self
            .books
            .iter_mut()
            .flat_map(|b| b.entries.iter_mut())
            .find(|e| e.id == revised.id)
            .ok_or_else(|| LedgerError::entry_not_found(revised.id.to_string()))?;
        *slot = revised;
        Ok(())
    }

    /// Change description, amount and kind of an entry
    pub fn update_entry(
        &mut self,
        id: EntryId,
        description: &str,
        amount: Money,
        kind: EntryKind,
    ) -> LedgerResult<Entry> {
        let revised = self.prepare_update(id, description, amount, kind)?;
        self.commit_update(revised.clone())?;
        Ok(revised)
    }

    /// Remove an entry from its book
    pub fn delete_entry(&mut self, id: EntryId) -> LedgerResult<Entry> {
        for book in &mut self.books {
            if let Some(pos) = book.entries.iter().position(|e| e.id == id) {
                return Ok(book.entries.remove(pos));
            }
        }
        Err(LedgerError::entry_not_found(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Entries of a book matching month, year and kind, in stored order
    pub fn filtered_view(
        &self,
        book_name: &str,
        month: MonthFilter,
        year: i32,
        kind: KindFilter,
    ) -> Vec<&Entry> {
        self.book(book_name)
            .map(|book| {
                book.entries
                    .iter()
                    .filter(|e| in_period(e, month, year) && kind.admits(e.kind))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// [`Self::filtered_view`] for a whole selection
    pub fn view(&self, selection: &FilterSelection) -> Vec<&Entry> {
        self.filtered_view(&selection.book, selection.month, selection.year, selection.kind)
    }

    /// Income and expense sums of a book over a month/year window
    ///
    /// The kind filter never applies here, so the balance stays the same
    /// whichever kind tab is showing.
    pub fn totals(&self, book_name: &str, month: MonthFilter, year: i32) -> Totals {
        let mut totals = Totals::default();
        if let Some(book) = self.book(book_name) {
            for entry in book.entries.iter().filter(|e| in_period(e, month, year)) {
                totals.record(entry);
            }
        }
        totals
    }

    /// Years with entries in the book plus the current year, newest first
    pub fn available_years(&self, book_name: &str) -> Vec<i32> {
        let mut years: BTreeSet<i32> = self
            .book(book_name)
            .map(|b| b.entries.iter().map(|e| e.year).collect())
            .unwrap_or_default();
        years.insert(self.current_year());
        years.into_iter().rev().collect()
    }
}
