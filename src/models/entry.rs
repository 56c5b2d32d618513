//! Entry model
//!
//! A single income or expense record. The amount is always a non-negative
//! magnitude; whether it adds to or subtracts from a balance is decided by
//! the entry's [`EntryKind`].

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

use super::ids::EntryId;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Display date format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Income/expense classification of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Parse an entry kind from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    /// +1 for income, -1 for expense
    pub fn sign(&self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense => -1,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Unique, creation-ordered identifier
    pub id: EntryId,

    /// Free-text label, never empty
    pub description: String,

    /// Non-negative magnitude
    pub amount: Money,

    pub kind: EntryKind,

    /// Name of the book this entry belongs to
    pub book_name: String,

    /// Calendar date captured at creation
    pub occurred_on: NaiveDate,

    /// Zero-based month (0 = January) derived from `occurred_on` at creation
    pub month: u32,

    /// Four-digit year derived from `occurred_on` at creation
    pub year: i32,

    /// Date string rendered at creation, used verbatim by exports
    pub display_date: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry, deriving month/year and the display date from `occurred_on`
    pub fn new(
        id: EntryId,
        book_name: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        kind: EntryKind,
        occurred_on: NaiveDate,
        date_format: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: description.into(),
            amount,
            kind,
            book_name: book_name.into(),
            occurred_on,
            month: occurred_on.month0(),
            year: occurred_on.year(),
            display_date: render_date(occurred_on, date_format),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    /// Amount with the sign implied by the kind
    pub fn signed_amount(&self) -> Money {
        Money::from_cents(self.amount.cents().saturating_mul(self.kind.sign()))
    }

    /// Replace the mutable fields of this entry
    pub fn revise(&mut self, description: String, amount: Money, kind: EntryKind) {
        self.description = description;
        self.amount = amount;
        self.kind = kind;
        self.updated_at = Utc::now();
    }

    /// Check a stored entry read back from a provider
    pub fn validate(&self) -> LedgerResult<()> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        check_amount(self.amount)?;
        if self.book_name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.month > 11 {
            return Err(LedgerError::Storage(format!(
                "Entry {} has month {} outside 0-11",
                self.id, self.month
            )));
        }
        Ok(())
    }
}

/// Trim a description and reject it if nothing is left
pub fn normalize_description(description: &str) -> LedgerResult<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::EmptyDescription);
    }
    Ok(description.to_string())
}

/// Reject negative amounts and amounts above [`Money::MAX`]
pub fn check_amount(amount: Money) -> LedgerResult<()> {
    if amount.is_negative() || amount > Money::MAX {
        return Err(LedgerError::InvalidAmount(amount.to_decimal_string()));
    }
    Ok(())
}

/// Check that a strftime format can render a calendar date
///
/// Rejects unknown specifiers such as `%Q` and time-of-day specifiers such
/// as `%H`, both of which make chrono fail while formatting.
pub fn validate_date_format(date_format: &str) -> LedgerResult<()> {
    if date_format.trim().is_empty() {
        return Err(LedgerError::Config("date_format cannot be empty".into()));
    }
    let unknown = StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error));
    let sample = NaiveDate::default();
    let mut rendered = String::new();
    if unknown || write!(rendered, "{}", sample.format(date_format)).is_err() {
        return Err(LedgerError::Config(format!(
            "Invalid date_format: {}",
            date_format
        )));
    }
    Ok(())
}

/// Render a date, falling back to [`DEFAULT_DATE_FORMAT`] if `date_format` fails
fn render_date(date: NaiveDate, date_format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(date_format)).is_err() {
        rendered.clear();
        let _ = write!(rendered, "{}", date.format(DEFAULT_DATE_FORMAT));
    }
    rendered
}

/// Parse a user-supplied entry amount
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse_amount(input).map_err(|e| LedgerError::InvalidAmount(e.to_string()))
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{}",
            self.display_date, self.description, sign, self.amount
        )
    }
}
