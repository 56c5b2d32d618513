//! Filter selection for ledger views
//!
//! A [`FilterSelection`] is the (book, month, year, kind) tuple the user is
//! currently looking at. Month and kind each have an "all" setting; the year
//! is always specific.

use std::fmt;

use super::entry::{Entry, EntryKind};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month part of a filter: every month, or one zero-based month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    /// Zero-based month, 0 = January
    Month(u32),
}

impl MonthFilter {
    /// Build a filter for a zero-based month, `None` if out of range
    pub fn month(month0: u32) -> Option<Self> {
        (month0 < 12).then_some(Self::Month(month0))
    }

    /// Parse "all", a zero-based number "0".."11", or a month name ("jan", "March")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if s == "all" {
            return Some(Self::All);
        }
        if let Ok(n) = s.parse::<u32>() {
            return Self::month(n);
        }
        if s.len() < 3 {
            return None;
        }
        MONTH_NAMES
            .iter()
            .position(|name| name.to_lowercase().starts_with(&s))
            .map(|i| Self::Month(i as u32))
    }

    pub fn admits(&self, month0: u32) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => *m == month0,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All months"),
            Self::Month(m) => write!(f, "{}", MONTH_NAMES[*m as usize % 12]),
        }
    }
}

/// Kind part of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        EntryKind::parse(s).map(Self::from)
    }

    pub fn admits(&self, kind: EntryKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == EntryKind::Income,
            Self::Expense => kind == EntryKind::Expense,
        }
    }
}

impl From<EntryKind> for KindFilter {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// True if the entry falls in the given month/year window
pub fn in_period(entry: &Entry, month: MonthFilter, year: i32) -> bool {
    month.admits(entry.month) && entry.year == year
}

/// The view parameters driving filtered lists and totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub book: String,
    pub month: MonthFilter,
    pub year: i32,
    pub kind: KindFilter,
}

impl FilterSelection {
    /// Whole year of a book, both kinds
    pub fn new(book: impl Into<String>, year: i32) -> Self {
        Self {
            book: book.into(),
            month: MonthFilter::All,
            year,
            kind: KindFilter::All,
        }
    }

    /// Restrict to one month
    pub fn month(mut self, month: MonthFilter) -> Self {
        self.month = month;
        self
    }

    /// Restrict to one kind
    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }
}
