//! Entry identifiers
//!
//! Entry ids are millisecond timestamps taken when the entry is created,
//! bumped when needed so that every new id is strictly greater than every
//! id seen before. Sorting by id therefore sorts by creation order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique, creation-ordered identifier of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wrap a raw id value
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw id value
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

/// Hands out monotonically increasing entry ids
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that already exists so it is never handed out again
    pub fn observe(&mut self, id: EntryId) {
        self.last = self.last.max(id.0);
    }

    /// Allocate the next id given the current time in milliseconds
    pub fn next(&mut self, now_millis: i64) -> EntryId {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        EntryId(id)
    }
}
