//! Identity scope
//!
//! Book names are unique within a scope: either a specific user id handed
//! over by the identity provider, or the single local device.

use std::fmt;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Data kept for this device only
    #[default]
    Local,
    /// Data owned by an authenticated user
    User(String),
}

impl Scope {
    /// Scope for an optional user id; blank ids fall back to local
    pub fn from_user(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::User(id.to_string()),
            _ => Self::Local,
        }
    }

    /// File-system safe stem naming this scope's data file
    ///
    /// ASCII letters, digits and `-` are kept; every other byte of the id,
    /// `_` included, becomes `_` plus two hex digits, so distinct ids never
    /// share a stem.
    pub fn file_stem(&self) -> String {
        match self {
            Self::Local => "local".to_string(),
            Self::User(id) => {
                let mut stem = String::with_capacity(5 + id.len());
                stem.push_str("user-");
                for byte in id.bytes() {
                    if byte.is_ascii_alphanumeric() || byte == b'-' {
                        stem.push(char::from(byte));
                    } else {
                        let _ = write!(stem, "_{:02x}", byte);
                    }
                }
                stem
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::User(id) => write!(f, "user:{}", id),
        }
    }
}
