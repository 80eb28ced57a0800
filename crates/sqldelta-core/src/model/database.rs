//! Database definitions.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::write_ident;

/// A `CREATE DATABASE` statement.
///
/// The top-level parse loop recognizes and then discards these, but the
/// sub-parser still builds the value so the recognition is testable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Database name, unquoted.
    pub name: String,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
}

impl Database {
    /// Creates a database statement.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            if_not_exists: false,
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE DATABASE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write_ident(f, &self.name)
    }
}
