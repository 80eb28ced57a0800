//! Top-level statement type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Database, Table};

/// An ordered sequence of parsed statements.
pub type Statements = Vec<Statement>;

/// A parsed DDL statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `CREATE DATABASE`.
    Database(Database),
    /// `CREATE TABLE`.
    Table(Table),
}

impl Statement {
    /// Returns the table if this is a table statement.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Database(_) => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(db) => write!(f, "{db}"),
            Self::Table(table) => write!(f, "{table}"),
        }
    }
}
