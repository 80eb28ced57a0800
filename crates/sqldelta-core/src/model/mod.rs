//! Schema model
//!
//! An immutable-after-construction value tree describing parsed DDL: a
//! list of statements, each a database or table; tables own columns and
//! indexes; indexes may own a foreign-key reference. Every node renders
//! itself back to MySQL DDL via `Display`.

use core::fmt;

mod column;
mod database;
mod index;
mod statement;
mod table;

pub use column::{Column, ColumnType, DefaultValue, Length, NullState};
pub use database::Database;
pub use index::{
    Index, IndexColumn, IndexKind, IndexOption, IndexType, Reference, ReferenceMatch,
    ReferenceOption, SortDirection,
};
pub use statement::{Statement, Statements};
pub use table::{Table, TableOption};

/// Writes an identifier backtick-quoted, doubling embedded backticks.
pub(crate) fn write_ident(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "`{}`", name.replace('`', "``"))
}

/// Writes a string value single-quoted, doubling embedded quotes.
pub(crate) fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ident<'a>(&'a str);
    impl fmt::Display for Ident<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_ident(f, self.0)
        }
    }

    struct Str<'a>(&'a str);
    impl fmt::Display for Str<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_string(f, self.0)
        }
    }

    #[test]
    fn test_write_ident_escapes_backticks() {
        assert_eq!(Ident("plain").to_string(), "`plain`");
        assert_eq!(Ident("we`ird").to_string(), "`we``ird`");
    }

    #[test]
    fn test_write_string_escapes_quotes() {
        assert_eq!(Str("it's").to_string(), "'it''s'");
    }

    #[test]
    fn test_model_snapshot_round_trip() {
        let mut table = Table::new("users");
        let mut id = Column::new("id", ColumnType::BigInt);
        id.unsigned = true;
        id.auto_increment = true;
        id.primary = true;
        table.columns.push(id);
        let table = table.normalize();
        let statement = Statement::Table(table);

        let json = serde_json::to_string(&statement).unwrap();
        let back: Statement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, statement);
    }
}
