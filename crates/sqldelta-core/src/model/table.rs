//! Table definitions and normalization.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{write_ident, write_string, Column, Index, IndexKind};

/// A trailing table option such as `ENGINE=InnoDB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOption {
    /// Canonical option name, e.g. `DEFAULT CHARACTER SET`.
    pub name: String,
    /// Option value, as lexed.
    pub value: String,
    /// True when the source quoted the value.
    pub quoted: bool,
}

impl TableOption {
    /// Creates a table option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, quoted: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quoted,
        }
    }
}

impl fmt::Display for TableOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.name)?;
        if self.quoted {
            write_string(f, &self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, unquoted.
    pub name: String,
    /// `CREATE TEMPORARY TABLE`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Source table of a `CREATE TABLE … LIKE …` statement. When set the
    /// table has no columns, indexes, or options of its own.
    pub like_table: Option<String>,
    /// Columns, in source order.
    pub columns: Vec<Column>,
    /// Indexes, in source order, plus any synthetic entries appended by
    /// [`Table::normalize`].
    pub indexes: Vec<Index>,
    /// Trailing options, in source order.
    pub options: Vec<TableOption>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: false,
            if_not_exists: false,
            like_table: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Normalizes a freshly parsed table.
    ///
    /// The pass is structural only: no value changes, no reordering. The
    /// inline `PRIMARY KEY`/`UNIQUE`/`KEY` markers stay on their columns,
    /// and one synthetic single-column index per marker is appended so the
    /// index list is authoritative for downstream diffing. Synthetic
    /// unique and plain keys are named after their column; a primary key
    /// is unnamed, as in `SHOW CREATE TABLE` output.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.like_table.is_some() {
            return self;
        }
        let mut synthetic = Vec::new();
        for col in &self.columns {
            if col.primary {
                synthetic.push(Index::synthetic(IndexKind::PrimaryKey, None, &col.name));
            }
            if col.unique {
                synthetic.push(Index::synthetic(
                    IndexKind::Unique,
                    Some(col.name.clone()),
                    &col.name,
                ));
            }
            if col.key {
                synthetic.push(Index::synthetic(
                    IndexKind::Normal,
                    Some(col.name.clone()),
                    &col.name,
                ));
            }
        }
        self.indexes.extend(synthetic);
        self
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write_ident(f, &self.name)?;
        if let Some(like) = &self.like_table {
            f.write_str(" LIKE ")?;
            return write_ident(f, like);
        }
        f.write_str(" (\n")?;
        let mut first = true;
        for col in &self.columns {
            if !first {
                f.write_str(",\n")?;
            }
            write!(f, "  {col}")?;
            first = false;
        }
        for index in &self.indexes {
            if !first {
                f.write_str(",\n")?;
            }
            write!(f, "  {index}")?;
            first = false;
        }
        f.write_str("\n)")?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}
