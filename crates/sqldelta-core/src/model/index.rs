//! Index and foreign-key reference definitions for the schema model.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::write_ident;

/// The role an index plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    PrimaryKey,
    Unique,
    Normal,
    FullText,
    Spatial,
    ForeignKey,
}

/// The physical structure hint (`USING BTREE`/`USING HASH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexType {
    /// No `USING` clause in the source.
    #[default]
    None,
    Btree,
    Hash,
}

impl IndexType {
    /// Returns the SQL spelling, or `None` for the unset state.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Btree => Some("BTREE"),
            Self::Hash => Some("HASH"),
        }
    }
}

/// Sort direction of an index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// No direction in the source.
    #[default]
    None,
    Ascending,
    Descending,
}

/// A column inside an index definition, e.g. `name(10) DESC`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    /// Column name, unquoted.
    pub name: String,
    /// Prefix length, preserved as lexed.
    pub length: Option<String>,
    /// Sort direction.
    pub sort: SortDirection,
}

impl IndexColumn {
    /// Creates an index column with no length or direction.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            sort: SortDirection::None,
        }
    }
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        if let Some(length) = &self.length {
            write!(f, "({length})")?;
        }
        match self.sort {
            SortDirection::None => {}
            SortDirection::Ascending => f.write_str(" ASC")?,
            SortDirection::Descending => f.write_str(" DESC")?,
        }
        Ok(())
    }
}

/// An index option such as `WITH PARSER ngram`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOption {
    /// Option name, e.g. `WITH PARSER`.
    pub name: String,
    /// Option value, as lexed.
    pub value: String,
    /// True when the value is an identifier that emission should quote.
    pub quoted: bool,
}

impl fmt::Display for IndexOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.name)?;
        if self.quoted {
            write_ident(f, &self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// `MATCH` clause of a foreign-key reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceMatch {
    Full,
    Partial,
    Simple,
}

impl ReferenceMatch {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
        }
    }
}

/// Action taken by a foreign key on delete or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceOption {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
}

impl ReferenceOption {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// The `REFERENCES` clause of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table, unquoted.
    pub table_name: String,
    /// Referenced columns, in source order.
    pub columns: Vec<IndexColumn>,
    /// Optional `MATCH` clause.
    pub match_clause: Option<ReferenceMatch>,
    /// Optional `ON DELETE` action.
    pub on_delete: Option<ReferenceOption>,
    /// Optional `ON UPDATE` action.
    pub on_update: Option<ReferenceOption>,
}

impl Reference {
    /// Creates a reference to the given table with no columns yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            match_clause: None,
            on_delete: None,
            on_update: None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("REFERENCES ")?;
        write_ident(f, &self.table_name)?;
        f.write_str(" (")?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{col}")?;
        }
        f.write_str(")")?;
        if let Some(m) = self.match_clause {
            write!(f, " MATCH {}", m.as_str())?;
        }
        if let Some(opt) = self.on_delete {
            write!(f, " ON DELETE {}", opt.as_str())?;
        }
        if let Some(opt) = self.on_update {
            write!(f, " ON UPDATE {}", opt.as_str())?;
        }
        Ok(())
    }
}

/// An index on a table, including primary and foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name, if named.
    pub name: Option<String>,
    /// `CONSTRAINT` symbol, if wrapped.
    pub symbol: Option<String>,
    /// The role of the index.
    pub kind: IndexKind,
    /// Physical structure hint.
    pub index_type: IndexType,
    /// Indexed columns, in source order.
    pub columns: Vec<IndexColumn>,
    /// `REFERENCES` clause (foreign keys only).
    pub reference: Option<Reference>,
    /// Index options, in source order.
    pub options: Vec<IndexOption>,
}

impl Index {
    /// Creates an index of the given kind with no columns yet.
    #[must_use]
    pub const fn new(kind: IndexKind) -> Self {
        Self {
            name: None,
            symbol: None,
            kind,
            index_type: IndexType::None,
            columns: Vec::new(),
            reference: None,
            options: Vec::new(),
        }
    }

    /// Creates a synthetic single-column index, as produced by table
    /// normalization for inline key markers.
    #[must_use]
    pub fn synthetic(kind: IndexKind, name: Option<String>, column: &str) -> Self {
        Self {
            name,
            symbol: None,
            kind,
            index_type: IndexType::None,
            columns: vec![IndexColumn::new(column)],
            reference: None,
            options: Vec::new(),
        }
    }

    /// A stable identity for matching indexes across two versions of a
    /// table: primary keys by role, everything else by name when named,
    /// by column signature otherwise.
    #[must_use]
    pub fn identity(&self) -> String {
        if self.kind == IndexKind::PrimaryKey {
            return String::from("PRIMARY");
        }
        if let Some(name) = &self.name {
            return name.clone();
        }
        let cols: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        cols.join(",")
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = &self.symbol {
            f.write_str("CONSTRAINT ")?;
            write_ident(f, symbol)?;
            f.write_str(" ")?;
        }
        match self.kind {
            IndexKind::PrimaryKey => f.write_str("PRIMARY KEY")?,
            IndexKind::Unique => f.write_str("UNIQUE KEY")?,
            IndexKind::Normal => f.write_str("KEY")?,
            IndexKind::FullText => f.write_str("FULLTEXT KEY")?,
            IndexKind::Spatial => f.write_str("SPATIAL KEY")?,
            IndexKind::ForeignKey => f.write_str("FOREIGN KEY")?,
        }
        if let Some(name) = &self.name {
            f.write_str(" ")?;
            write_ident(f, name)?;
        }
        f.write_str(" (")?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{col}")?;
        }
        f.write_str(")")?;
        if let Some(using) = self.index_type.as_str() {
            write!(f, " USING {using}")?;
        }
        for option in &self.options {
            write!(f, " {option}")?;
        }
        if let Some(reference) = &self.reference {
            write!(f, " {reference}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_display() {
        let mut index = Index::new(IndexKind::PrimaryKey);
        index.columns.push(IndexColumn::new("id"));
        assert_eq!(index.to_string(), "PRIMARY KEY (`id`)");
    }

    #[test]
    fn test_named_unique_with_type() {
        let mut index = Index::new(IndexKind::Unique);
        index.name = Some(String::from("uq_email"));
        index.index_type = IndexType::Btree;
        index.columns.push(IndexColumn::new("email"));
        assert_eq!(
            index.to_string(),
            "UNIQUE KEY `uq_email` (`email`) USING BTREE"
        );
    }

    #[test]
    fn test_index_column_length_and_sort() {
        let mut col = IndexColumn::new("title");
        col.length = Some(String::from("32"));
        col.sort = SortDirection::Descending;
        assert_eq!(col.to_string(), "`title`(32) DESC");
    }

    #[test]
    fn test_foreign_key_display() {
        let mut index = Index::new(IndexKind::ForeignKey);
        index.symbol = Some(String::from("fk_user"));
        index.columns.push(IndexColumn::new("user_id"));
        let mut reference = Reference::new("users");
        reference.columns.push(IndexColumn::new("id"));
        reference.on_delete = Some(ReferenceOption::Cascade);
        reference.on_update = Some(ReferenceOption::Restrict);
        index.reference = Some(reference);
        assert_eq!(
            index.to_string(),
            "CONSTRAINT `fk_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE ON UPDATE RESTRICT"
        );
    }

    #[test]
    fn test_identity() {
        let mut primary = Index::new(IndexKind::PrimaryKey);
        primary.columns.push(IndexColumn::new("id"));
        assert_eq!(primary.identity(), "PRIMARY");

        let mut named = Index::new(IndexKind::Normal);
        named.name = Some(String::from("idx_a"));
        named.columns.push(IndexColumn::new("a"));
        assert_eq!(named.identity(), "idx_a");

        let mut unnamed = Index::new(IndexKind::Normal);
        unnamed.columns.push(IndexColumn::new("a"));
        unnamed.columns.push(IndexColumn::new("b"));
        assert_eq!(unnamed.identity(), "a,b");
    }
}
