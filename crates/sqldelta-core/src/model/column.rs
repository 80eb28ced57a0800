//! Column definitions for the schema model.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{write_ident, write_string};

/// MySQL column types accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Bit,
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    Integer,
    BigInt,
    Real,
    Double,
    Float,
    Decimal,
    Numeric,
    Date,
    Time,
    Timestamp,
    DateTime,
    Year,
    Char,
    VarChar,
    Binary,
    VarBinary,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    TinyText,
    Text,
    MediumText,
    LongText,
    Enum,
    Set,
    Bool,
    Boolean,
    Json,
    Geometry,
}

impl ColumnType {
    /// Returns the SQL spelling of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::DateTime => "DATETIME",
            Self::Year => "YEAR",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::TinyBlob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::LongBlob => "LONGBLOB",
            Self::TinyText => "TINYTEXT",
            Self::Text => "TEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::LongText => "LONGTEXT",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Bool => "BOOL",
            Self::Boolean => "BOOLEAN",
            Self::Json => "JSON",
            Self::Geometry => "GEOMETRY",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display length, e.g. the `(10,2)` in `DECIMAL(10,2)`.
///
/// Values are kept as lexed decimal strings rather than integers so the
/// differ compares exactly what the source spelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Length {
    /// The length (`M`).
    pub value: String,
    /// The number of decimals (`D`), if present.
    pub decimals: Option<String>,
}

impl Length {
    /// Creates a length without decimals.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self {
            value,
            decimals: None,
        }
    }

    /// Creates a length with decimals.
    #[must_use]
    pub const fn with_decimals(value: String, decimals: String) -> Self {
        Self {
            value,
            decimals: Some(decimals),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decimals {
            Some(d) => write!(f, "({},{d})", self.value),
            None => write!(f, "({})", self.value),
        }
    }
}

/// Whether a column was declared `NULL`, `NOT NULL`, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NullState {
    /// No nullability clause in the source.
    #[default]
    Unspecified,
    /// Explicit `NULL`.
    Null,
    /// Explicit `NOT NULL`.
    NotNull,
}

/// A column's `DEFAULT` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultValue {
    /// The default, as lexed (uppercased for bare literals like `NULL`).
    pub value: String,
    /// True when the source quoted the value, so emission re-quotes it.
    pub quoted: bool,
}

impl DefaultValue {
    /// Creates a quoted default.
    #[must_use]
    pub const fn quoted(value: String) -> Self {
        Self {
            value,
            quoted: true,
        }
    }

    /// Creates an unquoted default (number, keyword, or expression).
    #[must_use]
    pub const fn bare(value: String) -> Self {
        Self {
            value,
            quoted: false,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write_string(f, &self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unquoted.
    pub name: String,
    /// Column type.
    pub data_type: ColumnType,
    /// Display length / precision.
    pub length: Option<Length>,
    /// `UNSIGNED`.
    pub unsigned: bool,
    /// `ZEROFILL`.
    pub zero_fill: bool,
    /// `BINARY` (char types only).
    pub binary: bool,
    /// `CHARACTER SET …`.
    pub character_set: Option<String>,
    /// `COLLATE …`.
    pub collation: Option<String>,
    /// Nullability clause.
    pub null_state: NullState,
    /// `DEFAULT …`.
    pub default: Option<DefaultValue>,
    /// `ON UPDATE …`, e.g. `CURRENT_TIMESTAMP`.
    pub auto_update: Option<String>,
    /// `AUTO_INCREMENT`.
    pub auto_increment: bool,
    /// Inline `PRIMARY KEY` marker.
    pub primary: bool,
    /// Inline `UNIQUE [KEY]` marker.
    pub unique: bool,
    /// Inline bare `KEY` marker.
    pub key: bool,
    /// `COMMENT '…'`.
    pub comment: Option<String>,
    /// Members of an `ENUM(…)` type, in source order.
    pub enum_values: Vec<String>,
    /// Members of a `SET(…)` type, in source order.
    pub set_values: Vec<String>,
}

impl Column {
    /// Creates a column of the given type with no options set.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            unsigned: false,
            zero_fill: false,
            binary: false,
            character_set: None,
            collation: None,
            null_state: NullState::Unspecified,
            default: None,
            auto_update: None,
            auto_increment: false,
            primary: false,
            unique: false,
            key: false,
            comment: None,
            enum_values: Vec::new(),
            set_values: Vec::new(),
        }
    }

    /// Returns a copy with the inline key markers cleared.
    ///
    /// After normalization the table's index list carries the same
    /// information, so the differ compares columns through this view to
    /// treat `id INT PRIMARY KEY` and `id INT, PRIMARY KEY (id)` as equal.
    #[must_use]
    pub fn without_key_markers(&self) -> Self {
        Self {
            primary: false,
            unique: false,
            key: false,
            ..self.clone()
        }
    }
}

impl fmt::Display for Column {
    /// Renders the column definition the way `SHOW CREATE TABLE` would.
    ///
    /// Inline key markers are not re-emitted; the normalized index list is
    /// authoritative for keys.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        write!(f, " {}", self.data_type)?;
        if let Some(length) = &self.length {
            write!(f, "{length}")?;
        }
        if !self.enum_values.is_empty() || !self.set_values.is_empty() {
            let values = if self.enum_values.is_empty() {
                &self.set_values
            } else {
                &self.enum_values
            };
            f.write_str("(")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_string(f, value)?;
            }
            f.write_str(")")?;
        }
        if self.unsigned {
            f.write_str(" UNSIGNED")?;
        }
        if self.zero_fill {
            f.write_str(" ZEROFILL")?;
        }
        if self.binary {
            f.write_str(" BINARY")?;
        }
        if let Some(cs) = &self.character_set {
            write!(f, " CHARACTER SET ")?;
            write_ident(f, cs)?;
        }
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE ")?;
            write_ident(f, collation)?;
        }
        match self.null_state {
            NullState::Unspecified => {}
            NullState::Null => f.write_str(" NULL")?,
            NullState::NotNull => f.write_str(" NOT NULL")?,
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if let Some(update) = &self.auto_update {
            write!(f, " ON UPDATE {update}")?;
        }
        if self.auto_increment {
            f.write_str(" AUTO_INCREMENT")?;
        }
        if let Some(comment) = &self.comment {
            f.write_str(" COMMENT ")?;
            write_string(f, comment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_int() {
        let col = Column::new("id", ColumnType::Int);
        assert_eq!(col.to_string(), "`id` INT");
    }

    #[test]
    fn test_full_varchar() {
        let mut col = Column::new("email", ColumnType::VarChar);
        col.length = Some(Length::new(String::from("255")));
        col.null_state = NullState::NotNull;
        col.default = Some(DefaultValue::quoted(String::from("none")));
        assert_eq!(
            col.to_string(),
            "`email` VARCHAR(255) NOT NULL DEFAULT 'none'"
        );
    }

    #[test]
    fn test_decimal_length() {
        let mut col = Column::new("price", ColumnType::Decimal);
        col.length = Some(Length::with_decimals(
            String::from("10"),
            String::from("2"),
        ));
        col.unsigned = true;
        assert_eq!(col.to_string(), "`price` DECIMAL(10,2) UNSIGNED");
    }

    #[test]
    fn test_enum_rendering() {
        let mut col = Column::new("state", ColumnType::Enum);
        col.enum_values = vec![String::from("on"), String::from("off")];
        assert_eq!(col.to_string(), "`state` ENUM('on','off')");
    }

    #[test]
    fn test_timestamp_auto_update() {
        let mut col = Column::new("updated_at", ColumnType::Timestamp);
        col.null_state = NullState::NotNull;
        col.default = Some(DefaultValue::bare(String::from("CURRENT_TIMESTAMP")));
        col.auto_update = Some(String::from("CURRENT_TIMESTAMP"));
        assert_eq!(
            col.to_string(),
            "`updated_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_comment_requotes() {
        let mut col = Column::new("note", ColumnType::Text);
        col.comment = Some(String::from("it's fine"));
        assert_eq!(col.to_string(), "`note` TEXT COMMENT 'it''s fine'");
    }

    #[test]
    fn test_key_markers_not_emitted() {
        let mut col = Column::new("id", ColumnType::Int);
        col.primary = true;
        assert_eq!(col.to_string(), "`id` INT");
    }

    #[test]
    fn test_without_key_markers() {
        let mut col = Column::new("id", ColumnType::Int);
        col.primary = true;
        col.unique = true;
        let stripped = col.without_key_markers();
        assert!(!stripped.primary);
        assert!(!stripped.unique);
        assert_eq!(stripped.name, col.name);
    }
}
