//! Token types for the DDL lexer.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Pos;

/// The kind of token.
///
/// Structural kinds come first, followed by every reserved word the parser
/// understands. Reserved words are their own kinds (rather than a nested
/// keyword enum) because the grammar mixes them freely with literal kinds
/// in its follow sets, e.g. a table option value may be `NUMBER` or
/// `DEFAULT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Unknown byte or unterminated literal.
    Illegal,
    /// End of input (synthesized by the parser, never produced by the lexer).
    Eof,
    /// A run of whitespace, collapsed into a single token.
    Space,
    /// Bareword identifier.
    Ident,
    /// `` `quoted` `` identifier.
    BacktickIdent,
    /// `"quoted"` identifier.
    DoubleQuoteIdent,
    /// `'quoted'` string.
    SingleQuoteIdent,
    /// Numeric literal, preserved as spelled.
    Number,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `/`
    Slash,
    /// `*`
    Asterisk,
    /// `-`
    Dash,
    /// `+`
    Plus,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// `=`
    Equal,
    /// `-- …`, `# …`, or `/* … */` comment.
    CommentIdent,

    // Reserved words.
    Action,
    AutoIncrement,
    AvgRowLength,
    BigInt,
    Binary,
    Bit,
    Blob,
    Bool,
    Boolean,
    Btree,
    Cascade,
    Char,
    Character,
    Charset,
    Check,
    Checksum,
    Collate,
    Comment,
    Compact,
    Compressed,
    Connection,
    Constraint,
    Create,
    CurrentTimestamp,
    Data,
    Database,
    Date,
    DateTime,
    Decimal,
    Default,
    DelayKeyWrite,
    Delete,
    Directory,
    Disk,
    Double,
    Drop,
    Dynamic,
    Engine,
    Enum,
    Exists,
    False,
    First,
    Fixed,
    Float,
    Foreign,
    Full,
    FullText,
    Geometry,
    Hash,
    If,
    Index,
    InsertMethod,
    Int,
    Integer,
    Json,
    Key,
    KeyBlockSize,
    Last,
    Like,
    LongBlob,
    LongText,
    Match,
    MaxRows,
    MediumBlob,
    MediumInt,
    MediumText,
    Memory,
    MinRows,
    No,
    Not,
    Null,
    Numeric,
    On,
    PackKeys,
    Partial,
    Parser,
    Password,
    Primary,
    Real,
    Redundant,
    References,
    Restrict,
    RowFormat,
    Set,
    Simple,
    SmallInt,
    Spatial,
    StatsAutoRecalc,
    StatsPersistent,
    StatsSamplePages,
    Storage,
    Table,
    Tablespace,
    Temporary,
    Text,
    Time,
    Timestamp,
    TinyBlob,
    TinyInt,
    TinyText,
    True,
    Union,
    Unique,
    Unsigned,
    Update,
    Use,
    Using,
    VarBinary,
    VarChar,
    Year,
    With,
    ZeroFill,
    Asc,
    Desc,
    Now,
}

impl TokenKind {
    /// Looks up a reserved word (case-insensitive).
    #[must_use]
    pub fn keyword(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ACTION" => Some(Self::Action),
            "AUTO_INCREMENT" => Some(Self::AutoIncrement),
            "AVG_ROW_LENGTH" => Some(Self::AvgRowLength),
            "BIGINT" => Some(Self::BigInt),
            "BINARY" => Some(Self::Binary),
            "BIT" => Some(Self::Bit),
            "BLOB" => Some(Self::Blob),
            "BOOL" => Some(Self::Bool),
            "BOOLEAN" => Some(Self::Boolean),
            "BTREE" => Some(Self::Btree),
            "CASCADE" => Some(Self::Cascade),
            "CHAR" => Some(Self::Char),
            "CHARACTER" => Some(Self::Character),
            "CHARSET" => Some(Self::Charset),
            "CHECK" => Some(Self::Check),
            "CHECKSUM" => Some(Self::Checksum),
            "COLLATE" => Some(Self::Collate),
            "COMMENT" => Some(Self::Comment),
            "COMPACT" => Some(Self::Compact),
            "COMPRESSED" => Some(Self::Compressed),
            "CONNECTION" => Some(Self::Connection),
            "CONSTRAINT" => Some(Self::Constraint),
            "CREATE" => Some(Self::Create),
            "CURRENT_TIMESTAMP" => Some(Self::CurrentTimestamp),
            "DATA" => Some(Self::Data),
            "DATABASE" => Some(Self::Database),
            "DATE" => Some(Self::Date),
            "DATETIME" => Some(Self::DateTime),
            "DECIMAL" => Some(Self::Decimal),
            "DEFAULT" => Some(Self::Default),
            "DELAY_KEY_WRITE" => Some(Self::DelayKeyWrite),
            "DELETE" => Some(Self::Delete),
            "DIRECTORY" => Some(Self::Directory),
            "DISK" => Some(Self::Disk),
            "DOUBLE" => Some(Self::Double),
            "DROP" => Some(Self::Drop),
            "DYNAMIC" => Some(Self::Dynamic),
            "ENGINE" => Some(Self::Engine),
            "ENUM" => Some(Self::Enum),
            "EXISTS" => Some(Self::Exists),
            "FALSE" => Some(Self::False),
            "FIRST" => Some(Self::First),
            "FIXED" => Some(Self::Fixed),
            "FLOAT" => Some(Self::Float),
            "FOREIGN" => Some(Self::Foreign),
            "FULL" => Some(Self::Full),
            "FULLTEXT" => Some(Self::FullText),
            "GEOMETRY" => Some(Self::Geometry),
            "HASH" => Some(Self::Hash),
            "IF" => Some(Self::If),
            "INDEX" => Some(Self::Index),
            "INSERT_METHOD" => Some(Self::InsertMethod),
            "INT" => Some(Self::Int),
            "INTEGER" => Some(Self::Integer),
            "JSON" => Some(Self::Json),
            "KEY" => Some(Self::Key),
            "KEY_BLOCK_SIZE" => Some(Self::KeyBlockSize),
            "LAST" => Some(Self::Last),
            "LIKE" => Some(Self::Like),
            "LONGBLOB" => Some(Self::LongBlob),
            "LONGTEXT" => Some(Self::LongText),
            "MATCH" => Some(Self::Match),
            "MAX_ROWS" => Some(Self::MaxRows),
            "MEDIUMBLOB" => Some(Self::MediumBlob),
            "MEDIUMINT" => Some(Self::MediumInt),
            "MEDIUMTEXT" => Some(Self::MediumText),
            "MEMORY" => Some(Self::Memory),
            "MIN_ROWS" => Some(Self::MinRows),
            "NO" => Some(Self::No),
            "NOT" => Some(Self::Not),
            "NULL" => Some(Self::Null),
            "NUMERIC" => Some(Self::Numeric),
            "ON" => Some(Self::On),
            "PACK_KEYS" => Some(Self::PackKeys),
            "PARTIAL" => Some(Self::Partial),
            "PARSER" => Some(Self::Parser),
            "PASSWORD" => Some(Self::Password),
            "PRIMARY" => Some(Self::Primary),
            "REAL" => Some(Self::Real),
            "REDUNDANT" => Some(Self::Redundant),
            "REFERENCES" => Some(Self::References),
            "RESTRICT" => Some(Self::Restrict),
            "ROW_FORMAT" => Some(Self::RowFormat),
            "SET" => Some(Self::Set),
            "SIMPLE" => Some(Self::Simple),
            "SMALLINT" => Some(Self::SmallInt),
            "SPATIAL" => Some(Self::Spatial),
            "STATS_AUTO_RECALC" => Some(Self::StatsAutoRecalc),
            "STATS_PERSISTENT" => Some(Self::StatsPersistent),
            "STATS_SAMPLE_PAGES" => Some(Self::StatsSamplePages),
            "STORAGE" => Some(Self::Storage),
            "TABLE" => Some(Self::Table),
            "TABLESPACE" => Some(Self::Tablespace),
            "TEMPORARY" => Some(Self::Temporary),
            "TEXT" => Some(Self::Text),
            "TIME" => Some(Self::Time),
            "TIMESTAMP" => Some(Self::Timestamp),
            "TINYBLOB" => Some(Self::TinyBlob),
            "TINYINT" => Some(Self::TinyInt),
            "TINYTEXT" => Some(Self::TinyText),
            "TRUE" => Some(Self::True),
            "UNION" => Some(Self::Union),
            "UNIQUE" => Some(Self::Unique),
            "UNSIGNED" => Some(Self::Unsigned),
            "UPDATE" => Some(Self::Update),
            "USE" => Some(Self::Use),
            "USING" => Some(Self::Using),
            "VARBINARY" => Some(Self::VarBinary),
            "VARCHAR" => Some(Self::VarChar),
            "YEAR" => Some(Self::Year),
            "WITH" => Some(Self::With),
            "ZEROFILL" => Some(Self::ZeroFill),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "NOW" => Some(Self::Now),
            _ => None,
        }
    }

    /// Returns the kind as a diagnostic string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Space => "SPACE",
            Self::Ident => "IDENT",
            Self::BacktickIdent => "BACKTICK_IDENT",
            Self::DoubleQuoteIdent => "DOUBLE_QUOTE_IDENT",
            Self::SingleQuoteIdent => "SINGLE_QUOTE_IDENT",
            Self::Number => "NUMBER",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Comma => "COMMA",
            Self::Semicolon => "SEMICOLON",
            Self::Dot => "DOT",
            Self::Slash => "SLASH",
            Self::Asterisk => "ASTERISK",
            Self::Dash => "DASH",
            Self::Plus => "PLUS",
            Self::SingleQuote => "SINGLE_QUOTE",
            Self::DoubleQuote => "DOUBLE_QUOTE",
            Self::Equal => "EQUAL",
            Self::CommentIdent => "COMMENT_IDENT",
            Self::Action => "ACTION",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::AvgRowLength => "AVG_ROW_LENGTH",
            Self::BigInt => "BIGINT",
            Self::Binary => "BINARY",
            Self::Bit => "BIT",
            Self::Blob => "BLOB",
            Self::Bool => "BOOL",
            Self::Boolean => "BOOLEAN",
            Self::Btree => "BTREE",
            Self::Cascade => "CASCADE",
            Self::Char => "CHAR",
            Self::Character => "CHARACTER",
            Self::Charset => "CHARSET",
            Self::Check => "CHECK",
            Self::Checksum => "CHECKSUM",
            Self::Collate => "COLLATE",
            Self::Comment => "COMMENT",
            Self::Compact => "COMPACT",
            Self::Compressed => "COMPRESSED",
            Self::Connection => "CONNECTION",
            Self::Constraint => "CONSTRAINT",
            Self::Create => "CREATE",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::Data => "DATA",
            Self::Database => "DATABASE",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Decimal => "DECIMAL",
            Self::Default => "DEFAULT",
            Self::DelayKeyWrite => "DELAY_KEY_WRITE",
            Self::Delete => "DELETE",
            Self::Directory => "DIRECTORY",
            Self::Disk => "DISK",
            Self::Double => "DOUBLE",
            Self::Drop => "DROP",
            Self::Dynamic => "DYNAMIC",
            Self::Engine => "ENGINE",
            Self::Enum => "ENUM",
            Self::Exists => "EXISTS",
            Self::False => "FALSE",
            Self::First => "FIRST",
            Self::Fixed => "FIXED",
            Self::Float => "FLOAT",
            Self::Foreign => "FOREIGN",
            Self::Full => "FULL",
            Self::FullText => "FULLTEXT",
            Self::Geometry => "GEOMETRY",
            Self::Hash => "HASH",
            Self::If => "IF",
            Self::Index => "INDEX",
            Self::InsertMethod => "INSERT_METHOD",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::Json => "JSON",
            Self::Key => "KEY",
            Self::KeyBlockSize => "KEY_BLOCK_SIZE",
            Self::Last => "LAST",
            Self::Like => "LIKE",
            Self::LongBlob => "LONGBLOB",
            Self::LongText => "LONGTEXT",
            Self::Match => "MATCH",
            Self::MaxRows => "MAX_ROWS",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::MediumInt => "MEDIUMINT",
            Self::MediumText => "MEDIUMTEXT",
            Self::Memory => "MEMORY",
            Self::MinRows => "MIN_ROWS",
            Self::No => "NO",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::Numeric => "NUMERIC",
            Self::On => "ON",
            Self::PackKeys => "PACK_KEYS",
            Self::Partial => "PARTIAL",
            Self::Parser => "PARSER",
            Self::Password => "PASSWORD",
            Self::Primary => "PRIMARY",
            Self::Real => "REAL",
            Self::Redundant => "REDUNDANT",
            Self::References => "REFERENCES",
            Self::Restrict => "RESTRICT",
            Self::RowFormat => "ROW_FORMAT",
            Self::Set => "SET",
            Self::Simple => "SIMPLE",
            Self::SmallInt => "SMALLINT",
            Self::Spatial => "SPATIAL",
            Self::StatsAutoRecalc => "STATS_AUTO_RECALC",
            Self::StatsPersistent => "STATS_PERSISTENT",
            Self::StatsSamplePages => "STATS_SAMPLE_PAGES",
            Self::Storage => "STORAGE",
            Self::Table => "TABLE",
            Self::Tablespace => "TABLESPACE",
            Self::Temporary => "TEMPORARY",
            Self::Text => "TEXT",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TinyBlob => "TINYBLOB",
            Self::TinyInt => "TINYINT",
            Self::TinyText => "TINYTEXT",
            Self::True => "TRUE",
            Self::Union => "UNION",
            Self::Unique => "UNIQUE",
            Self::Unsigned => "UNSIGNED",
            Self::Update => "UPDATE",
            Self::Use => "USE",
            Self::Using => "USING",
            Self::VarBinary => "VARBINARY",
            Self::VarChar => "VARCHAR",
            Self::Year => "YEAR",
            Self::With => "WITH",
            Self::ZeroFill => "ZEROFILL",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Now => "NOW",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with its unescaped payload and source position.
///
/// For quoted identifiers and strings, `value` is the content with the
/// quoting conventions already unescaped; for everything else it is the
/// literal text as lexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The canonical payload.
    pub value: String,
    /// The location of the first character.
    pub pos: Pos,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, value: String, pos: Pos) -> Self {
        Self { kind, value, pos }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns true if this is an identifier, quoted or bare.
    ///
    /// Only backtick quoting produces an identifier in MySQL DDL; single-
    /// and double-quoted tokens are string values.
    #[must_use]
    pub fn is_ident(&self) -> bool {
        matches!(self.kind, TokenKind::Ident | TokenKind::BacktickIdent)
    }
}
