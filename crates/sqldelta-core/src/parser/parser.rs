//! DDL parser implementation.
//!
//! A hand-written recursive-descent parser over the lexer's token vector.
//! The cursor supports a one-step rewind so option loops can peek past
//! their terminators; reading past the end yields a synthesized EOF token.

use tracing::{debug, trace};

use super::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::model::{
    Column, ColumnType, Database, DefaultValue, Index, IndexColumn, IndexKind, IndexOption,
    IndexType, Length, NullState, Reference, ReferenceMatch, ReferenceOption, SortDirection,
    Statement, Statements, Table, TableOption,
};

type Result<T> = core::result::Result<T, ParseError>;

/// Position class of a column option, used to enforce the MySQL-ish
/// ordering constraint with a single monotonic cursor: a length comes
/// before UNSIGNED, UNSIGNED before ZEROFILL, and so on. Everything in
/// the `Free` class shares one position and may appear in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionClass {
    Size,
    DecimalSize,
    DecimalOptionalSize,
    Unsigned,
    ZeroFill,
    Binary,
    CharacterSet,
    Collate,
    EnumValues,
    SetValues,
    /// NULL/NOT NULL, DEFAULT, AUTO_INCREMENT, key markers, COMMENT,
    /// ON UPDATE.
    Free,
}

impl OptionClass {
    const fn bit(self) -> u16 {
        match self {
            Self::Size => 1,
            Self::DecimalSize => 1 << 1,
            Self::DecimalOptionalSize => 1 << 2,
            Self::Unsigned => 1 << 3,
            Self::ZeroFill => 1 << 4,
            Self::Binary => 1 << 5,
            Self::CharacterSet => 1 << 6,
            Self::Collate => 1 << 7,
            Self::EnumValues => 1 << 8,
            Self::SetValues => 1 << 9,
            Self::Free => 1 << 10,
        }
    }

    const fn position(self) -> u8 {
        match self {
            Self::Size | Self::DecimalSize | Self::DecimalOptionalSize => 1,
            Self::Unsigned => 2,
            Self::ZeroFill => 3,
            Self::Binary => 4,
            Self::CharacterSet => 5,
            Self::Collate => 6,
            Self::EnumValues | Self::SetValues => 7,
            Self::Free => 8,
        }
    }
}

/// Which option classes a column type accepts, plus the ordering cursor.
struct OptionTracker {
    allowed: u16,
    pos: u8,
}

impl OptionTracker {
    const fn new(allowed: u16) -> Self {
        Self {
            allowed: allowed | OptionClass::Free.bit(),
            pos: 0,
        }
    }

    /// Returns true and advances the cursor when the class is allowed for
    /// this type and does not move backwards past an already-consumed
    /// position.
    fn check(&mut self, class: OptionClass) -> bool {
        if self.allowed & class.bit() == 0 {
            return false;
        }
        if class.position() < self.pos {
            return false;
        }
        self.pos = class.position();
        true
    }
}

const OPTS_NONE: u16 = 0;
const OPTS_SIZE: u16 = OptionClass::Size.bit();
const OPTS_INT: u16 =
    OptionClass::Size.bit() | OptionClass::Unsigned.bit() | OptionClass::ZeroFill.bit();
const OPTS_FLOAT: u16 =
    OptionClass::DecimalSize.bit() | OptionClass::Unsigned.bit() | OptionClass::ZeroFill.bit();
const OPTS_DECIMAL: u16 = OptionClass::DecimalOptionalSize.bit()
    | OptionClass::Unsigned.bit()
    | OptionClass::ZeroFill.bit();
const OPTS_CHAR: u16 = OptionClass::Size.bit()
    | OptionClass::Binary.bit()
    | OptionClass::CharacterSet.bit()
    | OptionClass::Collate.bit();
const OPTS_ENUM: u16 = OptionClass::EnumValues.bit();
const OPTS_SET: u16 = OptionClass::SetValues.bit();

/// Parses a DDL document into statements.
///
/// Convenience wrapper over [`Parser`].
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; there is no partial
/// recovery.
pub fn parse(input: &str) -> Result<Statements> {
    Parser::new(input).parse()
}

/// DDL parser.
pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
    eof: Token,
}

impl Parser {
    /// Creates a parser for the given input, lexing it eagerly.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }
        let eof = Token::new(TokenKind::Eof, String::new(), lexer.end_pos());
        Self {
            tokens,
            idx: 0,
            eof,
        }
    }

    // --- Cursor ---

    fn peek(&self) -> &Token {
        self.tokens.get(self.idx).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        self.idx += 1;
    }

    fn rewind(&mut self) {
        self.idx = self.idx.saturating_sub(1);
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        self.advance();
        token
    }

    /// Advances across SPACE and COMMENT tokens.
    fn skip_whitespace(&mut self) {
        while matches!(
            self.peek().kind,
            TokenKind::Space | TokenKind::CommentIdent
        ) {
            self.advance();
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        let token = self.next();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::unexpected(&token, expected))
        }
    }

    fn ident(&mut self, expected: &str) -> Result<Token> {
        let token = self.next();
        if !token.is_ident() {
            return Err(ParseError::unexpected(&token, expected));
        }
        if token.value.is_empty() {
            return Err(ParseError::structural(&token, "empty identifier"));
        }
        Ok(token)
    }

    /// Consumes tokens up to and including the next `;`, or up to EOF.
    fn skip_statement(&mut self) {
        loop {
            match self.peek().kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Eof => return,
                _ => self.advance(),
            }
        }
    }

    /// Consumes an end-of-statement marker. Returns false when the next
    /// significant token is neither `;` nor EOF.
    fn eol(&mut self) -> bool {
        self.skip_whitespace();
        match self.peek().kind {
            TokenKind::Semicolon => {
                self.advance();
                true
            }
            TokenKind::Eof => true,
            _ => false,
        }
    }

    // --- Statements ---

    /// Parses the whole input.
    ///
    /// `DROP`, `SET`, and `USE` statements are consumed and discarded, as
    /// is `CREATE DATABASE`; only tables appear in the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse(mut self) -> Result<Statements> {
        let mut statements = Statements::new();
        loop {
            self.skip_whitespace();
            let kind = self.peek().kind;
            match kind {
                TokenKind::Create => {
                    if let Some(statement) = self.parse_create()? {
                        statements.push(statement);
                    }
                }
                TokenKind::CommentIdent => self.advance(),
                TokenKind::Drop | TokenKind::Set | TokenKind::Use => {
                    trace!(statement = %kind, "skipping ignored statement");
                    self.skip_statement();
                }
                TokenKind::Semicolon => self.advance(),
                TokenKind::Eof => break,
                _ => {
                    let token = self.next();
                    return Err(ParseError::unexpected(
                        &token,
                        "CREATE, COMMENT_IDENT, SEMICOLON or EOF",
                    ));
                }
            }
        }
        Ok(statements)
    }

    /// Parses a `CREATE …` statement. Returns `None` for statement kinds
    /// that are recognized but deliberately discarded (`CREATE DATABASE`).
    fn parse_create(&mut self) -> Result<Option<Statement>> {
        self.expect(TokenKind::Create, "CREATE")?;
        self.skip_whitespace();
        match self.peek().kind {
            TokenKind::Database => {
                let database = self.parse_create_database()?;
                debug!(name = %database.name, "discarding CREATE DATABASE statement");
                Ok(None)
            }
            TokenKind::Table | TokenKind::Temporary => {
                let table = self.parse_create_table()?;
                trace!(
                    name = %table.name,
                    columns = table.columns.len(),
                    indexes = table.indexes.len(),
                    "parsed table"
                );
                Ok(Some(Statement::Table(table)))
            }
            _ => {
                let token = self.next();
                Err(ParseError::unexpected(&token, "DATABASE or TABLE"))
            }
        }
    }

    /// Parses `DATABASE [IF NOT EXISTS] <name>`. Trailing charset and
    /// collation clauses are tolerated by skipping to the end of the
    /// statement.
    fn parse_create_database(&mut self) -> Result<Database> {
        self.expect(TokenKind::Database, "DATABASE")?;
        self.skip_whitespace();
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.ident("IDENT or BACKTICK_IDENT")?;
        let mut database = Database::new(name.value);
        database.if_not_exists = if_not_exists;
        self.skip_statement();
        Ok(database)
    }

    /// Parses `[TEMPORARY] TABLE [IF NOT EXISTS] <name> …`.
    fn parse_create_table(&mut self) -> Result<Table> {
        let mut temporary = false;
        if self.peek().kind == TokenKind::Temporary {
            self.advance();
            self.skip_whitespace();
            temporary = true;
        }
        self.expect(TokenKind::Table, "TABLE")?;
        self.skip_whitespace();
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.ident("IDENT or BACKTICK_IDENT")?;
        let mut table = Table::new(name.value);
        table.temporary = temporary;
        table.if_not_exists = if_not_exists;

        self.skip_whitespace();
        match self.peek().kind {
            TokenKind::Like => {
                self.advance();
                self.skip_whitespace();
                let like = self.ident("table name after LIKE")?;
                table.like_table = Some(like.value);
                self.skip_whitespace();
                if self.peek().kind == TokenKind::Semicolon {
                    self.advance();
                }
                return Ok(table);
            }
            // A redundant second IF NOT EXISTS is tolerated.
            TokenKind::If => {
                self.parse_if_not_exists()?;
                table.if_not_exists = true;
            }
            _ => {}
        }

        self.expect(TokenKind::LParen, "LPAREN")?;
        self.parse_create_table_fields(&mut table)?;
        Ok(table.normalize())
    }

    /// Parses `IF NOT EXISTS` if present, leaving the cursor at the next
    /// significant token.
    fn parse_if_not_exists(&mut self) -> Result<bool> {
        if self.peek().kind != TokenKind::If {
            return Ok(false);
        }
        self.advance();
        self.skip_whitespace();
        self.expect(TokenKind::Not, "NOT")?;
        self.skip_whitespace();
        self.expect(TokenKind::Exists, "EXISTS")?;
        self.skip_whitespace();
        Ok(true)
    }

    /// Parses everything after the opening `(` of a CREATE TABLE body,
    /// including the trailing table options and statement terminator.
    fn parse_create_table_fields(&mut self, table: &mut Table) -> Result<()> {
        loop {
            self.skip_whitespace();
            match self.peek().kind {
                TokenKind::Constraint => self.parse_table_constraint(table)?,
                TokenKind::Primary => {
                    let mut index = Index::new(IndexKind::PrimaryKey);
                    self.parse_index_primary(&mut index)?;
                    table.indexes.push(index);
                }
                TokenKind::Unique => {
                    let mut index = Index::new(IndexKind::Unique);
                    self.parse_index_unique(&mut index)?;
                    table.indexes.push(index);
                }
                TokenKind::Key | TokenKind::Index => {
                    let mut index = Index::new(IndexKind::Normal);
                    self.parse_index_normal(&mut index)?;
                    table.indexes.push(index);
                }
                TokenKind::FullText => {
                    let mut index = Index::new(IndexKind::FullText);
                    self.parse_index_fulltext(&mut index)?;
                    table.indexes.push(index);
                }
                TokenKind::Spatial => {
                    let mut index = Index::new(IndexKind::Spatial);
                    self.parse_index_spatial(&mut index)?;
                    table.indexes.push(index);
                }
                TokenKind::Foreign => {
                    let mut index = Index::new(IndexKind::ForeignKey);
                    self.parse_index_foreign(&mut index)?;
                    table.indexes.push(index);
                }
                TokenKind::Check => {
                    let token = self.next();
                    return Err(ParseError::unsupported(&token, "CHECK"));
                }
                TokenKind::Ident | TokenKind::BacktickIdent => {
                    self.parse_table_column(table)?;
                }
                _ => {
                    let token = self.next();
                    return Err(ParseError::unexpected(
                        &token,
                        "a column or index definition",
                    ));
                }
            }

            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::RParen => {
                    self.parse_create_table_options(table)?;
                    if !self.eol() {
                        let token = self.next();
                        return Err(ParseError::unexpected(&token, "end of statement"));
                    }
                    return Ok(());
                }
                TokenKind::Comma => {}
                _ => return Err(ParseError::unexpected(&token, "RPAREN or COMMA")),
            }
        }
    }

    // --- Columns ---

    fn parse_table_column(&mut self, table: &mut Table) -> Result<()> {
        let name = self.ident("IDENT or BACKTICK_IDENT")?;
        let column = self.parse_column_spec(name.value)?;
        table.columns.push(column);
        Ok(())
    }

    /// Stage A of column parsing: the type token selects the model type
    /// and the set of option classes it accepts.
    fn parse_column_spec(&mut self, name: String) -> Result<Column> {
        self.skip_whitespace();
        let token = self.next();
        let (data_type, allowed) = match token.kind {
            TokenKind::Bit => (ColumnType::Bit, OPTS_SIZE),
            TokenKind::TinyInt => (ColumnType::TinyInt, OPTS_INT),
            TokenKind::SmallInt => (ColumnType::SmallInt, OPTS_INT),
            TokenKind::MediumInt => (ColumnType::MediumInt, OPTS_INT),
            TokenKind::Int => (ColumnType::Int, OPTS_INT),
            TokenKind::Integer => (ColumnType::Integer, OPTS_INT),
            TokenKind::BigInt => (ColumnType::BigInt, OPTS_INT),
            TokenKind::Real => (ColumnType::Real, OPTS_FLOAT),
            TokenKind::Double => (ColumnType::Double, OPTS_FLOAT),
            TokenKind::Float => (ColumnType::Float, OPTS_FLOAT),
            TokenKind::Decimal => (ColumnType::Decimal, OPTS_DECIMAL),
            TokenKind::Numeric => (ColumnType::Numeric, OPTS_DECIMAL),
            TokenKind::Date => (ColumnType::Date, OPTS_NONE),
            TokenKind::Time => (ColumnType::Time, OPTS_SIZE),
            TokenKind::Timestamp => (ColumnType::Timestamp, OPTS_SIZE),
            TokenKind::DateTime => (ColumnType::DateTime, OPTS_SIZE),
            TokenKind::Year => (ColumnType::Year, OPTS_NONE),
            TokenKind::Char => (ColumnType::Char, OPTS_CHAR),
            TokenKind::VarChar => (ColumnType::VarChar, OPTS_CHAR),
            TokenKind::Binary => (ColumnType::Binary, OPTS_SIZE),
            TokenKind::VarBinary => (ColumnType::VarBinary, OPTS_SIZE),
            TokenKind::TinyBlob => (ColumnType::TinyBlob, OPTS_NONE),
            TokenKind::Blob => (ColumnType::Blob, OPTS_NONE),
            TokenKind::MediumBlob => (ColumnType::MediumBlob, OPTS_NONE),
            TokenKind::LongBlob => (ColumnType::LongBlob, OPTS_NONE),
            TokenKind::TinyText => (ColumnType::TinyText, OPTS_CHAR),
            TokenKind::Text => (ColumnType::Text, OPTS_CHAR),
            TokenKind::MediumText => (ColumnType::MediumText, OPTS_CHAR),
            TokenKind::LongText => (ColumnType::LongText, OPTS_CHAR),
            TokenKind::Enum => (ColumnType::Enum, OPTS_ENUM),
            TokenKind::Set => (ColumnType::Set, OPTS_SET),
            TokenKind::Boolean => (ColumnType::Boolean, OPTS_NONE),
            TokenKind::Bool => (ColumnType::Bool, OPTS_NONE),
            TokenKind::Json => (ColumnType::Json, OPTS_NONE),
            TokenKind::Geometry => (ColumnType::Geometry, OPTS_NONE),
            _ => return Err(ParseError::unexpected(&token, "a column type")),
        };
        let mut column = Column::new(name, data_type);
        self.parse_column_options(&mut column, allowed)?;
        if data_type == ColumnType::Enum && column.enum_values.is_empty() {
            return Err(ParseError::structural(&token, "ENUM requires a value list"));
        }
        if data_type == ColumnType::Set && column.set_values.is_empty() {
            return Err(ParseError::structural(&token, "SET requires a value list"));
        }
        Ok(column)
    }

    /// Stage B of column parsing: consumes options until the terminating
    /// `,` or `)`, enforcing the per-type mask and position ordering.
    #[allow(clippy::too_many_lines)]
    fn parse_column_options(&mut self, column: &mut Column, allowed: u16) -> Result<()> {
        let mut tracker = OptionTracker::new(allowed);
        loop {
            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::LParen => {
                    if tracker.check(OptionClass::Size) {
                        self.skip_whitespace();
                        let size = self.expect(TokenKind::Number, "NUMBER (column size)")?;
                        self.skip_whitespace();
                        self.expect(TokenKind::RParen, "RPAREN (column size)")?;
                        column.length = Some(Length::new(size.value));
                    } else if tracker.check(OptionClass::DecimalSize) {
                        self.skip_whitespace();
                        let m = self.expect(TokenKind::Number, "NUMBER (decimal size `M`)")?;
                        self.skip_whitespace();
                        self.expect(TokenKind::Comma, "COMMA (decimal size)")?;
                        self.skip_whitespace();
                        let d = self.expect(TokenKind::Number, "NUMBER (decimal size `D`)")?;
                        self.skip_whitespace();
                        self.expect(TokenKind::RParen, "RPAREN (decimal size)")?;
                        column.length = Some(Length::with_decimals(m.value, d.value));
                    } else if tracker.check(OptionClass::DecimalOptionalSize) {
                        self.skip_whitespace();
                        let m = self.expect(TokenKind::Number, "NUMBER (decimal size `M`)")?;
                        self.skip_whitespace();
                        let sep = self.next();
                        match sep.kind {
                            TokenKind::RParen => {
                                column.length = Some(Length::new(m.value));
                            }
                            TokenKind::Comma => {
                                self.skip_whitespace();
                                let d =
                                    self.expect(TokenKind::Number, "NUMBER (decimal size `D`)")?;
                                self.skip_whitespace();
                                self.expect(TokenKind::RParen, "RPAREN (decimal size)")?;
                                column.length = Some(Length::with_decimals(m.value, d.value));
                            }
                            _ => {
                                return Err(ParseError::unexpected(
                                    &sep,
                                    "COMMA or RPAREN (decimal size)",
                                ))
                            }
                        }
                    } else if tracker.check(OptionClass::EnumValues) {
                        column.enum_values = self.parse_value_list()?;
                    } else if tracker.check(OptionClass::SetValues) {
                        column.set_values = self.parse_value_list()?;
                    } else {
                        return Err(ParseError::structural(
                            &token,
                            "cannot apply a length or value list here",
                        ));
                    }
                }
                TokenKind::Character => {
                    if !tracker.check(OptionClass::CharacterSet) {
                        return Err(ParseError::structural(&token, "cannot apply CHARACTER SET"));
                    }
                    self.skip_whitespace();
                    self.expect(TokenKind::Set, "SET")?;
                    self.skip_whitespace();
                    let value = self.ident("IDENT or BACKTICK_IDENT")?;
                    column.character_set = Some(value.value);
                }
                TokenKind::Collate => {
                    if !tracker.check(OptionClass::Collate) {
                        return Err(ParseError::structural(&token, "cannot apply COLLATE"));
                    }
                    self.skip_whitespace();
                    let value = self.ident("IDENT or BACKTICK_IDENT")?;
                    column.collation = Some(value.value);
                }
                TokenKind::Unsigned => {
                    if !tracker.check(OptionClass::Unsigned) {
                        return Err(ParseError::structural(&token, "cannot apply UNSIGNED"));
                    }
                    column.unsigned = true;
                }
                TokenKind::ZeroFill => {
                    if !tracker.check(OptionClass::ZeroFill) {
                        return Err(ParseError::structural(&token, "cannot apply ZEROFILL"));
                    }
                    column.zero_fill = true;
                }
                TokenKind::Binary => {
                    if !tracker.check(OptionClass::Binary) {
                        return Err(ParseError::structural(&token, "cannot apply BINARY"));
                    }
                    column.binary = true;
                }
                TokenKind::Not => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply NOT NULL"));
                    }
                    self.skip_whitespace();
                    self.expect(TokenKind::Null, "NULL")?;
                    column.null_state = NullState::NotNull;
                }
                TokenKind::Null => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply NULL"));
                    }
                    column.null_state = NullState::Null;
                }
                TokenKind::On => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply ON UPDATE"));
                    }
                    // only ON UPDATE is valid in a column definition
                    self.skip_whitespace();
                    self.expect(TokenKind::Update, "UPDATE")?;
                    self.skip_whitespace();
                    let value = self.next();
                    column.auto_update = Some(value.value);
                }
                TokenKind::Default => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply DEFAULT"));
                    }
                    self.skip_whitespace();
                    let value = self.next();
                    match value.kind {
                        TokenKind::Ident
                        | TokenKind::SingleQuoteIdent
                        | TokenKind::DoubleQuoteIdent => {
                            column.default = Some(DefaultValue::quoted(value.value));
                        }
                        TokenKind::Number
                        | TokenKind::CurrentTimestamp
                        | TokenKind::Null
                        | TokenKind::True
                        | TokenKind::False => {
                            column.default =
                                Some(DefaultValue::bare(value.value.to_uppercase()));
                        }
                        TokenKind::Now => {
                            self.skip_whitespace();
                            self.expect(TokenKind::LParen, "LPAREN")?;
                            self.skip_whitespace();
                            self.expect(TokenKind::RParen, "RPAREN")?;
                            column.default = Some(DefaultValue::bare(format!(
                                "{}()",
                                value.value.to_uppercase()
                            )));
                        }
                        _ => {
                            return Err(ParseError::unexpected(
                                &value,
                                "IDENT, SINGLE_QUOTE_IDENT, DOUBLE_QUOTE_IDENT, NUMBER, CURRENT_TIMESTAMP or NULL",
                            ))
                        }
                    }
                }
                TokenKind::AutoIncrement => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply AUTO_INCREMENT"));
                    }
                    column.auto_increment = true;
                }
                TokenKind::Unique => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply UNIQUE KEY"));
                    }
                    self.skip_whitespace();
                    if self.peek().kind == TokenKind::Key {
                        self.advance();
                    }
                    column.unique = true;
                }
                TokenKind::Key => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply KEY"));
                    }
                    column.key = true;
                }
                TokenKind::Primary => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply PRIMARY KEY"));
                    }
                    self.skip_whitespace();
                    self.expect(TokenKind::Key, "KEY")?;
                    column.primary = true;
                }
                TokenKind::Comment => {
                    if !tracker.check(OptionClass::Free) {
                        return Err(ParseError::structural(&token, "cannot apply COMMENT"));
                    }
                    self.skip_whitespace();
                    let value = self.next();
                    if value.kind != TokenKind::SingleQuoteIdent {
                        return Err(ParseError::unexpected(&value, "SINGLE_QUOTE_IDENT"));
                    }
                    column.comment = Some(value.value);
                }
                TokenKind::Comma | TokenKind::RParen => {
                    self.rewind();
                    return Ok(());
                }
                _ => {
                    return Err(ParseError::unexpected(
                        &token,
                        "a column option, COMMA or RPAREN",
                    ))
                }
            }
        }
    }

    /// Parses the quoted values of an `ENUM(…)` or `SET(…)` list,
    /// consuming the closing `)`.
    fn parse_value_list(&mut self) -> Result<Vec<String>> {
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::SingleQuoteIdent | TokenKind::DoubleQuoteIdent => {
                    values.push(token.value);
                }
                _ => {
                    return Err(ParseError::unexpected(
                        &token,
                        "SINGLE_QUOTE_IDENT or DOUBLE_QUOTE_IDENT",
                    ))
                }
            }
            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => return Ok(values),
                _ => return Err(ParseError::unexpected(&token, "COMMA or RPAREN")),
            }
        }
    }

    // --- Indexes ---

    fn parse_table_constraint(&mut self, table: &mut Table) -> Result<()> {
        self.expect(TokenKind::Constraint, "CONSTRAINT")?;
        self.skip_whitespace();
        let mut symbol = None;
        if self.peek().is_ident() {
            symbol = Some(self.next().value);
            self.skip_whitespace();
        }
        let mut index = match self.peek().kind {
            TokenKind::Primary => {
                let mut index = Index::new(IndexKind::PrimaryKey);
                self.parse_index_primary(&mut index)?;
                index
            }
            TokenKind::Unique => {
                let mut index = Index::new(IndexKind::Unique);
                self.parse_index_unique(&mut index)?;
                index
            }
            TokenKind::Foreign => {
                let mut index = Index::new(IndexKind::ForeignKey);
                self.parse_index_foreign(&mut index)?;
                index
            }
            _ => {
                let token = self.next();
                return Err(ParseError::unexpected(
                    &token,
                    "PRIMARY KEY, UNIQUE or FOREIGN KEY",
                ));
            }
        };
        index.symbol = symbol;
        table.indexes.push(index);
        Ok(())
    }

    fn parse_index_primary(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        self.expect(TokenKind::Primary, "PRIMARY")?;
        self.skip_whitespace();
        self.expect(TokenKind::Key, "KEY")?;
        self.parse_index_common(index)
    }

    fn parse_index_unique(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        self.expect(TokenKind::Unique, "UNIQUE")?;
        self.skip_whitespace();
        if matches!(self.peek().kind, TokenKind::Key | TokenKind::Index) {
            self.advance();
        }
        self.parse_index_common(index)
    }

    fn parse_index_normal(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        let token = self.next();
        if !matches!(token.kind, TokenKind::Key | TokenKind::Index) {
            return Err(ParseError::unexpected(&token, "KEY or INDEX"));
        }
        self.parse_index_common(index)
    }

    /// Shared tail of PRIMARY/UNIQUE/KEY parsing: optional name, optional
    /// `USING` (accepted before or after the column list), columns.
    fn parse_index_common(&mut self, index: &mut Index) -> Result<()> {
        self.parse_index_name(index);
        self.parse_index_using(index)?;
        let columns = self.parse_index_columns()?;
        index.columns.extend(columns);
        self.parse_index_using(index)?;
        Ok(())
    }

    fn parse_index_name(&mut self, index: &mut Index) {
        self.skip_whitespace();
        if self.peek().is_ident() {
            index.name = Some(self.next().value);
        }
    }

    /// Parses `USING BTREE|HASH` if present. Declaring the type twice is
    /// an error.
    fn parse_index_using(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        if self.peek().kind != TokenKind::Using {
            return Ok(());
        }
        let using = self.next();
        if let Some(existing) = index.index_type.as_str() {
            return Err(ParseError::structural(
                &using,
                format!("index type already declared ({existing})"),
            ));
        }
        self.skip_whitespace();
        let token = self.next();
        index.index_type = match token.kind {
            TokenKind::Btree => IndexType::Btree,
            TokenKind::Hash => IndexType::Hash,
            _ => return Err(ParseError::unexpected(&token, "BTREE or HASH")),
        };
        Ok(())
    }

    /// Parses `( col [( NUMBER )] [ASC|DESC], … )`.
    fn parse_index_columns(&mut self) -> Result<Vec<IndexColumn>> {
        self.skip_whitespace();
        self.expect(TokenKind::LParen, "LPAREN")?;
        let mut columns = Vec::new();
        loop {
            self.skip_whitespace();
            let token = self.ident("IDENT or BACKTICK_IDENT")?;
            let mut column = IndexColumn::new(token.value);

            self.skip_whitespace();
            if self.peek().kind == TokenKind::LParen {
                self.advance();
                self.skip_whitespace();
                let length = self.expect(TokenKind::Number, "NUMBER (prefix length)")?;
                self.skip_whitespace();
                self.expect(TokenKind::RParen, "RPAREN")?;
                column.length = Some(length.value);
            }

            self.skip_whitespace();
            match self.peek().kind {
                TokenKind::Asc => {
                    self.advance();
                    column.sort = SortDirection::Ascending;
                }
                TokenKind::Desc => {
                    self.advance();
                    column.sort = SortDirection::Descending;
                }
                _ => {}
            }
            columns.push(column);

            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => return Ok(columns),
                _ => return Err(ParseError::unexpected(&token, "COMMA or RPAREN")),
            }
        }
    }

    fn parse_index_fulltext(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        self.expect(TokenKind::FullText, "FULLTEXT")?;
        self.skip_whitespace();
        if matches!(self.peek().kind, TokenKind::Index | TokenKind::Key) {
            self.advance();
        }
        self.parse_index_name(index);
        let columns = self.parse_index_columns()?;
        index.columns.extend(columns);
        self.parse_index_options(index)
    }

    fn parse_index_spatial(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        self.expect(TokenKind::Spatial, "SPATIAL")?;
        self.skip_whitespace();
        if self.peek().kind == TokenKind::Index {
            self.advance();
        }
        self.parse_index_name(index);
        let columns = self.parse_index_columns()?;
        index.columns.extend(columns);
        Ok(())
    }

    /// Parses trailing index options. `WITH PARSER <ident>` is the only
    /// recognized option; anything else is left for the caller.
    fn parse_index_options(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        if self.peek().kind != TokenKind::With {
            return Ok(());
        }
        self.advance();
        self.skip_whitespace();
        self.expect(TokenKind::Parser, "PARSER")?;
        self.skip_whitespace();
        let value = self.ident("IDENT or BACKTICK_IDENT")?;
        index.options.push(IndexOption {
            name: String::from("WITH PARSER"),
            value: value.value,
            quoted: true,
        });
        Ok(())
    }

    fn parse_index_foreign(&mut self, index: &mut Index) -> Result<()> {
        self.skip_whitespace();
        self.expect(TokenKind::Foreign, "FOREIGN")?;
        self.skip_whitespace();
        self.expect(TokenKind::Key, "KEY")?;
        self.parse_index_name(index);
        let columns = self.parse_index_columns()?;
        index.columns.extend(columns);
        self.skip_whitespace();
        if self.peek().kind == TokenKind::References {
            self.parse_reference(index)?;
        }
        Ok(())
    }

    /// Parses `REFERENCES <table> ( col, … ) [MATCH …] [ON DELETE …]
    /// [ON UPDATE …]`. `ON DELETE` may be followed by `ON UPDATE`, but
    /// `ON UPDATE` ends the clause.
    fn parse_reference(&mut self, index: &mut Index) -> Result<()> {
        self.expect(TokenKind::References, "REFERENCES")?;
        self.skip_whitespace();
        let name = self.ident("IDENT or BACKTICK_IDENT")?;
        let mut reference = Reference::new(name.value);
        reference.columns = self.parse_index_columns()?;

        self.skip_whitespace();
        if self.peek().kind == TokenKind::Match {
            self.advance();
            self.skip_whitespace();
            let token = self.next();
            reference.match_clause = Some(match token.kind {
                TokenKind::Full => ReferenceMatch::Full,
                TokenKind::Partial => ReferenceMatch::Partial,
                TokenKind::Simple => ReferenceMatch::Simple,
                _ => return Err(ParseError::unexpected(&token, "FULL, PARTIAL or SIMPLE")),
            });
        }

        for _ in 0..2 {
            self.skip_whitespace();
            if self.peek().kind != TokenKind::On {
                break;
            }
            self.advance();
            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::Delete => {
                    reference.on_delete = Some(self.parse_reference_option()?);
                }
                TokenKind::Update => {
                    reference.on_update = Some(self.parse_reference_option()?);
                    break;
                }
                _ => return Err(ParseError::unexpected(&token, "DELETE or UPDATE")),
            }
        }

        index.reference = Some(reference);
        Ok(())
    }

    fn parse_reference_option(&mut self) -> Result<ReferenceOption> {
        self.skip_whitespace();
        let token = self.next();
        match token.kind {
            TokenKind::Restrict => Ok(ReferenceOption::Restrict),
            TokenKind::Cascade => Ok(ReferenceOption::Cascade),
            TokenKind::Set => {
                self.skip_whitespace();
                self.expect(TokenKind::Null, "NULL")?;
                Ok(ReferenceOption::SetNull)
            }
            TokenKind::No => {
                self.skip_whitespace();
                self.expect(TokenKind::Action, "ACTION")?;
                Ok(ReferenceOption::NoAction)
            }
            _ => Err(ParseError::unexpected(
                &token,
                "RESTRICT, CASCADE, SET or NO",
            )),
        }
    }

    // --- Table options ---

    /// Parses the option list after the closing `)` of the table body.
    #[allow(clippy::too_many_lines)]
    fn parse_create_table_options(&mut self, table: &mut Table) -> Result<()> {
        self.skip_whitespace();
        if matches!(self.peek().kind, TokenKind::Eof | TokenKind::Semicolon) {
            return Ok(());
        }

        loop {
            self.skip_whitespace();
            let token = self.next();
            match token.kind {
                TokenKind::Engine => self.parse_table_option_value(
                    table,
                    "ENGINE",
                    &[TokenKind::Ident, TokenKind::BacktickIdent],
                )?,
                TokenKind::AutoIncrement => self.parse_table_option_value(
                    table,
                    "AUTO_INCREMENT",
                    &[TokenKind::Number],
                )?,
                TokenKind::AvgRowLength => self.parse_table_option_value(
                    table,
                    "AVG_ROW_LENGTH",
                    &[TokenKind::Number],
                )?,
                TokenKind::Default => {
                    self.skip_whitespace();
                    let selector = self.next();
                    let name = match selector.kind {
                        TokenKind::Charset => "DEFAULT CHARACTER SET",
                        TokenKind::Character => {
                            self.skip_whitespace();
                            self.expect(TokenKind::Set, "SET")?;
                            "DEFAULT CHARACTER SET"
                        }
                        TokenKind::Collate => "DEFAULT COLLATE",
                        _ => {
                            return Err(ParseError::unexpected(
                                &selector,
                                "CHARSET, CHARACTER or COLLATE",
                            ))
                        }
                    };
                    self.parse_table_option_value(
                        table,
                        name,
                        &[TokenKind::Ident, TokenKind::BacktickIdent],
                    )?;
                }
                TokenKind::Character => {
                    self.skip_whitespace();
                    self.expect(TokenKind::Set, "SET")?;
                    self.parse_table_option_value(
                        table,
                        "DEFAULT CHARACTER SET",
                        &[TokenKind::Ident, TokenKind::BacktickIdent],
                    )?;
                }
                TokenKind::Collate => self.parse_table_option_value(
                    table,
                    "DEFAULT COLLATE",
                    &[TokenKind::Ident, TokenKind::BacktickIdent],
                )?,
                TokenKind::Checksum => {
                    self.parse_table_option_value(table, "CHECKSUM", &[TokenKind::Number])?;
                }
                TokenKind::Comment => self.parse_table_option_value(
                    table,
                    "COMMENT",
                    &[TokenKind::SingleQuoteIdent, TokenKind::DoubleQuoteIdent],
                )?,
                TokenKind::Connection => self.parse_table_option_value(
                    table,
                    "CONNECTION",
                    &[TokenKind::SingleQuoteIdent, TokenKind::DoubleQuoteIdent],
                )?,
                TokenKind::Data => {
                    self.skip_whitespace();
                    self.expect(TokenKind::Directory, "DIRECTORY")?;
                    self.parse_table_option_value(
                        table,
                        "DATA DIRECTORY",
                        &[TokenKind::SingleQuoteIdent, TokenKind::DoubleQuoteIdent],
                    )?;
                }
                TokenKind::DelayKeyWrite => self.parse_table_option_value(
                    table,
                    "DELAY_KEY_WRITE",
                    &[TokenKind::Number],
                )?,
                TokenKind::Index => {
                    self.skip_whitespace();
                    self.expect(TokenKind::Directory, "DIRECTORY")?;
                    self.parse_table_option_value(
                        table,
                        "INDEX DIRECTORY",
                        &[TokenKind::SingleQuoteIdent, TokenKind::DoubleQuoteIdent],
                    )?;
                }
                TokenKind::InsertMethod => {
                    self.parse_table_option_value(table, "INSERT_METHOD", &[TokenKind::Ident])?;
                }
                TokenKind::KeyBlockSize => self.parse_table_option_value(
                    table,
                    "KEY_BLOCK_SIZE",
                    &[TokenKind::Number],
                )?,
                TokenKind::MaxRows => {
                    self.parse_table_option_value(table, "MAX_ROWS", &[TokenKind::Number])?;
                }
                TokenKind::MinRows => {
                    self.parse_table_option_value(table, "MIN_ROWS", &[TokenKind::Number])?;
                }
                TokenKind::PackKeys => self.parse_table_option_value(
                    table,
                    "PACK_KEYS",
                    &[TokenKind::Number, TokenKind::Ident],
                )?,
                TokenKind::Password => self.parse_table_option_value(
                    table,
                    "PASSWORD",
                    &[TokenKind::SingleQuoteIdent, TokenKind::DoubleQuoteIdent],
                )?,
                TokenKind::RowFormat => self.parse_table_option_value(
                    table,
                    "ROW_FORMAT",
                    &[
                        TokenKind::Default,
                        TokenKind::Dynamic,
                        TokenKind::Fixed,
                        TokenKind::Compressed,
                        TokenKind::Redundant,
                        TokenKind::Compact,
                    ],
                )?,
                TokenKind::StatsAutoRecalc => self.parse_table_option_value(
                    table,
                    "STATS_AUTO_RECALC",
                    &[TokenKind::Number, TokenKind::Default],
                )?,
                TokenKind::StatsPersistent => self.parse_table_option_value(
                    table,
                    "STATS_PERSISTENT",
                    &[TokenKind::Number, TokenKind::Default],
                )?,
                TokenKind::StatsSamplePages => self.parse_table_option_value(
                    table,
                    "STATS_SAMPLE_PAGES",
                    &[TokenKind::Number],
                )?,
                TokenKind::Tablespace => {
                    return Err(ParseError::unsupported(&token, "TABLESPACE"))
                }
                TokenKind::Union => return Err(ParseError::unsupported(&token, "UNION")),
                TokenKind::Comma => continue,
                _ => return Err(ParseError::unexpected(&token, "a table option")),
            }

            self.skip_whitespace();
            if matches!(self.peek().kind, TokenKind::Eof | TokenKind::Semicolon) {
                return Ok(());
            }
        }
    }

    /// Parses `[=] <value>` where the value must be one of the given
    /// kinds, and records the option.
    fn parse_table_option_value(
        &mut self,
        table: &mut Table,
        name: &str,
        follow: &[TokenKind],
    ) -> Result<()> {
        self.skip_whitespace();
        if self.peek().kind == TokenKind::Equal {
            self.advance();
            self.skip_whitespace();
        }
        let token = self.next();
        if follow.contains(&token.kind) {
            let quoted = matches!(
                token.kind,
                TokenKind::SingleQuoteIdent | TokenKind::DoubleQuoteIdent
            );
            table.options.push(TableOption::new(name, token.value, quoted));
            return Ok(());
        }
        let expected = follow
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(ParseError::unexpected(&token, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_tracker_forward_only() {
        let mut tracker = OptionTracker::new(OPTS_INT);
        assert!(tracker.check(OptionClass::Size));
        assert!(tracker.check(OptionClass::Unsigned));
        // moving backwards is rejected
        assert!(!tracker.check(OptionClass::Size));
    }

    #[test]
    fn test_option_tracker_mask() {
        let mut tracker = OptionTracker::new(OPTS_INT);
        assert!(!tracker.check(OptionClass::Binary));
        assert!(!tracker.check(OptionClass::EnumValues));
        // Free options are always allowed
        assert!(tracker.check(OptionClass::Free));
    }

    #[test]
    fn test_option_tracker_free_options_share_position() {
        let mut tracker = OptionTracker::new(OPTS_INT);
        assert!(tracker.check(OptionClass::Free));
        assert!(tracker.check(OptionClass::Free));
        // but positioned options can no longer appear
        assert!(!tracker.check(OptionClass::Unsigned));
    }

    #[test]
    fn test_cursor_rewind() {
        let mut parser = Parser::new("a b");
        let first = parser.next();
        assert_eq!(first.value, "a");
        parser.rewind();
        assert_eq!(parser.next().value, "a");
    }

    #[test]
    fn test_eof_synthesized_past_end() {
        let mut parser = Parser::new("a");
        parser.advance();
        assert!(parser.peek().is_eof());
        parser.advance();
        assert!(parser.peek().is_eof());
    }

    #[test]
    fn test_eof_position_is_end_of_input() {
        let parser = Parser::new("ab\ncd");
        assert_eq!(parser.eof.pos, crate::lexer::Pos::new(2, 3));
    }

    #[test]
    fn test_empty_input_parses_to_nothing() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_semicolons_only() {
        assert!(parse(";;;\n;").unwrap().is_empty());
    }
}
