//! # sqldelta-core
//!
//! The DDL front-end of sqldelta: a hand-written lexer and recursive
//! descent parser that turn MySQL `CREATE TABLE` statements into a
//! strongly-typed, normalized schema model, preserving enough source
//! detail (quoting, sort direction, index kind) to drive a semantic diff
//! and emit faithful SQL.
//!
//! ## Parsing
//!
//! ```rust
//! use sqldelta_core::{parse, Statement};
//!
//! let statements = parse(
//!     "CREATE TABLE users (
//!         id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
//!         email VARCHAR(255) NOT NULL UNIQUE
//!     ) ENGINE=InnoDB;",
//! )
//! .unwrap();
//!
//! let Statement::Table(table) = &statements[0] else {
//!     panic!("expected a table");
//! };
//! assert_eq!(table.name, "users");
//! assert_eq!(table.columns.len(), 2);
//! ```
//!
//! ## Emission
//!
//! Every model node implements `Display` and renders canonical MySQL DDL,
//! so a parsed (or programmatically built) table can be turned back into
//! a `CREATE TABLE` statement.
//!
//! Parsing is a pure function from input text to
//! `Result<Statements, ParseError>`: no I/O, no shared state, and the
//! first error aborts the parse with the failing token's line and column.

pub mod lexer;
pub mod model;
pub mod parser;

pub use lexer::{Lexer, Pos, Token, TokenKind};
pub use model::{Column, Database, Index, Statement, Statements, Table};
pub use parser::{parse, ParseError, Parser};
