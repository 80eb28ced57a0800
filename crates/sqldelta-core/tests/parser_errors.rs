//! Tests for parse-error reporting.

mod common;
use common::*;

use sqldelta_core::{ParseError, Pos};

#[test]
fn error_empty_table_body() {
    let _ = parse_err("CREATE TABLE t ();");
}

#[test]
fn error_missing_table_name() {
    let _ = parse_err("CREATE TABLE (id INT);");
}

#[test]
fn error_empty_quoted_table_name() {
    let err = parse_err("CREATE TABLE `` (id INT);");
    assert!(matches!(err, ParseError::Structural { .. }));
}

#[test]
fn error_unclosed_body() {
    let _ = parse_err("CREATE TABLE t (id INT");
}

#[test]
fn error_illegal_byte_is_lexical() {
    let err = parse_err("CREATE TABLE t (id INT ?);");
    assert!(matches!(err, ParseError::Lexical { .. }));
}

#[test]
fn error_unterminated_string_is_lexical() {
    let err = parse_err("CREATE TABLE t (id INT COMMENT 'oops);");
    assert!(matches!(err, ParseError::Lexical { .. }));
}

#[test]
fn error_reports_line_and_column() {
    let err = parse_err("CREATE TABLE t (\n  id INT,\n  CHECK (id)\n);");
    assert_eq!(err.pos(), Pos::new(3, 3));
    assert!(err.to_string().contains("line 3, column 3"));
}

#[test]
fn error_message_names_expectation() {
    let err = parse_err("CREATE TABLE t (id INT,);");
    let message = err.to_string();
    assert!(
        message.contains("expected"),
        "message should name what was expected: {message}"
    );
}

#[test]
fn error_first_failure_wins() {
    // the second statement is fine, but the first one aborts the parse
    let err = parse_err("CREATE TABLE t (id BOGUS); CREATE TABLE u (id INT);");
    assert_eq!(err.pos().line, 1);
}

#[test]
fn error_trailing_garbage_after_body() {
    let err = parse_err("CREATE TABLE t (id INT) 42;");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}
