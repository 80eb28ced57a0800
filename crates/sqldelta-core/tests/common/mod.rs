#![allow(dead_code)]

use sqldelta_core::model::Table;
use sqldelta_core::{parse, ParseError, Statement, Statements};

pub fn parse_ok(sql: &str) -> Statements {
    parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

/// Parses input expected to contain exactly one table statement.
pub fn parse_table(sql: &str) -> Table {
    let statements = parse_ok(sql);
    assert_eq!(
        statements.len(),
        1,
        "expected exactly one statement for: {sql}"
    );
    match statements.into_iter().next().unwrap() {
        Statement::Table(table) => table,
        other => panic!("Expected a table, got {other:?}"),
    }
}
