//! Tests for index, key, and constraint parsing.

mod common;
use common::*;

use sqldelta_core::model::{
    IndexKind, IndexType, ReferenceMatch, ReferenceOption, SortDirection,
};
use sqldelta_core::ParseError;

#[test]
fn bare_key() {
    let table = parse_table("CREATE TABLE t (id INT, KEY (id))");
    let index = &table.indexes[0];
    assert_eq!(index.kind, IndexKind::Normal);
    assert_eq!(index.index_type, IndexType::None);
    assert_eq!(index.columns.len(), 1);
    assert_eq!(index.columns[0].name, "id");
    assert_eq!(index.columns[0].length, None);
    assert_eq!(index.columns[0].sort, SortDirection::None);
}

#[test]
fn named_index_with_using() {
    let table = parse_table("CREATE TABLE t (a INT, INDEX idx_a USING BTREE (a));");
    let index = &table.indexes[0];
    assert_eq!(index.name.as_deref(), Some("idx_a"));
    assert_eq!(index.index_type, IndexType::Btree);
}

#[test]
fn using_after_column_list() {
    let table = parse_table("CREATE TABLE t (a INT, KEY k (a) USING HASH);");
    assert_eq!(table.indexes[0].index_type, IndexType::Hash);
}

#[test]
fn duplicate_using_fails() {
    let err = parse_err("CREATE TABLE t (a INT, KEY k USING BTREE (a) USING HASH);");
    assert!(matches!(err, ParseError::Structural { .. }));
}

#[test]
fn primary_key_over_two_columns() {
    let table = parse_table("CREATE TABLE t (a INT, b INT, PRIMARY KEY (a, b));");
    let index = &table.indexes[0];
    assert_eq!(index.kind, IndexKind::PrimaryKey);
    let names: Vec<_> = index.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn unique_key_variants() {
    for sql in [
        "CREATE TABLE t (a INT, UNIQUE (a));",
        "CREATE TABLE t (a INT, UNIQUE KEY (a));",
        "CREATE TABLE t (a INT, UNIQUE INDEX (a));",
    ] {
        let table = parse_table(sql);
        assert_eq!(table.indexes[0].kind, IndexKind::Unique, "for {sql}");
    }
}

#[test]
fn index_column_prefix_length_and_sort() {
    let table = parse_table("CREATE TABLE t (a VARCHAR(255), KEY k (a(10) DESC));");
    let col = &table.indexes[0].columns[0];
    assert_eq!(col.length.as_deref(), Some("10"));
    assert_eq!(col.sort, SortDirection::Descending);
}

#[test]
fn index_column_asc() {
    let table = parse_table("CREATE TABLE t (a INT, KEY k (a ASC));");
    assert_eq!(table.indexes[0].columns[0].sort, SortDirection::Ascending);
}

#[test]
fn fulltext_variants() {
    for sql in [
        "CREATE TABLE t (a TEXT, FULLTEXT (a));",
        "CREATE TABLE t (a TEXT, FULLTEXT INDEX (a));",
        "CREATE TABLE t (a TEXT, FULLTEXT KEY ft (a));",
    ] {
        let table = parse_table(sql);
        assert_eq!(table.indexes[0].kind, IndexKind::FullText, "for {sql}");
    }
}

#[test]
fn fulltext_with_parser() {
    let table = parse_table("CREATE TABLE t (a TEXT, FULLTEXT KEY ft (a) WITH PARSER ngram);");
    let index = &table.indexes[0];
    assert_eq!(index.options.len(), 1);
    assert_eq!(index.options[0].name, "WITH PARSER");
    assert_eq!(index.options[0].value, "ngram");
}

#[test]
fn fulltext_followed_by_another_field() {
    let table = parse_table("CREATE TABLE t (a TEXT, FULLTEXT KEY ft (a), b INT);");
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.indexes.len(), 1);
}

#[test]
fn spatial_index() {
    let table = parse_table("CREATE TABLE t (g GEOMETRY, SPATIAL INDEX sp (g));");
    let index = &table.indexes[0];
    assert_eq!(index.kind, IndexKind::Spatial);
    assert_eq!(index.name.as_deref(), Some("sp"));
}

#[test]
fn foreign_key_with_reference() {
    let table = parse_table(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (id) \
         ON DELETE CASCADE ON UPDATE RESTRICT);",
    );
    let index = &table.indexes[0];
    assert_eq!(index.kind, IndexKind::ForeignKey);
    let reference = index.reference.as_ref().unwrap();
    assert_eq!(reference.table_name, "u");
    assert_eq!(reference.columns[0].name, "id");
    assert_eq!(reference.on_delete, Some(ReferenceOption::Cascade));
    assert_eq!(reference.on_update, Some(ReferenceOption::Restrict));
}

#[test]
fn on_update_before_on_delete_fails() {
    let _ = parse_err(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (id) \
         ON UPDATE RESTRICT ON DELETE CASCADE);",
    );
}

#[test]
fn reference_match_clause() {
    let table =
        parse_table("CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (id) MATCH FULL);");
    let reference = table.indexes[0].reference.as_ref().unwrap();
    assert_eq!(reference.match_clause, Some(ReferenceMatch::Full));
}

#[test]
fn reference_set_null_and_no_action() {
    let table = parse_table(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (id) \
         ON DELETE SET NULL ON UPDATE NO ACTION);",
    );
    let reference = table.indexes[0].reference.as_ref().unwrap();
    assert_eq!(reference.on_delete, Some(ReferenceOption::SetNull));
    assert_eq!(reference.on_update, Some(ReferenceOption::NoAction));
}

#[test]
fn foreign_key_without_reference() {
    let table = parse_table("CREATE TABLE t (a INT, FOREIGN KEY fk (a));");
    let index = &table.indexes[0];
    assert_eq!(index.name.as_deref(), Some("fk"));
    assert!(index.reference.is_none());
}

#[test]
fn constraint_with_symbol() {
    let table = parse_table(
        "CREATE TABLE t (a INT, CONSTRAINT fk_a FOREIGN KEY (a) REFERENCES u (id));",
    );
    let index = &table.indexes[0];
    assert_eq!(index.symbol.as_deref(), Some("fk_a"));
    assert_eq!(index.kind, IndexKind::ForeignKey);
}

#[test]
fn constraint_without_symbol() {
    let table = parse_table("CREATE TABLE t (a INT, CONSTRAINT PRIMARY KEY (a));");
    let index = &table.indexes[0];
    assert!(index.symbol.is_none());
    assert_eq!(index.kind, IndexKind::PrimaryKey);
}

#[test]
fn constraint_unique() {
    let table = parse_table("CREATE TABLE t (a INT, CONSTRAINT uq UNIQUE KEY (a));");
    let index = &table.indexes[0];
    assert_eq!(index.symbol.as_deref(), Some("uq"));
    assert_eq!(index.kind, IndexKind::Unique);
}

#[test]
fn constraint_normal_key_is_rejected() {
    let _ = parse_err("CREATE TABLE t (a INT, CONSTRAINT c KEY (a));");
}

#[test]
fn check_constraint_is_unsupported() {
    let err = parse_err("CREATE TABLE t (a INT, CHECK (a > 0));");
    assert!(matches!(err, ParseError::UnsupportedFeature { .. }));
}

#[test]
fn inline_markers_become_synthetic_indexes() {
    let table = parse_table("CREATE TABLE t (id INT PRIMARY KEY, email VARCHAR(255) UNIQUE);");
    assert_eq!(table.indexes.len(), 2);
    assert_eq!(table.indexes[0].kind, IndexKind::PrimaryKey);
    assert_eq!(table.indexes[1].kind, IndexKind::Unique);
    assert_eq!(table.indexes[1].name.as_deref(), Some("email"));
    // the inline markers stay on the columns as parsed
    assert!(table.columns[0].primary);
    assert!(table.columns[1].unique);
}
