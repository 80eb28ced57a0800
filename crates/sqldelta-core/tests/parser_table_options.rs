//! Tests for trailing table options.

mod common;
use common::*;

use sqldelta_core::ParseError;

#[test]
fn engine_and_default_charset_keep_source_order() {
    let table = parse_table("CREATE TABLE t (id INT) ENGINE=InnoDB DEFAULT CHARACTER SET=utf8mb4;");
    let names: Vec<_> = table.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["ENGINE", "DEFAULT CHARACTER SET"]);
    assert_eq!(table.options[1].value, "utf8mb4");
}

#[test]
fn equals_sign_is_optional() {
    let table = parse_table("CREATE TABLE t (id INT) ENGINE InnoDB AUTO_INCREMENT 100;");
    assert_eq!(table.options[0].value, "InnoDB");
    assert_eq!(table.options[1].value, "100");
}

#[test]
fn options_may_be_comma_separated() {
    let table = parse_table("CREATE TABLE t (id INT) MAX_ROWS=1000, MIN_ROWS=10;");
    assert_eq!(table.options.len(), 2);
}

#[test]
fn default_charset_spellings() {
    for sql in [
        "CREATE TABLE t (id INT) DEFAULT CHARSET=utf8mb4;",
        "CREATE TABLE t (id INT) DEFAULT CHARACTER SET=utf8mb4;",
        "CREATE TABLE t (id INT) CHARACTER SET utf8mb4;",
    ] {
        let table = parse_table(sql);
        assert_eq!(table.options[0].name, "DEFAULT CHARACTER SET", "for {sql}");
        assert_eq!(table.options[0].value, "utf8mb4");
    }
}

#[test]
fn collate_spellings() {
    for sql in [
        "CREATE TABLE t (id INT) DEFAULT COLLATE=utf8mb4_bin;",
        "CREATE TABLE t (id INT) COLLATE utf8mb4_bin;",
    ] {
        let table = parse_table(sql);
        assert_eq!(table.options[0].name, "DEFAULT COLLATE", "for {sql}");
    }
}

#[test]
fn comment_option_with_escaped_quote() {
    let table = parse_table(r"CREATE TABLE t (id INT) COMMENT='it\'s fine';");
    assert_eq!(table.options[0].name, "COMMENT");
    assert_eq!(table.options[0].value, "it's fine");
    assert!(table.options[0].quoted);
}

#[test]
fn row_format_values() {
    for value in ["DEFAULT", "DYNAMIC", "FIXED", "COMPRESSED", "REDUNDANT", "COMPACT"] {
        let table = parse_table(&format!("CREATE TABLE t (id INT) ROW_FORMAT={value};"));
        assert_eq!(table.options[0].value, value);
    }
    let _ = parse_err("CREATE TABLE t (id INT) ROW_FORMAT=SIDEWAYS;");
}

#[test]
fn stats_options_accept_number_or_default() {
    let table = parse_table(
        "CREATE TABLE t (id INT) STATS_AUTO_RECALC=DEFAULT STATS_PERSISTENT=1 \
         STATS_SAMPLE_PAGES=25;",
    );
    assert_eq!(table.options.len(), 3);
}

#[test]
fn directory_options() {
    let table = parse_table(
        "CREATE TABLE t (id INT) DATA DIRECTORY='/var/data' INDEX DIRECTORY='/var/idx';",
    );
    assert_eq!(table.options[0].name, "DATA DIRECTORY");
    assert_eq!(table.options[0].value, "/var/data");
    assert_eq!(table.options[1].name, "INDEX DIRECTORY");
}

#[test]
fn misc_numeric_options() {
    let table = parse_table(
        "CREATE TABLE t (id INT) CHECKSUM=1 DELAY_KEY_WRITE=1 KEY_BLOCK_SIZE=8 \
         AVG_ROW_LENGTH=100 PACK_KEYS=0;",
    );
    let names: Vec<_> = table.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CHECKSUM",
            "DELAY_KEY_WRITE",
            "KEY_BLOCK_SIZE",
            "AVG_ROW_LENGTH",
            "PACK_KEYS"
        ]
    );
}

#[test]
fn connection_and_password_are_quoted_values() {
    let table =
        parse_table("CREATE TABLE t (id INT) CONNECTION='mysql://remote' PASSWORD='secret';");
    assert!(table.options[0].quoted);
    assert!(table.options[1].quoted);
}

#[test]
fn engine_value_must_be_identifier() {
    let _ = parse_err("CREATE TABLE t (id INT) ENGINE=42;");
}

#[test]
fn tablespace_is_unsupported() {
    let err = parse_err("CREATE TABLE a (b INT) TABLESPACE=ts;");
    assert!(matches!(
        err,
        ParseError::UnsupportedFeature { ref feature, .. } if feature == "TABLESPACE"
    ));
}

#[test]
fn union_is_unsupported() {
    let err = parse_err("CREATE TABLE a (b INT) UNION=(c);");
    assert!(matches!(err, ParseError::UnsupportedFeature { .. }));
}
