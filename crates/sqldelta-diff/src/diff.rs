//! Schema diff engine.
//!
//! Compares an "old" (current database) and "new" (desired) set of parsed
//! statements and produces the DDL needed to migrate old to new. Only the
//! structural model is consulted; both sides are expected to come from the
//! parser, whose normalization makes the index list authoritative for
//! keys.

use std::collections::BTreeMap;

use tracing::debug;

use sqldelta_core::model::{Index, IndexKind, Statement, Table};

/// Result of comparing two schemas: the migration statements to apply,
/// in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiff {
    /// `DROP`/`CREATE`/`ALTER` statements, terminated with `;`.
    pub statements: Vec<String>,
}

impl SchemaDiff {
    /// Returns true when the schemas are structurally identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Consumes the diff, returning the statements.
    #[must_use]
    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

/// Backtick-quotes an identifier for emission.
fn quote(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn table_map(statements: &[Statement]) -> BTreeMap<&str, &Table> {
    statements
        .iter()
        .filter_map(Statement::as_table)
        .map(|t| (t.name.as_str(), t))
        .collect()
}

/// Computes the statements that migrate `old` into `new`.
///
/// Dropped tables come first, then created tables, then per-table
/// alterations, each group in source order of the side that defines it.
#[must_use]
pub fn diff(old: &[Statement], new: &[Statement]) -> SchemaDiff {
    let old_tables = table_map(old);
    let new_tables = table_map(new);

    let mut statements = Vec::new();

    for table in old.iter().filter_map(Statement::as_table) {
        if !new_tables.contains_key(table.name.as_str()) {
            statements.push(format!("DROP TABLE {};", quote(&table.name)));
        }
    }

    for table in new.iter().filter_map(Statement::as_table) {
        match old_tables.get(table.name.as_str()) {
            None => statements.push(format!("{table};")),
            Some(old_table) => diff_table(&mut statements, old_table, table),
        }
    }

    debug!(statements = statements.len(), "computed schema diff");
    SchemaDiff { statements }
}

/// Emits the alterations that turn `old` into `new`, both being versions
/// of the same table.
fn diff_table(statements: &mut Vec<String>, old: &Table, new: &Table) {
    if old == new {
        return;
    }
    let table = quote(&new.name);

    // Columns removed from the new definition.
    for column in &old.columns {
        if new.column(&column.name).is_none() {
            statements.push(format!(
                "ALTER TABLE {table} DROP COLUMN {};",
                quote(&column.name)
            ));
        }
    }

    // Added and modified columns, in the new table's order. Inline key
    // markers are masked out of the comparison: the index list already
    // carries them.
    let mut prev: Option<&str> = None;
    for column in &new.columns {
        match old.column(&column.name) {
            None => {
                let placement = prev.map_or_else(
                    || String::from(" FIRST"),
                    |p| format!(" AFTER {}", quote(p)),
                );
                statements.push(format!("ALTER TABLE {table} ADD COLUMN {column}{placement};"));
            }
            Some(old_column) => {
                if old_column.without_key_markers() != column.without_key_markers() {
                    statements.push(format!("ALTER TABLE {table} MODIFY COLUMN {column};"));
                }
            }
        }
        prev = Some(&column.name);
    }

    let old_indexes: BTreeMap<String, &Index> =
        old.indexes.iter().map(|i| (i.identity(), i)).collect();
    let new_indexes: BTreeMap<String, &Index> =
        new.indexes.iter().map(|i| (i.identity(), i)).collect();

    // An index that disappeared or changed is dropped; a changed one is
    // then re-added below.
    for index in &old.indexes {
        match new_indexes.get(&index.identity()) {
            Some(counterpart) if *counterpart == index => {}
            _ => statements.push(drop_index(&table, index)),
        }
    }
    for index in &new.indexes {
        match old_indexes.get(&index.identity()) {
            Some(counterpart) if *counterpart == index => {}
            _ => statements.push(format!("ALTER TABLE {table} ADD {index};")),
        }
    }

    // TODO: diff table options (ENGINE, charset) once the deploy layer can
    // apply them transactionally.
}

fn drop_index(table: &str, index: &Index) -> String {
    match index.kind {
        IndexKind::PrimaryKey => format!("ALTER TABLE {table} DROP PRIMARY KEY;"),
        IndexKind::ForeignKey => {
            let name = index
                .symbol
                .as_deref()
                .or(index.name.as_deref())
                .map_or_else(|| index.identity(), String::from);
            format!("ALTER TABLE {table} DROP FOREIGN KEY {};", quote(&name))
        }
        _ => {
            let name = index
                .name
                .as_deref()
                .map_or_else(|| index.identity(), String::from);
            format!("ALTER TABLE {table} DROP INDEX {};", quote(&name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqldelta_core::parse;

    fn diff_ddl(old: &str, new: &str) -> Vec<String> {
        let old = parse(old).unwrap();
        let new = parse(new).unwrap();
        diff(&old, &new).into_statements()
    }

    #[test]
    fn test_identical_schemas_diff_empty() {
        let ddl = "CREATE TABLE t (id INT NOT NULL PRIMARY KEY);";
        assert!(diff_ddl(ddl, ddl).is_empty());
    }

    #[test]
    fn test_key_spellings_diff_empty() {
        // inline marker vs. explicit index are the same key
        let inline = "CREATE TABLE t (id INT NOT NULL PRIMARY KEY);";
        let explicit = "CREATE TABLE t (id INT NOT NULL, PRIMARY KEY (id));";
        assert!(diff_ddl(inline, explicit).is_empty());
    }

    #[test]
    fn test_drop_table() {
        let statements = diff_ddl("CREATE TABLE a (x INT); CREATE TABLE b (y INT);", "CREATE TABLE a (x INT);");
        assert_eq!(statements, vec!["DROP TABLE `b`;"]);
    }

    #[test]
    fn test_add_column_placement() {
        let statements = diff_ddl(
            "CREATE TABLE t (a INT);",
            "CREATE TABLE t (z INT, a INT, b INT);",
        );
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE `t` ADD COLUMN `z` INT FIRST;",
                "ALTER TABLE `t` ADD COLUMN `b` INT AFTER `a`;",
            ]
        );
    }

    #[test]
    fn test_modify_column() {
        let statements = diff_ddl(
            "CREATE TABLE t (v VARCHAR(64));",
            "CREATE TABLE t (v VARCHAR(128) NOT NULL);",
        );
        assert_eq!(
            statements,
            vec!["ALTER TABLE `t` MODIFY COLUMN `v` VARCHAR(128) NOT NULL;"]
        );
    }

    #[test]
    fn test_drop_primary_key() {
        let statements = diff_ddl(
            "CREATE TABLE t (id INT, PRIMARY KEY (id));",
            "CREATE TABLE t (id INT);",
        );
        assert_eq!(statements, vec!["ALTER TABLE `t` DROP PRIMARY KEY;"]);
    }

    #[test]
    fn test_changed_index_is_dropped_and_readded() {
        let statements = diff_ddl(
            "CREATE TABLE t (a INT, b INT, KEY k (a));",
            "CREATE TABLE t (a INT, b INT, KEY k (a, b));",
        );
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE `t` DROP INDEX `k`;",
                "ALTER TABLE `t` ADD KEY `k` (`a`, `b`);",
            ]
        );
    }
}
