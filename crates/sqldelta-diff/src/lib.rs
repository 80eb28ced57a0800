//! # sqldelta-diff
//!
//! Computes the set of schema-mutation statements required to migrate a
//! MySQL database from its current structure to a desired one. Input is
//! two parsed schemas from [`sqldelta_core`]; output is the ordered
//! `DROP`/`CREATE`/`ALTER` statements that turn the first into the
//! second.
//!
//! ```rust
//! let migration = sqldelta_diff::diff_ddl(
//!     "CREATE TABLE users (id INT NOT NULL PRIMARY KEY);",
//!     "CREATE TABLE users (
//!         id INT NOT NULL PRIMARY KEY,
//!         email VARCHAR(255) NOT NULL
//!     );",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     migration.statements,
//!     vec!["ALTER TABLE `users` ADD COLUMN `email` VARCHAR(255) NOT NULL AFTER `id`;"],
//! );
//! ```

mod diff;

pub use diff::{diff, SchemaDiff};

use sqldelta_core::{parse, ParseError};

/// Parses two DDL documents and diffs them.
///
/// # Errors
///
/// Returns the [`ParseError`] of whichever input fails to parse.
pub fn diff_ddl(old: &str, new: &str) -> Result<SchemaDiff, ParseError> {
    let old = parse(old)?;
    let new = parse(new)?;
    Ok(diff(&old, &new))
}
