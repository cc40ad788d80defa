//! DDL statement builder.
//!
//! Every identifier is checked against `^[A-Za-z_][A-Za-z0-9_]*$` before it
//! is written into a statement, so statements can be assembled by string
//! formatting without quoting.

use crate::catalog::{ColumnSpec, TableSpec};
use crate::error::SchemaError;

/// Longest identifier accepted.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// SQLite keywords. None of them may be used as a bare identifier.
const SQLITE_KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Whether `name` is an SQLite keyword, ignoring ASCII case.
pub fn is_keyword(name: &str) -> bool {
    SQLITE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name))
}

/// Check that `name` is a plain SQL identifier that can be written into a
/// statement unquoted.
pub fn validate_identifier(name: &str) -> Result<&str, SchemaError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !(valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN) {
        return Err(SchemaError::InvalidIdentifier {
            identifier: name.to_string(),
        });
    }
    if is_keyword(name) {
        return Err(SchemaError::ReservedKeyword {
            identifier: name.to_string(),
        });
    }
    Ok(name)
}

/// Build the `CREATE TABLE` statement for a table spec.
///
/// Non-nullable columns (key columns included) carry `NOT NULL`. A single
/// key column is marked inline; a composite key becomes a trailing
/// `PRIMARY KEY (..)` clause.
pub fn create_table(spec: &TableSpec) -> Result<String, SchemaError> {
    let table = validate_identifier(spec.table_name())?;
    let key_count = spec.primary_key().count();

    let mut clauses = Vec::with_capacity(spec.columns().len() + 1);
    for column in spec.columns() {
        let mut clause = format!("{} {}", validate_identifier(&column.name)?, column.affinity());
        if !column.nullable {
            clause.push_str(" NOT NULL");
        }
        if column.is_primary_key && key_count == 1 {
            clause.push_str(" PRIMARY KEY");
        }
        clauses.push(clause);
    }

    if key_count > 1 {
        let keys: Vec<_> = spec.primary_key().map(|c| c.name.as_str()).collect();
        clauses.push(format!("PRIMARY KEY ({})", keys.join(", ")));
    }

    Ok(format!("CREATE TABLE {} ({})", table, clauses.join(", ")))
}

/// Build an `ALTER TABLE .. ADD COLUMN` statement.
///
/// `NOT NULL DEFAULT <literal>` is appended only when the column is
/// non-nullable and its type has a default literal; callers decide what
/// to do about non-nullable columns without one.
pub fn add_column(table: &str, column: &ColumnSpec) -> Result<String, SchemaError> {
    let mut stmt = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        validate_identifier(table)?,
        validate_identifier(&column.name)?,
        column.affinity()
    );

    if !column.nullable {
        if let Some(literal) = column.semantic_type.default_literal() {
            stmt.push_str(" NOT NULL DEFAULT ");
            stmt.push_str(literal);
        }
    }

    Ok(stmt)
}
