//! Live schema inspection.

use rusqlite::{params, Connection, OptionalExtension};

use super::error::MigrationError;

/// Column metadata as reported by the live database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumnInfo {
    /// Column name as stored.
    pub name: String,
    /// Declared type text, e.g. `INTEGER` or `TEXT(50)`.
    pub declared_type: String,
    /// Whether the column carries `NOT NULL`.
    pub not_null: bool,
    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,
}

/// Read-only view of the live schema behind a connection.
///
/// Nothing is cached: every call queries the database again.
pub struct SchemaInspector<'a> {
    conn: &'a Connection,
}

impl<'a> SchemaInspector<'a> {
    /// Create an inspector over a connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Check whether a table with this name exists, ignoring ASCII case as
    /// SQLite itself does when resolving table names.
    pub fn table_exists(&self, table: &str) -> Result<bool, MigrationError> {
        self.conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                params![table],
                |_| Ok(()),
            )
            .optional()
            .map(|row| row.is_some())
            .map_err(|source| MigrationError::Introspection {
                table: table.to_string(),
                source,
            })
    }

    /// List the live columns of a table, in storage order.
    ///
    /// A table that does not exist has no columns.
    pub fn live_columns(&self, table: &str) -> Result<Vec<LiveColumnInfo>, MigrationError> {
        let introspection = |source| MigrationError::Introspection {
            table: table.to_string(),
            source,
        };

        let mut stmt = self
            .conn
            .prepare(r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?1) ORDER BY cid"#)
            .map_err(introspection)?;

        let rows = stmt
            .query_map(params![table], |row| {
                Ok(LiveColumnInfo {
                    name: row.get(0)?,
                    declared_type: row.get(1)?,
                    not_null: row.get::<_, i64>(2)? != 0,
                    is_primary_key: row.get::<_, i64>(3)? > 0,
                })
            })
            .map_err(introspection)?;

        let columns = rows.collect::<Result<Vec<_>, _>>().map_err(introspection)?;
        Ok(columns)
    }
}
