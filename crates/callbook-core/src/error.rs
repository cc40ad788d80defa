//! Core error types.

use thiserror::Error;

use crate::migration::MigrationError;

/// Configuration errors in declared entity schemas.
///
/// These are detected while deriving table specs, before the database is
/// touched, and are always fatal to startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two columns of one entity share a name (ignoring ASCII case).
    #[error("entity {table}: duplicate column {column}")]
    DuplicateColumn {
        /// Table the columns belong to.
        table: String,
        /// The repeated column name, as declared the second time.
        column: String,
    },

    /// The entity declares no primary key field.
    #[error("entity {table}: no primary key declared")]
    MissingPrimaryKey {
        /// Table missing the key.
        table: String,
    },

    /// The entity declares no fields at all.
    #[error("entity {table}: no fields declared")]
    EmptyEntity {
        /// Table without fields.
        table: String,
    },

    /// Two registered entities map to the same table (ignoring ASCII case).
    #[error("duplicate table {table}")]
    DuplicateTable {
        /// The repeated table name.
        table: String,
    },

    /// A table or column name is not a plain SQL identifier.
    #[error("invalid identifier {identifier:?}")]
    InvalidIdentifier {
        /// The rejected name.
        identifier: String,
    },

    /// A table or column name is an SQLite keyword.
    #[error("identifier {identifier:?} is an SQLite keyword")]
    ReservedKeyword {
        /// The rejected name.
        identifier: String,
    },
}

/// Crate-level error: anything that can stop reconciliation.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid entity declaration.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Reconciliation failure.
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::DuplicateColumn {
            table: "DailyRemarks".to_string(),
            column: "remarks".to_string(),
        };
        assert_eq!(err.to_string(), "entity DailyRemarks: duplicate column remarks");

        let err: Error = SchemaError::MissingPrimaryKey {
            table: "Types".to_string(),
        }
        .into();
        assert!(err.to_string().contains("no primary key"));
    }
}
