//! Migration-specific error types.

use thiserror::Error;

use crate::error::SchemaError;

/// Errors that abort a reconciliation pass.
///
/// None of these are retried. Tables reconciled before the failure stay
/// migrated unless the pass runs in atomic mode.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A table spec could not be turned into a statement.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// Catalog lookup or column introspection failed.
    #[error("failed to inspect table {table}: {source}")]
    Introspection {
        /// Table being inspected.
        table: String,
        /// Underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// A `CREATE TABLE` or `ALTER TABLE` statement failed.
    #[error("failed to apply DDL to table {table}: {source} (statement: {statement})")]
    DdlExecution {
        /// Table being changed.
        table: String,
        /// The statement that failed.
        statement: String,
        /// Underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// Beginning or committing the atomic pass failed.
    #[error("transaction error: {0}")]
    Transaction(#[source] rusqlite::Error),
}

impl MigrationError {
    /// Table the error relates to, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            MigrationError::Introspection { table, .. }
            | MigrationError::DdlExecution { table, .. } => Some(table),
            MigrationError::Schema(_) | MigrationError::Transaction(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MigrationError::DdlExecution {
            table: "DailyRemarks".to_string(),
            statement: "ALTER TABLE DailyRemarks ADD COLUMN Remarks TEXT".to_string(),
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(err.to_string().contains("DailyRemarks"));
        assert!(err.to_string().contains("ADD COLUMN Remarks"));
        assert_eq!(err.table(), Some("DailyRemarks"));
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: MigrationError = SchemaError::InvalidIdentifier {
            identifier: "a b".to_string(),
        }
        .into();
        assert!(matches!(err, MigrationError::Schema(_)));
        assert_eq!(err.table(), None);
    }
}
