//! Database handle gated on schema reconciliation.

use std::path::{Path, PathBuf};

use callbook_core::{EntityRegistry, MigrationExecutor, ReconcileReport};
use rusqlite::{params, Connection};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::Error;
use crate::journal;

/// The journal database.
///
/// A `Database` only exists once reconciliation has succeeded, so any code
/// holding one can rely on every registered table and column being
/// present.
pub struct Database {
    conn: Connection,
    registry: EntityRegistry,
    report: ReconcileReport,
    path: Option<PathBuf>,
}

impl Database {
    /// Open the database file named by the configuration, creating its
    /// directory if needed, then reconcile and seed it.
    pub fn open(config: &AppConfig) -> Result<Self, Error> {
        if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
            error!(path = %config.data_dir.display(), error = %e, "failed to create data directory");
            return Err(e.into());
        }

        let path = config.database_path();
        info!(path = %path.display(), "opening database");
        let conn = Connection::open(&path)?;
        Self::initialize(conn, Some(path), journal::registry()?, config)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory(config: &AppConfig) -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, None, journal::registry()?, config)
    }

    /// Reconcile `conn` against `registry`, then seed it.
    ///
    /// Any error here is fatal: the connection is dropped and no handle is
    /// returned.
    pub fn initialize(
        mut conn: Connection,
        path: Option<PathBuf>,
        registry: EntityRegistry,
        config: &AppConfig,
    ) -> Result<Self, Error> {
        let report = MigrationExecutor::new(&mut conn, config.migration.clone())
            .reconcile(registry.specs())?;

        if !report.relaxed_columns.is_empty() {
            debug!(
                relaxed = report.relaxed_columns.len(),
                "required columns added as nullable"
            );
        }

        let mut db = Self {
            conn,
            registry,
            report,
            path,
        };

        if config.migration.dry_run {
            info!(
                statements = db.report.statements.len(),
                "dry run, skipping seed data"
            );
        } else {
            db.seed_types(&config.seed_types)?;
        }

        Ok(db)
    }

    /// Insert `names` into `Types` if the table is empty.
    ///
    /// Returns the number of rows inserted.
    pub fn seed_types(&mut self, names: &[String]) -> Result<usize, Error> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Types", [], |row| row.get(0))?;
        if existing > 0 || names.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO Types (Id, Name) VALUES (?1, ?2)")?;
            for name in names {
                stmt.execute(params![uuid::Uuid::new_v4().to_string(), name])?;
            }
        }
        tx.commit()?;

        info!(count = names.len(), "seeded segment types");
        Ok(names.len())
    }

    /// Get a reference to the connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get a reference to the entity registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Report of the reconciliation pass run at startup.
    pub fn migration_report(&self) -> &ReconcileReport {
        &self.report
    }

    /// Path of the database file, if not in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Names in `Types`, sorted.
    pub fn type_names(&self) -> Result<Vec<String>, Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT Name FROM Types WHERE Name IS NOT NULL ORDER BY Name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}
