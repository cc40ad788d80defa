//! Migration executor - reconciles the live database with the registered
//! table specs.
//!
//! Tables are handled one at a time in the order given. A missing table is
//! created from its spec; an existing one is diffed against its live
//! columns and each missing column is added with its own `ALTER TABLE`.

use std::borrow::Cow;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use super::ddl;
use super::diff::MigrationPlan;
use super::error::MigrationError;
use super::inspector::SchemaInspector;
use crate::catalog::{ColumnSpec, SemanticType, TableSpec};

/// Migration executor configuration.
#[derive(Debug, Clone, Default)]
pub struct MigrationConfig {
    /// Run the whole pass inside one transaction, so a failure leaves the
    /// database exactly as it was. When off, every statement commits on
    /// its own and tables finished before a failure stay migrated.
    pub atomic: bool,
    /// Compute and report statements without executing them.
    pub dry_run: bool,
}

impl MigrationConfig {
    /// Enable atomic mode.
    pub fn atomic(mut self) -> Self {
        self.atomic = true;
        self
    }

    /// Enable dry-run mode.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

/// A non-nullable column that was added as nullable because its type has
/// no safe default for existing rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxedColumn {
    /// Table the column was added to.
    pub table: String,
    /// Column name.
    pub column: String,
    /// The column's semantic type.
    pub semantic_type: SemanticType,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Tables created, in order.
    pub tables_created: Vec<String>,
    /// `(table, column)` pairs added, in order.
    pub columns_added: Vec<(String, String)>,
    /// Columns relaxed to nullable.
    pub relaxed_columns: Vec<RelaxedColumn>,
    /// DDL statements issued (or, in dry-run mode, that would be issued).
    pub statements: Vec<String>,
}

impl ReconcileReport {
    /// Whether the pass found nothing to change.
    pub fn is_noop(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Migration executor.
///
/// Holds the connection exclusively for as long as it lives, so nothing
/// else can write while a pass is running.
pub struct MigrationExecutor<'a> {
    conn: &'a mut Connection,
    config: MigrationConfig,
}

impl<'a> MigrationExecutor<'a> {
    /// Create a new migration executor.
    pub fn new(conn: &'a mut Connection, config: MigrationConfig) -> Self {
        Self { conn, config }
    }

    /// Get the executor configuration.
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Compute the plan for every table without changing anything.
    pub fn plan(&self, specs: &[TableSpec]) -> Result<Vec<MigrationPlan>, MigrationError> {
        let inspector = SchemaInspector::new(&*self.conn);
        specs
            .iter()
            .map(|spec| plan_table(&inspector, spec))
            .collect()
    }

    /// Run one reconciliation pass over `specs`, in order.
    ///
    /// Stops at the first failing table; remaining tables are not touched.
    pub fn reconcile(&mut self, specs: &[TableSpec]) -> Result<ReconcileReport, MigrationError> {
        info!(
            tables = specs.len(),
            atomic = self.config.atomic,
            dry_run = self.config.dry_run,
            "starting schema reconciliation"
        );

        let report = if self.config.atomic && !self.config.dry_run {
            let tx = self.conn.transaction().map_err(MigrationError::Transaction)?;
            let report = run_pass(&tx, specs, false)?;
            tx.commit().map_err(MigrationError::Transaction)?;
            report
        } else {
            run_pass(&*self.conn, specs, self.config.dry_run)?
        };

        info!(
            tables_created = report.tables_created.len(),
            columns_added = report.columns_added.len(),
            relaxed = report.relaxed_columns.len(),
            "schema reconciliation complete"
        );

        Ok(report)
    }
}

fn plan_table(
    inspector: &SchemaInspector<'_>,
    spec: &TableSpec,
) -> Result<MigrationPlan, MigrationError> {
    if !inspector.table_exists(spec.table_name())? {
        return Ok(MigrationPlan::create(spec));
    }
    let live = inspector.live_columns(spec.table_name())?;
    Ok(MigrationPlan::for_table(spec, &live))
}

fn run_pass(
    conn: &Connection,
    specs: &[TableSpec],
    dry_run: bool,
) -> Result<ReconcileReport, MigrationError> {
    let inspector = SchemaInspector::new(conn);
    let mut report = ReconcileReport::default();

    for spec in specs {
        let plan = plan_table(&inspector, spec)?;
        apply_plan(conn, spec, &plan, dry_run, &mut report)?;
    }

    Ok(report)
}

fn apply_plan(
    conn: &Connection,
    spec: &TableSpec,
    plan: &MigrationPlan,
    dry_run: bool,
    report: &mut ReconcileReport,
) -> Result<(), MigrationError> {
    let table = spec.table_name();

    if !plan.table_exists {
        let stmt = ddl::create_table(spec)?;
        execute(conn, table, &stmt, dry_run)?;
        info!(table = %table, columns = spec.columns().len(), "created table");
        report.tables_created.push(table.to_string());
        report.statements.push(stmt);
        return Ok(());
    }

    for column in &plan.columns_to_add {
        let column = relax_if_unsafe(table, column, report);
        let stmt = ddl::add_column(table, &column)?;
        execute(conn, table, &stmt, dry_run)?;
        info!(
            table = %table,
            column = %column.name,
            affinity = %column.affinity(),
            nullable = column.nullable,
            "added column"
        );
        report
            .columns_added
            .push((table.to_string(), column.name.clone()));
        report.statements.push(stmt);
    }

    Ok(())
}

/// A non-nullable column without a default literal cannot be added to a
/// table holding rows, so it is added as nullable instead.
fn relax_if_unsafe<'c>(
    table: &str,
    column: &'c ColumnSpec,
    report: &mut ReconcileReport,
) -> Cow<'c, ColumnSpec> {
    if column.nullable || column.semantic_type.has_safe_default() {
        return Cow::Borrowed(column);
    }

    warn!(
        table = %table,
        column = %column.name,
        semantic_type = ?column.semantic_type,
        "no safe default for non-nullable column, adding it as nullable"
    );
    report.relaxed_columns.push(RelaxedColumn {
        table: table.to_string(),
        column: column.name.clone(),
        semantic_type: column.semantic_type,
    });

    Cow::Owned(ColumnSpec {
        nullable: true,
        ..column.clone()
    })
}

fn execute(conn: &Connection, table: &str, stmt: &str, dry_run: bool) -> Result<(), MigrationError> {
    if dry_run {
        debug!(table = %table, statement = %stmt, "dry run, skipping statement");
        return Ok(());
    }

    debug!(table = %table, statement = %stmt, "executing statement");
    conn.execute(stmt, [])
        .map_err(|source| MigrationError::DdlExecution {
            table: table.to_string(),
            statement: stmt.to_string(),
            source,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntityDef, FieldDef};

    fn types_spec() -> TableSpec {
        TableSpec::derive(
            &EntityDef::new("Types")
                .with_field(FieldDef::key("Id", SemanticType::Unknown))
                .with_field(FieldDef::new("Name", SemanticType::text())),
        )
        .unwrap()
    }

    #[test]
    fn test_reconcile_creates_missing_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        let report = MigrationExecutor::new(&mut conn, MigrationConfig::default())
            .reconcile(&[types_spec()])
            .unwrap();

        assert_eq!(report.tables_created, ["Types"]);
        assert!(report.columns_added.is_empty());
        assert_eq!(
            report.statements,
            ["CREATE TABLE Types (Id TEXT NOT NULL PRIMARY KEY, Name TEXT NOT NULL)"]
        );
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut conn = Connection::open_in_memory().unwrap();
        let specs = [types_spec()];
        MigrationExecutor::new(&mut conn, MigrationConfig::default())
            .reconcile(&specs)
            .unwrap();

        let mut executor = MigrationExecutor::new(&mut conn, MigrationConfig::default());
        assert!(executor.plan(&specs).unwrap().iter().all(|p| p.is_empty()));
        assert!(executor.reconcile(&specs).unwrap().is_noop());
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        let report = MigrationExecutor::new(&mut conn, MigrationConfig::default().dry_run())
            .reconcile(&[types_spec()])
            .unwrap();
        assert_eq!(report.tables_created, ["Types"]);

        let exists = SchemaInspector::new(&conn).table_exists("Types").unwrap();
        assert!(!exists);
    }

    #[test]
    fn test_relax_if_unsafe() {
        let mut report = ReconcileReport::default();
        let blob = ColumnSpec {
            name: "Attachment".into(),
            semantic_type: SemanticType::Blob,
            nullable: false,
            is_primary_key: false,
        };
        let relaxed = relax_if_unsafe("Types", &blob, &mut report);
        assert!(relaxed.nullable);
        assert_eq!(report.relaxed_columns.len(), 1);

        let int = ColumnSpec {
            semantic_type: SemanticType::Integer,
            ..blob
        };
        assert!(matches!(relax_if_unsafe("Types", &int, &mut report), Cow::Borrowed(_)));
        assert_eq!(report.relaxed_columns.len(), 1);
    }
}
