//! Additive schema reconciliation.
//!
//! At startup the host hands every registered [`TableSpec`] to a
//! [`MigrationExecutor`], which brings the live SQLite database in line:
//!
//! | Live state | Action |
//! |------------|--------|
//! | Table missing | `CREATE TABLE` with every declared column |
//! | Column missing | `ALTER TABLE .. ADD COLUMN`, with `NOT NULL DEFAULT` for required columns |
//! | Required column with no safe default (blob) | added as nullable, with a warning |
//! | Extra live column | left untouched |
//! | Declared type differs | left untouched |
//!
//! A pass is idempotent: running it again right away issues no statements.
//!
//! # Example
//!
//! ```no_run
//! use callbook_core::catalog::{EntityDef, EntityRegistry, FieldDef, SemanticType};
//! use callbook_core::migration::{MigrationConfig, MigrationExecutor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = EntityRegistry::from_entities(&[EntityDef::new("Types")
//!     .with_field(FieldDef::key("Id", SemanticType::Unknown))
//!     .with_field(FieldDef::new("Name", SemanticType::text()))])?;
//!
//! let mut conn = rusqlite::Connection::open("journal.db")?;
//! let report = MigrationExecutor::new(&mut conn, MigrationConfig::default())
//!     .reconcile(registry.specs())?;
//! println!("created {} tables", report.tables_created.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`TableSpec`]: crate::catalog::TableSpec

pub mod ddl;
pub mod diff;
pub mod error;
pub mod executor;
pub mod inspector;

pub use diff::{columns_to_add, MigrationPlan};
pub use error::MigrationError;
pub use executor::{MigrationConfig, MigrationExecutor, ReconcileReport, RelaxedColumn};
pub use inspector::{LiveColumnInfo, SchemaInspector};
