//! Callbook Core - entity catalog and additive schema reconciliation.
//!
//! This crate declares journal entities as data, derives the table layout
//! they imply, and brings a live SQLite database in line with that layout
//! by creating missing tables and adding missing columns. Nothing that
//! already exists is ever dropped or altered.

pub mod catalog;
pub mod error;
pub mod migration;

pub use catalog::{ColumnSpec, EntityDef, EntityRegistry, FieldDef, SemanticType, TableSpec};
pub use error::{Error, SchemaError};
pub use migration::{
    LiveColumnInfo, MigrationConfig, MigrationError, MigrationExecutor, MigrationPlan,
    ReconcileReport, RelaxedColumn, SchemaInspector,
};
