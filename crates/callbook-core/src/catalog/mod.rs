//! Entity catalog.
//!
//! Entities are declared as data ([`EntityDef`] and [`FieldDef`]); the
//! catalog turns each one into the [`TableSpec`] that reconciliation
//! treats as the target layout.

mod entity;
mod field;
mod registry;
mod table;
mod types;

pub use entity::EntityDef;
pub use field::FieldDef;
pub use registry::EntityRegistry;
pub use table::{ColumnSpec, TableSpec};
pub use types::{SemanticType, MIN_TIMESTAMP_LITERAL};
