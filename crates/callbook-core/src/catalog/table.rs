//! Target table layouts derived from entity definitions.

use std::collections::HashSet;

use super::entity::EntityDef;
use super::types::SemanticType;
use crate::error::SchemaError;
use crate::migration::ddl::validate_identifier;

/// A column the target schema requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Semantic type.
    pub semantic_type: SemanticType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,
}

impl ColumnSpec {
    /// Storage affinity for this column.
    pub fn affinity(&self) -> String {
        self.semantic_type.affinity()
    }

    /// Whether this column and `name` refer to the same column.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Target layout of one table.
///
/// Built once per entity and never mutated afterwards; fields are only
/// reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    table_name: String,
    columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Derive the table layout implied by an entity definition.
    ///
    /// Columns keep their declared order. Fails when the entity has no
    /// fields, no primary key, a duplicate column name (ignoring ASCII
    /// case) or a name that is not a plain SQL identifier.
    pub fn derive(entity: &EntityDef) -> Result<Self, SchemaError> {
        validate_identifier(&entity.name)?;

        if entity.fields.is_empty() {
            return Err(SchemaError::EmptyEntity {
                table: entity.name.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(entity.fields.len());
        let mut columns = Vec::with_capacity(entity.fields.len());

        for field in &entity.fields {
            validate_identifier(&field.name)?;

            if !seen.insert(field.name.to_ascii_lowercase()) {
                return Err(SchemaError::DuplicateColumn {
                    table: entity.name.clone(),
                    column: field.name.clone(),
                });
            }

            columns.push(ColumnSpec {
                name: field.name.clone(),
                semantic_type: field.semantic_type,
                // Key columns never hold NULL, whatever the declaration says.
                nullable: field.nullable && !field.primary_key,
                is_primary_key: field.primary_key,
            });
        }

        if !columns.iter().any(|c| c.is_primary_key) {
            return Err(SchemaError::MissingPrimaryKey {
                table: entity.name.clone(),
            });
        }

        Ok(Self {
            table_name: entity.name.clone(),
            columns,
        })
    }

    /// Table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Columns in declared order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Get a column by name, ignoring ASCII case.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.matches(name))
    }

    /// Primary key columns in declared order.
    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}
