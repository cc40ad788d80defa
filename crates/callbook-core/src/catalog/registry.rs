//! Registry of entities and their derived table specs.

use std::collections::HashMap;

use super::entity::EntityDef;
use super::table::TableSpec;
use crate::error::SchemaError;

/// Ordered set of registered entities.
///
/// Each entity's [`TableSpec`] is derived once, when it is registered, and
/// shared by reference from then on. Registration order is the order in
/// which tables are reconciled.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    specs: Vec<TableSpec>,
    /// Lowercased table name -> index into `specs`.
    index: HashMap<String, usize>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from entity definitions, in order.
    pub fn from_entities<'a>(
        entities: impl IntoIterator<Item = &'a EntityDef>,
    ) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for entity in entities {
            registry.register(entity)?;
        }
        Ok(registry)
    }

    /// Derive and register an entity's table spec.
    pub fn register(&mut self, entity: &EntityDef) -> Result<&TableSpec, SchemaError> {
        let spec = TableSpec::derive(entity)?;
        let key = spec.table_name().to_ascii_lowercase();

        if self.index.contains_key(&key) {
            return Err(SchemaError::DuplicateTable {
                table: spec.table_name().to_string(),
            });
        }

        let idx = self.specs.len();
        self.index.insert(key, idx);
        self.specs.push(spec);
        Ok(&self.specs[idx])
    }

    /// Look up a table spec by name, ignoring ASCII case.
    pub fn get(&self, table_name: &str) -> Option<&TableSpec> {
        self.index
            .get(&table_name.to_ascii_lowercase())
            .map(|&idx| &self.specs[idx])
    }

    /// All table specs in registration order.
    pub fn specs(&self) -> &[TableSpec] {
        &self.specs
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no entity is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
