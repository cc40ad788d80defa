//! Entity definitions.

use super::field::FieldDef;
use serde::{Deserialize, Serialize};

/// A declared entity: the row shape of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Table name.
    pub name: String,
    /// Fields in column order.
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    /// Create a new entity definition without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the entity.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Get a field by name, ignoring ASCII case.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Primary key fields in declared order.
    pub fn key_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SemanticType;

    #[test]
    fn test_entity_builder() {
        let entity = EntityDef::new("Types")
            .with_field(FieldDef::key("Id", SemanticType::Unknown))
            .with_field(FieldDef::new("Name", SemanticType::text()));

        assert_eq!(entity.name, "Types");
        assert_eq!(entity.fields.len(), 2);
        assert_eq!(entity.key_fields().count(), 1);
    }

    #[test]
    fn test_get_field_ignores_case() {
        let entity = EntityDef::new("UploadHistory")
            .with_field(FieldDef::key("Id", SemanticType::Unknown))
            .with_field(FieldDef::new("UploadDate", SemanticType::DateTime));

        assert!(entity.get_field("uploaddate").is_some());
        assert!(entity.get_field("ID").is_some());
        assert!(entity.get_field("nonexistent").is_none());
    }
}
