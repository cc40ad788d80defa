//! Field definitions for entities.

use super::types::SemanticType;
use serde::{Deserialize, Deserializer, Serialize};

/// A declared field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name.
    pub name: String,
    /// Semantic type; text bounds live inside [`SemanticType::Text`].
    ///
    /// Declarations may give either the tagged form or a plain type name
    /// such as `"long"`, parsed by [`SemanticType::from_type_name`].
    #[serde(deserialize_with = "declared_type")]
    pub semantic_type: SemanticType,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column is (part of) the primary key.
    #[serde(default)]
    pub primary_key: bool,
}

impl FieldDef {
    /// Create a new non-nullable field.
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            nullable: false,
            primary_key: false,
        }
    }

    /// Create a nullable field.
    pub fn optional(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            nullable: true,
            primary_key: false,
        }
    }

    /// Create a primary key field.
    pub fn key(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self::new(name, semantic_type).primary()
    }

    /// Mark as part of the primary key.
    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

fn declared_type<'de, D>(deserializer: D) -> Result<SemanticType, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Declared {
        Name(String),
        Tagged(SemanticType),
    }

    Ok(match Declared::deserialize(deserializer)? {
        Declared::Name(name) => SemanticType::from_type_name(&name),
        Declared::Tagged(ty) => ty,
    })
}
