//! Semantic field types and their SQLite storage mapping.

use serde::{Deserialize, Serialize};

/// Default literal used for non-nullable timestamp columns added to
/// tables that already hold rows.
pub const MIN_TIMESTAMP_LITERAL: &str = "'0001-01-01T00:00:00'";

/// Semantic type of an entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Signed integer.
    Integer,
    /// Floating point or decimal number.
    Real,
    /// UTF-8 text, optionally bounded.
    Text {
        /// Maximum length in characters.
        #[serde(default)]
        max_length: Option<u32>,
    },
    /// Boolean stored as 0/1.
    Boolean,
    /// Enumeration stored by discriminant.
    Enum,
    /// Timestamp stored as ISO-8601 text.
    DateTime,
    /// Raw bytes.
    Blob,
    /// Anything else; stored as opaque serialized text.
    Unknown,
}

impl SemanticType {
    /// Unbounded text.
    pub fn text() -> Self {
        SemanticType::Text { max_length: None }
    }

    /// Text bounded to `max_length` characters.
    pub fn bounded_text(max_length: u32) -> Self {
        SemanticType::Text {
            max_length: Some(max_length),
        }
    }

    /// Parse a declarative type name.
    ///
    /// Matching ignores ASCII case. Names that are not recognized map to
    /// [`SemanticType::Unknown`].
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "long" | "i32" | "i64" | "u32" | "u64" => SemanticType::Integer,
            "float" | "double" | "decimal" | "real" | "f32" | "f64" => SemanticType::Real,
            "string" | "text" => SemanticType::text(),
            "bool" | "boolean" => SemanticType::Boolean,
            "enum" => SemanticType::Enum,
            "datetime" | "date_time" | "timestamp" | "date" => SemanticType::DateTime,
            "bytes" | "blob" | "byte[]" => SemanticType::Blob,
            _ => SemanticType::Unknown,
        }
    }

    /// Storage affinity used in column definitions.
    pub fn affinity(&self) -> String {
        match self {
            SemanticType::Integer | SemanticType::Boolean | SemanticType::Enum => {
                "INTEGER".to_string()
            }
            SemanticType::Real => "REAL".to_string(),
            SemanticType::Text {
                max_length: Some(len),
            } => format!("TEXT({len})"),
            SemanticType::Text { max_length: None }
            | SemanticType::DateTime
            | SemanticType::Unknown => "TEXT".to_string(),
            SemanticType::Blob => "BLOB".to_string(),
        }
    }

    /// SQL literal that fills existing rows when a non-nullable column of
    /// this type is added. `None` means no safe default exists.
    pub fn default_literal(&self) -> Option<&'static str> {
        match self {
            SemanticType::Integer | SemanticType::Boolean | SemanticType::Enum => Some("0"),
            SemanticType::Real => Some("0.0"),
            SemanticType::Text { .. } | SemanticType::Unknown => Some("''"),
            SemanticType::DateTime => Some(MIN_TIMESTAMP_LITERAL),
            SemanticType::Blob => None,
        }
    }

    /// Whether a non-nullable column of this type can be added to a table
    /// that already has rows.
    pub fn has_safe_default(&self) -> bool {
        self.default_literal().is_some()
    }
}
