//! Schema diffing.
//!
//! Compares a target [`TableSpec`] with the live columns of its table and
//! reports the columns that have to be added. The result type can only
//! express additions: live columns the target does not know about, and
//! columns whose declared type differs, are left alone.

use super::inspector::LiveColumnInfo;
use crate::catalog::{ColumnSpec, TableSpec};

/// Additive changes needed to bring one table in line with its spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Table the plan applies to.
    pub table_name: String,
    /// Whether the table already exists.
    pub table_exists: bool,
    /// Columns to add, in declared order. Empty when the table is missing,
    /// since creating it covers every column.
    pub columns_to_add: Vec<ColumnSpec>,
}

impl MigrationPlan {
    /// Plan for a table that does not exist yet.
    pub fn create(spec: &TableSpec) -> Self {
        Self {
            table_name: spec.table_name().to_string(),
            table_exists: false,
            columns_to_add: Vec::new(),
        }
    }

    /// Plan for an existing table with the given live columns.
    pub fn for_table(spec: &TableSpec, live: &[LiveColumnInfo]) -> Self {
        Self {
            table_name: spec.table_name().to_string(),
            table_exists: true,
            columns_to_add: columns_to_add(spec, live),
        }
    }

    /// Whether applying the plan would change nothing.
    pub fn is_empty(&self) -> bool {
        self.table_exists && self.columns_to_add.is_empty()
    }
}

/// Target columns with no live column of the same name (ignoring ASCII
/// case), in declared order.
pub fn columns_to_add(target: &TableSpec, live: &[LiveColumnInfo]) -> Vec<ColumnSpec> {
    target
        .columns()
        .iter()
        .filter(|column| !live.iter().any(|l| column.matches(&l.name)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntityDef, FieldDef, SemanticType};

    fn live(name: &str, declared_type: &str) -> LiveColumnInfo {
        LiveColumnInfo {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            not_null: false,
            is_primary_key: false,
        }
    }

    fn company_details() -> TableSpec {
        TableSpec::derive(
            &EntityDef::new("CompanyDetails")
                .with_field(FieldDef::key("CDId", SemanticType::Unknown))
                .with_field(FieldDef::new("Symbol", SemanticType::text()))
                .with_field(FieldDef::new("Name", SemanticType::text()))
                .with_field(FieldDef::new("TypeId", SemanticType::Unknown)),
        )
        .unwrap()
    }

    #[test]
    fn test_diff_case_insensitive_match() {
        let live = [
            live("cdid", "TEXT"),
            live("Symbol", "TEXT"),
            live("Name", "TEXT"),
            live("TypeId", "TEXT"),
        ];
        assert!(columns_to_add(&company_details(), &live).is_empty());
    }

    #[test]
    fn test_diff_reports_missing_in_declared_order() {
        let live = [live("Name", "TEXT"), live("CDId", "TEXT")];
        let added: Vec<_> = columns_to_add(&company_details(), &live)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(added, ["Symbol", "TypeId"]);
    }

    #[test]
    fn test_diff_ignores_extra_live_columns() {
        let live = [
            live("CDId", "TEXT"),
            live("Symbol", "TEXT"),
            live("Name", "TEXT"),
            live("TypeId", "TEXT"),
            live("LegacyNotes", "TEXT"),
        ];
        let plan = MigrationPlan::for_table(&company_details(), &live);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_diff_ignores_type_differences() {
        let live = [
            live("CDId", "BLOB"),
            live("Symbol", "INTEGER"),
            live("Name", "REAL"),
            live("TypeId", ""),
        ];
        assert!(columns_to_add(&company_details(), &live).is_empty());
    }

    #[test]
    fn test_diff_against_nothing_reports_every_column() {
        assert_eq!(columns_to_add(&company_details(), &[]).len(), 4);
    }

    #[test]
    fn test_create_plan() {
        let plan = MigrationPlan::create(&company_details());
        assert!(!plan.table_exists);
        assert!(plan.columns_to_add.is_empty());
        assert!(!plan.is_empty());
    }
}
