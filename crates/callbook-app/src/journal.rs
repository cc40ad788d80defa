//! The journal's entities.
//!
//! Every table the journal stores is declared here, in reconciliation
//! order: lookups first, then companies, then remarks and the results
//! recorded against them.

use callbook_core::catalog::{EntityDef, EntityRegistry, FieldDef, SemanticType};
use callbook_core::SchemaError;

/// UUIDs are stored as their hyphenated text form.
const UUID: SemanticType = SemanticType::Unknown;

/// Market segments (e.g. `NIFTY 50`).
pub fn types() -> EntityDef {
    EntityDef::new("Types")
        .with_field(FieldDef::key("Id", UUID))
        .with_field(FieldDef::optional("Name", SemanticType::text()))
}

/// Record of each price-data upload.
pub fn upload_history() -> EntityDef {
    EntityDef::new("UploadHistory")
        .with_field(FieldDef::key("Id", UUID))
        .with_field(FieldDef::new("UploadDate", SemanticType::DateTime))
}

/// Tracked companies.
pub fn company_details() -> EntityDef {
    EntityDef::new("CompanyDetails")
        .with_field(FieldDef::key("CDId", UUID))
        .with_field(FieldDef::optional("Symbol", SemanticType::text()))
        .with_field(FieldDef::optional("Name", SemanticType::text()))
        .with_field(FieldDef::new("TypeId", UUID))
}

/// A chart reviewed for a company on a given day.
pub fn chart_remarks() -> EntityDef {
    EntityDef::new("ChartRemarks")
        .with_field(FieldDef::key("CRId", UUID))
        .with_field(FieldDef::new("CDId", UUID))
        .with_field(FieldDef::new("RemarkDate", SemanticType::DateTime))
}

/// Fields shared by the daily, weekly and monthly call tables.
fn call_fields(parent: &str) -> Vec<FieldDef> {
    vec![
        FieldDef::new(parent, UUID),
        FieldDef::new("RemarkDate", SemanticType::DateTime),
        FieldDef::new("Position", SemanticType::Enum),
        FieldDef::new("Prediction", SemanticType::Enum),
        FieldDef::new("CheckDate", SemanticType::DateTime),
        FieldDef::optional("Remarks", SemanticType::text()),
        FieldDef::new("IsChecked", SemanticType::Boolean),
    ]
}

/// Daily calls made on a chart.
pub fn daily_remarks() -> EntityDef {
    EntityDef::new("DailyRemarks")
        .with_field(FieldDef::key("DRId", UUID))
        .with_fields(call_fields("CRId"))
}

/// Weekly calls made on a chart.
pub fn weekly_remarks() -> EntityDef {
    EntityDef::new("WeeklyRemarks")
        .with_field(FieldDef::key("WRId", UUID))
        .with_fields(call_fields("CRId"))
}

/// Monthly calls made on a company.
pub fn monthly_remarks() -> EntityDef {
    EntityDef::new("MonthlyRemarks")
        .with_field(FieldDef::key("MRId", UUID))
        .with_fields(call_fields("CDId"))
}

fn result_entity(name: &str, key: &str, parent: &str, note: &str) -> EntityDef {
    EntityDef::new(name)
        .with_field(FieldDef::key(key, UUID))
        .with_field(FieldDef::new(parent, UUID))
        .with_field(FieldDef::new("ResultDate", SemanticType::DateTime))
        .with_field(FieldDef::new("Result", SemanticType::Enum))
        .with_field(FieldDef::optional(note, SemanticType::text()))
}

/// Outcome of a daily call.
pub fn daily_results() -> EntityDef {
    result_entity("DailyResults", "DResultId", "DRId", "ResultRemark")
}

/// Outcome of a weekly call.
pub fn weekly_results() -> EntityDef {
    result_entity("WeeklyResults", "WResultId", "WRId", "ResultRemarks")
}

/// Outcome of a monthly call.
pub fn monthly_results() -> EntityDef {
    result_entity("MonthlyResults", "MResultId", "MRId", "RemarkRemark")
}

/// All journal entities, in reconciliation order.
pub fn entities() -> Vec<EntityDef> {
    vec![
        types(),
        upload_history(),
        company_details(),
        chart_remarks(),
        daily_remarks(),
        weekly_remarks(),
        monthly_remarks(),
        daily_results(),
        weekly_results(),
        monthly_results(),
    ]
}

/// Registry of all journal entities.
pub fn registry() -> Result<EntityRegistry, SchemaError> {
    EntityRegistry::from_entities(&entities())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.specs()[0].table_name(), "Types");
        assert_eq!(registry.specs()[9].table_name(), "MonthlyResults");
    }

    #[test]
    fn test_every_table_has_single_uuid_key() {
        for spec in registry().unwrap().specs() {
            let keys: Vec<_> = spec.primary_key().collect();
            assert_eq!(keys.len(), 1, "{}", spec.table_name());
            assert_eq!(keys[0].affinity(), "TEXT");
        }
    }

    #[test]
    fn test_daily_remarks_layout() {
        let registry = registry().unwrap();
        let spec = registry.get("DailyRemarks").unwrap();
        let names: Vec<_> = spec.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "DRId",
                "CRId",
                "RemarkDate",
                "Position",
                "Prediction",
                "CheckDate",
                "Remarks",
                "IsChecked"
            ]
        );
        assert!(spec.column("Remarks").unwrap().nullable);
        assert!(!spec.column("IsChecked").unwrap().nullable);
    }
}
