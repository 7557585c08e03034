//! Result rendering: column derivation, record links, client-side sort.
//!
//! All three operations are pure over rows and column names; the console
//! decides when to apply them and replaces its state wholesale.

use crate::services::LinkResolver;
use quarry_core::{ColumnSpec, FieldName, Row, SortDirection, ID_FIELD, NAME_FIELD, RECORD_LINK_FIELD};
use serde_json::Value;
use std::cmp::Ordering;

/// Derive display columns for a result set.
///
/// The `Name` column renders as a link only when the user explicitly
/// selected `Name`; the link reads the per-row `recordLink` value. Every
/// column is sortable.
pub fn derive_columns(columns: &[String], selected_fields: &[FieldName]) -> Vec<ColumnSpec> {
    let name_selected = selected_fields.iter().any(|f| f.as_str() == NAME_FIELD);
    columns
        .iter()
        .map(|name| {
            if name == NAME_FIELD && name_selected {
                ColumnSpec::link(NAME_FIELD, RECORD_LINK_FIELD)
            } else {
                ColumnSpec::text(name.clone())
            }
        })
        .collect()
}

/// Add a `recordLink` entry to every row that has both a non-empty `Id`
/// and a non-empty `Name`. Other rows pass through unchanged.
pub fn attach_links(rows: Vec<Row>, resolver: &dyn LinkResolver) -> Vec<Row> {
    rows.into_iter()
        .map(|mut row| {
            let id = non_empty_text(row.get(ID_FIELD));
            let has_name = non_empty_text(row.get(NAME_FIELD)).is_some();
            if let (Some(id), true) = (id, has_name) {
                row.insert(
                    RECORD_LINK_FIELD.to_string(),
                    Value::String(resolver.record_link(&id)),
                );
            }
            row
        })
        .collect()
}

/// Stable sort of rows by one field.
///
/// Pure: returns a new sequence and touches no other row field. Missing
/// and null values normalize to the empty string; two numbers compare
/// numerically, anything else by string rendering. Equal keys keep their
/// original relative order.
pub fn sort_rows(rows: &[Row], field: &str, direction: SortDirection) -> Vec<Row> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_values(a.get(field), b.get(field));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Three-way comparison over optional cell values.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(a)), Some(Value::Number(b))) = (a, b) {
        let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    text_of(a).cmp(&text_of(b))
}

/// Render a cell value for comparison. Null and missing become empty.
fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A value usable as link material: present, non-null, and if textual,
/// non-blank.
fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::BasePathLinker;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn names(fields: &[&str]) -> Vec<FieldName> {
        fields.iter().map(|f| FieldName::from(*f)).collect()
    }

    #[test]
    fn test_name_column_links_only_when_selected() {
        let columns = vec!["Id".to_string(), "Name".to_string(), "Industry".to_string()];

        let specs = derive_columns(&columns, &names(&["Name", "Industry"]));
        assert!(specs[1].is_link);
        assert_eq!(specs[1].source_field, RECORD_LINK_FIELD);
        assert_eq!(specs[1].label, "Name");

        // Name present in results but not user-selected: plain text column
        let specs = derive_columns(&columns, &names(&["Industry"]));
        assert!(!specs[1].is_link);
        assert_eq!(specs[1].source_field, "Name");
    }

    #[test]
    fn test_every_column_is_sortable() {
        let columns = vec!["Id".to_string(), "Name".to_string()];
        let specs = derive_columns(&columns, &names(&["Name"]));
        assert!(specs.iter().all(|spec| spec.sortable));
    }

    #[test]
    fn test_attach_links_requires_id_and_name() {
        let linker = BasePathLinker::default();
        let rows = vec![
            row(&[("Id", json!("1")), ("Name", json!("Acme"))]),
            row(&[("Id", json!("2"))]),
            row(&[("Name", json!("No Id"))]),
            row(&[("Id", json!("")), ("Name", json!("Blank Id"))]),
            row(&[("Id", json!("5")), ("Name", json!(null))]),
        ];

        let linked = attach_links(rows, &linker);
        assert_eq!(linked[0].get(RECORD_LINK_FIELD), Some(&json!("/1")));
        for r in &linked[1..] {
            assert!(!r.contains_key(RECORD_LINK_FIELD));
        }
    }

    #[test]
    fn test_attach_links_passes_other_fields_through() {
        let linker = BasePathLinker::default();
        let rows = vec![row(&[
            ("Id", json!("9")),
            ("Name", json!("Acme")),
            ("Industry", json!("Energy")),
        ])];

        let linked = attach_links(rows, &linker);
        assert_eq!(linked[0].get("Industry"), Some(&json!("Energy")));
        assert_eq!(linked[0].get("Id"), Some(&json!("9")));
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let rows = vec![
            row(&[("Id", json!("1")), ("Name", json!("B"))]),
            row(&[("Id", json!("2")), ("Name", json!("A"))]),
            row(&[("Id", json!("3")), ("Name", json!("A"))]),
        ];

        let sorted = sort_rows(&rows, "Name", SortDirection::Ascending);
        let ids: Vec<&Value> = sorted.iter().map(|r| r.get("Id").unwrap()).collect();
        assert_eq!(ids, vec![&json!("2"), &json!("3"), &json!("1")]);
    }

    #[test]
    fn test_sort_descending() {
        let rows = vec![
            row(&[("Name", json!("A"))]),
            row(&[("Name", json!("C"))]),
            row(&[("Name", json!("B"))]),
        ];

        let sorted = sort_rows(&rows, "Name", SortDirection::Descending);
        let names: Vec<&Value> = sorted.iter().map(|r| r.get("Name").unwrap()).collect();
        assert_eq!(names, vec![&json!("C"), &json!("B"), &json!("A")]);
    }

    #[test]
    fn test_sort_normalizes_null_and_missing_to_empty() {
        let rows = vec![
            row(&[("Name", json!("A"))]),
            row(&[("Name", json!(null))]),
            row(&[("Id", json!("no name key"))]),
        ];

        let sorted = sort_rows(&rows, "Name", SortDirection::Ascending);
        // Null and missing sort before "A", keeping their relative order
        assert_eq!(sorted[0].get("Name"), Some(&json!(null)));
        assert!(!sorted[1].contains_key("Name"));
        assert_eq!(sorted[2].get("Name"), Some(&json!("A")));
    }

    #[test]
    fn test_sort_compares_numbers_numerically() {
        let rows = vec![
            row(&[("Employees", json!(900))]),
            row(&[("Employees", json!(25))]),
            row(&[("Employees", json!(100))]),
        ];

        let sorted = sort_rows(&rows, "Employees", SortDirection::Ascending);
        let counts: Vec<&Value> = sorted.iter().map(|r| r.get("Employees").unwrap()).collect();
        assert_eq!(counts, vec![&json!(25), &json!(100), &json!(900)]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let rows = vec![row(&[("Name", json!("B"))]), row(&[("Name", json!("A"))])];
        let _sorted = sort_rows(&rows, "Name", SortDirection::Ascending);
        assert_eq!(rows[0].get("Name"), Some(&json!("B")));
    }
}
