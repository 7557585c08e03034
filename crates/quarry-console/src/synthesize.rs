//! Query synthesis from selection state.

use quarry_core::{EntityType, FieldName, RowLimit, ID_FIELD, NAME_FIELD};

/// Build a query string from the current selection.
///
/// Pure and idempotent: identical inputs yield byte-identical strings.
/// With no entity or no selected fields there is nothing to query and the
/// result is empty. Otherwise the field list is the deduplicated union of
/// `Id`, `Name`, and the user's picks - `Id` and `Name` forced to the
/// front so every result can carry a navigable link and a display label,
/// remaining fields in first-seen order, blank names dropped.
pub fn synthesize_query(
    entity: Option<&EntityType>,
    fields: &[FieldName],
    limit: RowLimit,
) -> String {
    let Some(entity) = entity else {
        return String::new();
    };
    if fields.is_empty() {
        return String::new();
    }

    let mut names: Vec<&str> = vec![ID_FIELD, NAME_FIELD];
    for field in fields {
        let name = field.as_str();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    format!(
        "SELECT {} FROM {} LIMIT {}",
        names.join(", "),
        entity,
        limit.max_rows()
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<FieldName> {
        names.iter().map(|n| FieldName::from(*n)).collect()
    }

    #[test]
    fn test_account_industry_500() {
        let entity = EntityType::from("Account");
        let query = synthesize_query(Some(&entity), &fields(&["Industry"]), RowLimit::Small);
        assert_eq!(query, "SELECT Id, Name, Industry FROM Account LIMIT 500");
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let entity = EntityType::from("Contact");
        let picks = fields(&["Email", "Phone"]);
        let first = synthesize_query(Some(&entity), &picks, RowLimit::Medium);
        let second = synthesize_query(Some(&entity), &picks, RowLimit::Medium);
        assert_eq!(first, second);
    }

    #[test]
    fn test_id_and_name_forced_to_front_exactly_once() {
        let entity = EntityType::from("Account");
        // User picked Name and Id themselves, out of order
        let query = synthesize_query(
            Some(&entity),
            &fields(&["Industry", "Name", "Id"]),
            RowLimit::Small,
        );
        assert_eq!(query, "SELECT Id, Name, Industry FROM Account LIMIT 500");
    }

    #[test]
    fn test_duplicates_collapse() {
        let entity = EntityType::from("Account");
        let query = synthesize_query(
            Some(&entity),
            &fields(&["Industry", "Industry", "Phone", "Industry"]),
            RowLimit::Small,
        );
        assert_eq!(
            query,
            "SELECT Id, Name, Industry, Phone FROM Account LIMIT 500"
        );
    }

    #[test]
    fn test_blank_field_names_are_skipped() {
        let entity = EntityType::from("Account");
        let query = synthesize_query(Some(&entity), &fields(&["", "Industry"]), RowLimit::Small);
        assert_eq!(query, "SELECT Id, Name, Industry FROM Account LIMIT 500");
    }

    #[test]
    fn test_no_entity_or_no_fields_yields_empty() {
        let entity = EntityType::from("Account");
        assert_eq!(synthesize_query(None, &fields(&["A"]), RowLimit::Small), "");
        assert_eq!(synthesize_query(Some(&entity), &[], RowLimit::Small), "");
    }

    #[test]
    fn test_limit_magnitudes_render() {
        let entity = EntityType::from("Account");
        let picks = fields(&["Industry"]);
        let query = synthesize_query(Some(&entity), &picks, RowLimit::VeryLarge);
        assert!(query.ends_with("LIMIT 50000"));
    }
}
