//! The user's current selection: entity, fields, limit, and picker filter.

use quarry_core::{EntityType, FieldName, RowLimit};

/// Selection state for one console instance.
///
/// `fields` is ordered and unique, and only meaningful relative to the
/// current entity: changing the entity clears it. The limit is a closed
/// set of magnitudes; out-of-set values are rejected without error.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    entity: Option<EntityType>,
    fields: Vec<FieldName>,
    limit: RowLimit,
    search_filter: String,
}

impl SelectionState {
    /// Create a selection with the given starting limit.
    pub fn new(limit: RowLimit) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// The selected entity, if any.
    pub fn entity(&self) -> Option<&EntityType> {
        self.entity.as_ref()
    }

    /// The selected fields, in pick order, without duplicates.
    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    /// The current result limit.
    pub fn limit(&self) -> RowLimit {
        self.limit
    }

    /// The free-text filter over the entity picker.
    pub fn search_filter(&self) -> &str {
        &self.search_filter
    }

    /// Select an entity (or none). Always clears the field selection:
    /// field names are only meaningful relative to their entity.
    pub fn set_entity(&mut self, entity: Option<EntityType>) {
        self.entity = entity;
        self.fields.clear();
    }

    /// Replace the field selection wholesale.
    ///
    /// Deduplicates while preserving first-seen order; blank names are
    /// dropped.
    pub fn set_fields(&mut self, fields: Vec<FieldName>) {
        let mut unique = Vec::with_capacity(fields.len());
        for field in fields {
            if !field.is_empty() && !unique.contains(&field) {
                unique.push(field);
            }
        }
        self.fields = unique;
    }

    /// Add the field if absent, remove it if present.
    pub fn toggle_field(&mut self, field: FieldName) {
        if let Some(pos) = self.fields.iter().position(|f| *f == field) {
            self.fields.remove(pos);
        } else if !field.is_empty() {
            self.fields.push(field);
        }
    }

    /// Set the limit from a raw row count.
    ///
    /// Out-of-set magnitudes leave the state unchanged. Returns whether
    /// the limit was applied, so callers know whether to regenerate.
    pub fn set_limit_rows(&mut self, rows: u32) -> bool {
        match RowLimit::from_rows(rows) {
            Some(limit) => {
                self.limit = limit;
                true
            }
            None => false,
        }
    }

    /// Set the entity-picker filter text.
    pub fn set_search_filter(&mut self, term: String) {
        self.search_filter = term;
    }
}

// =============================================================================
// Tests
// =============================================================================
