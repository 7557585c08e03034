//! Column metadata derived for rendering a result set.

use serde::{Deserialize, Serialize};

/// Display metadata for one result column.
///
/// Derived once per result set and replaced alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header text.
    pub label: String,

    /// Row key this column reads its value from.
    pub source_field: String,

    /// Whether the column renders as a navigable link.
    pub is_link: bool,

    /// Whether the column can be sorted on.
    pub sortable: bool,
}

impl ColumnSpec {
    /// A plain sortable text column reading the field of the same name.
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            source_field: name,
            is_link: false,
            sortable: true,
        }
    }

    /// A link column labeled `label` that reads `source_field` per row.
    pub fn link(label: impl Into<String>, source_field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source_field: source_field.into(),
            is_link: true,
            sortable: true,
        }
    }
}

/// Direction for a client-side sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// The last applied sort: which field, which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// Row key the rows were ordered by.
    pub field: String,

    /// Applied direction.
    pub direction: SortDirection,
}
