//! Rows and result sets returned by query execution.

use serde::{Deserialize, Serialize};

/// The identifier field forced into every synthesized query.
pub const ID_FIELD: &str = "Id";

/// The display-label field forced into every synthesized query.
pub const NAME_FIELD: &str = "Name";

/// Row key for the navigation path derived from `Id`.
pub const RECORD_LINK_FIELD: &str = "recordLink";

/// A single result row: an ordered map of column name to value.
///
/// Values are arbitrary JSON; the remote service decides their shape.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The rows and column names returned by one query execution.
///
/// Replaced wholesale on each execution. Only the sort operation reorders
/// `rows`; `columns` never changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Result rows, in the order the service returned them (or the last
    /// applied sort order).
    pub rows: Vec<Row>,

    /// Column names, in query order.
    pub columns: Vec<String>,
}

impl ResultSet {
    /// Create a result set from rows and column names.
    pub fn new(rows: Vec<Row>, columns: Vec<String>) -> Self {
        Self { rows, columns }
    }

    /// Check if the result set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
