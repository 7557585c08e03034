//! Result-size limits.
//!
//! Limits are a closed set of magnitudes rather than a free integer, which
//! bounds result size and remote load. Raw numbers enter only through
//! [`RowLimit::from_rows`]; anything outside the set maps to `None`.

use serde::{Deserialize, Serialize};

/// Allowed result-size magnitudes for a synthesized query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowLimit {
    /// 500 rows.
    #[default]
    Small,
    /// 1,000 rows.
    Medium,
    /// 5,000 rows.
    Large,
    /// 50,000 rows.
    VeryLarge,
}

impl RowLimit {
    /// All limits, smallest first. Useful for building a picker.
    pub const ALL: [RowLimit; 4] = [
        RowLimit::Small,
        RowLimit::Medium,
        RowLimit::Large,
        RowLimit::VeryLarge,
    ];

    /// The maximum row count this limit allows.
    pub fn max_rows(self) -> u32 {
        match self {
            RowLimit::Small => 500,
            RowLimit::Medium => 1_000,
            RowLimit::Large => 5_000,
            RowLimit::VeryLarge => 50_000,
        }
    }

    /// Map a raw row count back to a limit.
    ///
    /// Returns `None` for anything outside the allowed set; callers treat
    /// that as "leave the current limit unchanged".
    pub fn from_rows(rows: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|limit| limit.max_rows() == rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_magnitudes() {
        for limit in RowLimit::ALL {
            assert_eq!(RowLimit::from_rows(limit.max_rows()), Some(limit));
        }
    }

    #[test]
    fn test_out_of_set_rows_rejected() {
        assert_eq!(RowLimit::from_rows(0), None);
        assert_eq!(RowLimit::from_rows(499), None);
        assert_eq!(RowLimit::from_rows(2_000), None);
    }

    #[test]
    fn test_default_is_smallest() {
        assert_eq!(RowLimit::default(), RowLimit::Small);
        assert_eq!(RowLimit::default().max_rows(), 500);
    }
}
