//! Core types for the Quarry query console.
//!
//! This crate contains shared data structures used across the Quarry crates:
//! - Entity and field identifiers from schema discovery
//! - Rows, result sets, and column specs
//! - Row limits and sort criteria
//! - Notices (the toast contract)
//! - Configuration types
//! - Error types

mod column;
mod config;
mod error;
mod limit;
mod notice;
mod record;
mod schema;

pub use column::{ColumnSpec, SortDirection, SortKey};
pub use config::ConsoleConfig;
pub use error::{ConsoleError, ServiceError};
pub use limit::RowLimit;
pub use notice::{Notice, NoticeKind};
pub use record::{ResultSet, Row, ID_FIELD, NAME_FIELD, RECORD_LINK_FIELD};
pub use schema::{EntityType, FieldName};
