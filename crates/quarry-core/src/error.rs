//! Error types for the Quarry query console.

use std::time::Duration;
use thiserror::Error;

/// Errors raised at the remote service boundary.
///
/// Every variant is caught at the stage where it occurs and converted into
/// a user-visible notice; none escapes the console.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Schema or field listing failed; the listing degrades to empty and
    /// the user can retry by re-opening the picker.
    #[error("Metadata service unavailable: {0}")]
    MetadataUnavailable(String),

    /// Remote query execution failed. Display is the remote message
    /// verbatim so it can be surfaced unchanged.
    #[error("{message}")]
    Execution { message: String },

    /// A remote call exceeded the configured deadline.
    #[error("Service timeout after {duration:?}")]
    Timeout { duration: Duration },
}

/// Errors local to the console.
#[derive(Debug, Clone, Error)]
pub enum ConsoleError {
    /// Execution was requested with a blank query. Local validation; no
    /// remote call is made.
    #[error("Build or enter a query before executing")]
    EmptyQuery,

    /// A remote call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}
