//! Configuration types.

use crate::RowLimit;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Prefix for record navigation paths, e.g. `/`.
    #[serde(default = "default_link_base")]
    pub link_base: String,

    /// Row limit applied before the user picks one.
    #[serde(default)]
    pub default_limit: RowLimit,

    /// Deadline for each remote call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub service_timeout_secs: u64,
}

impl ConsoleConfig {
    /// The remote-call deadline as a `Duration`.
    pub fn service_timeout(&self) -> Duration {
        Duration::from_secs(self.service_timeout_secs)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            link_base: default_link_base(),
            default_limit: RowLimit::default(),
            service_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_link_base() -> String {
    "/".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
