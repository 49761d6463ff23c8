//! Errors raised while loading a world configuration.
use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a usable [`WorldConfig`](crate::config::WorldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read world config {path:?}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration was not valid JSON for this schema.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parsed but describes an unusable world.
    #[error("invalid world config: {what}: {detail}")]
    Invalid {
        /// Section or archetype at fault.
        what: String,
        /// Description of the problem.
        detail: String,
    },
}

impl ConfigError {
    /// Convenience constructor for validation failures.
    #[must_use]
    pub fn invalid(what: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Invalid {
            what: what.into(),
            detail: detail.into(),
        }
    }
}
