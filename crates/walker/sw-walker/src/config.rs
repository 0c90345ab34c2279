//! Configuration types for the walker.

use serde::{Deserialize, Serialize};
use sw_error::{Result, SwError};

/// Default number of prefixes listed concurrently during object enumeration.
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// Default hierarchy separator.
pub const DEFAULT_DELIMITER: &str = "/";

/// Configuration for a [`Walker`](crate::Walker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Maximum prefixes with an outstanding object listing request
    pub max_connections: usize,

    /// Hierarchy separator passed to every listing request of a walk
    pub delimiter: String,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl WalkerConfig {
    /// Create a new walker configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of prefixes listed concurrently.
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Set the hierarchy separator.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Check that the configuration can drive a walk.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(SwError::Config(
                "max_connections must be >= 1".to_string(),
            ));
        }
        if self.delimiter.is_empty() {
            return Err(SwError::Config("delimiter must not be empty".to_string()));
        }
        Ok(())
    }
}
