//! Admin configuration loaded from JSON.
//!
//! ```json
//! {
//!   "tables": ["events"],
//!   "profiles": {
//!     "dedupe": [
//!       { "priority": 20, "name": "vers", "iterator_class": "VersioningIterator",
//!         "options": { "maxVersions": "1" } }
//!     ]
//!   }
//! }
//! ```

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    iterator::{InMemoryIteratorProfiles, IteratorSetting},
    table_ops::InMemoryTableOperations,
};

/// Errors raised while loading admin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config `{path}`: {source}")]
    Read {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for [`AdminConfig`].
    #[error("invalid admin config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Iterator profile seeds and the table list served by the in-memory backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Named iterator profiles available to `--profile`.
    pub profiles: BTreeMap<String, Vec<IteratorSetting>>,
    /// Tables known to the in-memory table operations backend.
    pub tables: Vec<String>,
}

impl AdminConfig {
    /// Decode a configuration from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Add a table.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.tables.push(table.into());
        self
    }

    /// Add or replace an iterator profile.
    #[must_use]
    pub fn with_profile(
        mut self,
        name: impl Into<String>,
        iterators: Vec<IteratorSetting>,
    ) -> Self {
        self.profiles.insert(name.into(), iterators);
        self
    }

    /// Build a profile registry seeded from this configuration.
    pub fn iterator_profiles(&self) -> InMemoryIteratorProfiles {
        self.profiles
            .iter()
            .map(|(name, iterators)| (name.clone(), iterators.clone()))
            .collect()
    }

    /// Build an in-memory table operations backend serving the configured tables.
    pub fn table_operations(&self) -> InMemoryTableOperations {
        InMemoryTableOperations::with_tables(self.tables.iter().cloned())
    }
}
