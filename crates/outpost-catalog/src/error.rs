//! Error types for the `outpost-catalog` crate.

use outpost_types::BuildingKey;

/// Errors raised while loading or querying the building catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse catalog YAML.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The catalog declares no buildings.
    #[error("building catalog is empty")]
    Empty,

    /// Two entries share a key.
    #[error("duplicate building key: {0}")]
    DuplicateKey(BuildingKey),

    /// An entry is internally inconsistent.
    #[error("invalid catalog entry {key}: {reason}")]
    InvalidEntry {
        /// The offending entry.
        key: BuildingKey,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A lookup named a building the catalog does not define.
    #[error("unknown building key: {0}")]
    UnknownBuildingKey(BuildingKey),
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
