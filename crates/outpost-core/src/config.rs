//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `outpost-config.yaml` at the
//! project root. Every key is optional; missing keys take the defaults
//! documented on each field.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use outpost_defense::DefenseSettings;
use outpost_ledger::LedgerThresholds;

/// Environment variable overriding `catalog.path`.
pub const CATALOG_PATH_ENV: &str = "OUTPOST_CATALOG_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutpostConfig {
    /// Resource ledger thresholds.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Defense recommendation tunables.
    #[serde(default)]
    pub defense: DefenseConfig,

    /// Where the building catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OutpostConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `OUTPOST_CATALOG_PATH` overrides `catalog.path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            let mut config = Self::default();
            config.apply_env_overrides();
            return Ok(config);
        }
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(CATALOG_PATH_ENV).filter(|p| !p.is_empty()) {
            self.catalog.path = Some(PathBuf::from(path));
        }
    }
}

/// Resource ledger thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Utilization percentage at which storage counts as nearly full.
    #[serde(default = "default_nearly_full_percent")]
    pub nearly_full_percent: Decimal,

    /// Max/min stock ratio below which a village counts as balanced.
    #[serde(default = "default_balanced_ratio")]
    pub balanced_ratio: Decimal,
}

impl EconomyConfig {
    /// Thresholds for [`ResourceLedger`](outpost_ledger::ResourceLedger).
    pub const fn thresholds(&self) -> LedgerThresholds {
        LedgerThresholds {
            nearly_full_percent: self.nearly_full_percent,
            balanced_ratio: self.balanced_ratio,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            nearly_full_percent: default_nearly_full_percent(),
            balanced_ratio: default_balanced_ratio(),
        }
    }
}

/// Defense recommendation tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DefenseConfig {
    /// Share of the defense bonus below which an upgrade is high priority.
    #[serde(default = "default_min_share_percent")]
    pub min_share_percent: Decimal,
}

impl DefenseConfig {
    /// Settings for [`DefenseEvaluator`](outpost_defense::DefenseEvaluator).
    pub const fn settings(&self) -> DefenseSettings {
        DefenseSettings {
            min_share_percent: self.min_share_percent,
        }
    }
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            min_share_percent: default_min_share_percent(),
        }
    }
}

/// Building catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// YAML catalog file; the built-in standard catalog when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_nearly_full_percent() -> Decimal {
    Decimal::from(90)
}

fn default_balanced_ratio() -> Decimal {
    Decimal::new(20, 1)
}

fn default_min_share_percent() -> Decimal {
    Decimal::from(20)
}

fn default_log_level() -> String {
    "info".to_owned()
}
