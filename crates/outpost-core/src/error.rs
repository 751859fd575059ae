//! Error types for the `outpost-core` crate.

use outpost_catalog::CatalogError;
use outpost_defense::DefenseError;
use outpost_ledger::LedgerError;

use crate::config::ConfigError;

/// Errors surfaced by the facade.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The building catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A ledger operation was rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A defense evaluation was rejected.
    #[error(transparent)]
    Defense(#[from] DefenseError),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Telemetry(String),

    /// Checked decimal arithmetic failed.
    #[error("arithmetic overflow in overview calculation")]
    ArithmeticOverflow,
}
