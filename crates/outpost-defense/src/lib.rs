//! Defense evaluation for the Outpost village economy core.
//!
//! Given a village's building levels and the [`Catalog`], the
//! [`DefenseEvaluator`] computes the village's defensive statistics,
//! simulates hypothetical upgrades and suggests what to build next.
//!
//! Every operation is a pure function of its inputs and the read-only
//! catalog: evaluating the same village twice yields identical reports.
//!
//! # Modules
//!
//! - [`evaluator`] -- [`DefenseEvaluator`] and [`DefenseSettings`]
//! - [`levels`] -- Validation of raw level input from the game server
//!
//! [`Catalog`]: outpost_catalog::Catalog

pub mod evaluator;
pub mod levels;

// Re-export primary types at crate root.
pub use evaluator::{DefenseEvaluator, DefenseSettings};
pub use levels::{level_from_raw, village_from_raw};

use outpost_catalog::CatalogError;
use outpost_types::{BuildingCategory, BuildingKey};

/// Errors raised by defense evaluation.
#[derive(Debug, thiserror::Error)]
pub enum DefenseError {
    /// The building is not in the catalog.
    #[error("unknown building key: {0}")]
    UnknownBuildingKey(BuildingKey),

    /// A level is negative, non-finite, fractional or out of range.
    #[error("invalid level {level}{}: {reason}", building.as_ref().map(|b| format!(" for {b}")).unwrap_or_default())]
    InvalidLevel {
        /// Building the level was given for, when known.
        building: Option<BuildingKey>,
        /// The offending value, as received.
        level: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An upgrade was simulated for a building that adds no defense bonus.
    #[error("{building} is a {category} building, not a defense building")]
    NotDefenseBuilding {
        /// The building that was named.
        building: BuildingKey,
        /// Its actual category.
        category: BuildingCategory,
    },

    /// The catalog failed for a reason other than a missing key.
    #[error(transparent)]
    Catalog(CatalogError),

    /// Checked decimal arithmetic failed.
    #[error("arithmetic overflow in defense calculation")]
    ArithmeticOverflow,
}

impl From<CatalogError> for DefenseError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownBuildingKey(key) => Self::UnknownBuildingKey(key),
            other => Self::Catalog(other),
        }
    }
}
