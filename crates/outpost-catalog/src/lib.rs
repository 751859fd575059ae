//! Building catalog for the Outpost village economy core.
//!
//! The catalog maps building keys to display names, categories and per-level
//! bonus curves. It is loaded once at startup, either from YAML or from the
//! built-in [`standard`] catalog, and is read-only afterwards.
//!
//! # Modules
//!
//! - [`catalog`] -- [`Catalog`] and [`BuildingDefinition`]
//! - [`curve`] -- [`BonusCurve`] evaluation and validation
//! - [`error`] -- [`CatalogError`]
//! - [`standard`] -- The built-in catalog
//!
//! # Usage
//!
//! ```
//! use outpost_catalog::standard;
//! use outpost_types::BuildingKey;
//!
//! let wall = standard().get(&BuildingKey::from("wall")).ok();
//! assert_eq!(wall.map(|d| d.name.as_str()), Some("City Wall"));
//! ```

pub mod catalog;
pub mod curve;
pub mod error;
pub mod standard;

// Re-export primary types at crate root.
pub use catalog::{BuildingDefinition, Catalog};
pub use curve::BonusCurve;
pub use error::CatalogError;
pub use standard::{standard, standard_definitions};
