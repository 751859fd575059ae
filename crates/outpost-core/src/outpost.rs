//! The per-request facade.
//!
//! [`Outpost`] is built once at startup: it loads the catalog and keeps
//! the configured thresholds. Each request then opens a ledger, evaluates
//! the village and gets back a [`VillageOverview`] ready for JSON.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use outpost_catalog::{standard, Catalog};
use outpost_defense::DefenseEvaluator;
use outpost_ledger::{AccrualReport, LedgerParams, ResourceLedger};
use outpost_types::{ResourceKind, ResourceMap, Village, VillageOverview};

use crate::config::OutpostConfig;
use crate::error::CoreError;

/// Result of a polling refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// The refreshed overview.
    pub overview: VillageOverview,
    /// What accrual did since the previous refresh.
    pub accrual: AccrualReport,
}

/// Process-wide entry point to the economy and defense computations.
#[derive(Debug, Clone)]
pub struct Outpost {
    config: OutpostConfig,
    catalog: Cow<'static, Catalog>,
}

impl Outpost {
    /// Load the catalog named by `config` (or the standard catalog).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Catalog`] if a configured catalog file cannot
    /// be read or is invalid.
    pub fn new(config: OutpostConfig) -> Result<Self, CoreError> {
        let catalog = match &config.catalog.path {
            Some(path) => Cow::Owned(Catalog::from_file(path)?),
            None => Cow::Borrowed(standard()),
        };
        tracing::info!(
            buildings = catalog.len(),
            custom_catalog = config.catalog.path.is_some(),
            nearly_full_percent = %config.economy.nearly_full_percent,
            balanced_ratio = %config.economy.balanced_ratio,
            "Outpost ready"
        );
        Ok(Self { config, catalog })
    }

    /// Use an already-loaded catalog.
    pub const fn with_catalog(config: OutpostConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog: Cow::Owned(catalog),
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &OutpostConfig {
        &self.config
    }

    /// The loaded building catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// An evaluator over the loaded catalog with the configured settings.
    pub fn evaluator(&self) -> DefenseEvaluator<'_> {
        DefenseEvaluator::new(&self.catalog, self.config.defense.settings())
    }

    /// Open a ledger with the configured thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Ledger`] if `params` violates the ledger
    /// invariants.
    pub fn open_ledger(&self, params: LedgerParams) -> Result<ResourceLedger, CoreError> {
        Ok(ResourceLedger::new(params, self.config.economy.thresholds())?)
    }

    /// Everything the village screen shows.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Defense`] if the village fails evaluation.
    pub fn overview(
        &self,
        ledger: &ResourceLedger,
        village: &Village,
    ) -> Result<VillageOverview, CoreError> {
        let defense = self.evaluator().evaluate(village)?;
        let effective_production =
            effective_production(ledger.production(), &defense.production_bonus)?;
        Ok(VillageOverview {
            village_id: village.id,
            village_name: village.name.clone(),
            resources: ledger.summary(),
            defense,
            effective_production,
        })
    }

    /// Bring `ledger` up to `now`, then build the overview.
    ///
    /// Called on every polling tick of the village screen.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Ledger`] if `now` precedes the ledger's last
    /// update, or the errors of [`overview`](Self::overview). On any error
    /// the ledger is left untouched.
    pub fn poll(
        &self,
        ledger: &mut ResourceLedger,
        village: &Village,
        now: DateTime<Utc>,
    ) -> Result<PollOutcome, CoreError> {
        let mut next = ledger.clone();
        let accrual = next.accrue_until(now)?;
        let overview = self.overview(&next, village)?;
        *ledger = next;
        Ok(PollOutcome { overview, accrual })
    }
}

/// `production * (1 + bonus)` for every kind.
fn effective_production(
    production: &ResourceMap<Decimal>,
    bonus: &ResourceMap<Decimal>,
) -> Result<ResourceMap<Decimal>, CoreError> {
    let mut out = ResourceMap::splat(Decimal::ZERO);
    for kind in ResourceKind::ALL {
        *out.get_mut(kind) = Decimal::ONE
            .checked_add(*bonus.get(kind))
            .and_then(|factor| production.get(kind).checked_mul(factor))
            .ok_or(CoreError::ArithmeticOverflow)?;
    }
    Ok(out)
}
