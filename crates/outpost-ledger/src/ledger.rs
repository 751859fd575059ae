//! The resource ledger of a single village.
//!
//! The [`ResourceLedger`] is constructed from a village's persisted resource
//! row and lives for one request. Getters are pure; mutators validate every
//! kind before touching any of them.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use outpost_types::{LedgerSummary, ResourceKind, ResourceMap, StorageBuilding};

use crate::accrual::{fill, AccrualReport};
use crate::thresholds::{LedgerThresholds, MAX_BALANCE_RATIO, UNBOUNDED_FILL_HOURS};
use crate::LedgerError;

/// Milliseconds in one hour; production rates are per hour.
const MILLIS_PER_HOUR: i64 = 3_600_000;

// ---------------------------------------------------------------------------
// Construction parameters
// ---------------------------------------------------------------------------

/// A village's persisted resource row.
///
/// Packs the ledger's inputs into a single struct so call sites name every
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerParams {
    /// Current stock.
    pub amounts: ResourceMap<Decimal>,
    /// Units produced per hour.
    pub production: ResourceMap<Decimal>,
    /// Maximum storable stock.
    pub capacity: ResourceMap<Decimal>,
    /// Warehouse level (backs wood, clay and iron).
    pub warehouse_level: u32,
    /// Granary level (backs crop).
    pub granary_level: u32,
    /// When stock was last brought up to date.
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Stock, production and storage of the four resource kinds of a village.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLedger {
    amounts: ResourceMap<Decimal>,
    production: ResourceMap<Decimal>,
    capacity: ResourceMap<Decimal>,
    warehouse_level: u32,
    granary_level: u32,
    updated_at: DateTime<Utc>,
    thresholds: LedgerThresholds,
}

impl ResourceLedger {
    /// Create a ledger from a persisted row.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeQuantity`] if any amount, rate or
    /// capacity is negative, or [`LedgerError::AmountExceedsCapacity`] if
    /// any kind holds more than it can store.
    pub fn new(params: LedgerParams, thresholds: LedgerThresholds) -> Result<Self, LedgerError> {
        ensure_non_negative(&params.amounts)?;
        ensure_non_negative(&params.production)?;
        ensure_non_negative(&params.capacity)?;
        for kind in ResourceKind::ALL {
            let amount = *params.amounts.get(kind);
            let capacity = *params.capacity.get(kind);
            if amount > capacity {
                return Err(LedgerError::AmountExceedsCapacity {
                    kind,
                    amount,
                    capacity,
                });
            }
        }

        Ok(Self {
            amounts: params.amounts,
            production: params.production,
            capacity: params.capacity,
            warehouse_level: params.warehouse_level,
            granary_level: params.granary_level,
            updated_at: params.updated_at,
            thresholds,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current stock.
    pub const fn amounts(&self) -> &ResourceMap<Decimal> {
        &self.amounts
    }

    /// Units produced per hour.
    pub const fn production(&self) -> &ResourceMap<Decimal> {
        &self.production
    }

    /// Maximum storable stock.
    pub const fn capacity(&self) -> &ResourceMap<Decimal> {
        &self.capacity
    }

    /// When stock was last brought up to date.
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Thresholds used by [`is_storage_nearly_full`] and [`is_balanced`].
    ///
    /// [`is_storage_nearly_full`]: Self::is_storage_nearly_full
    /// [`is_balanced`]: Self::is_balanced
    pub const fn thresholds(&self) -> &LedgerThresholds {
        &self.thresholds
    }

    /// Level of the storage building backing `kind`.
    pub const fn level(&self, kind: ResourceKind) -> u32 {
        self.storage_level(StorageBuilding::for_kind(kind))
    }

    /// Level of the storage building backing the kind named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidKind`] if `name` is not one of
    /// `wood`, `clay`, `iron` or `crop`.
    pub fn level_by_name(&self, name: &str) -> Result<u32, LedgerError> {
        let kind: ResourceKind = name.parse()?;
        Ok(self.level(kind))
    }

    /// Level of a storage building.
    pub const fn storage_level(&self, building: StorageBuilding) -> u32 {
        match building {
            StorageBuilding::Warehouse => self.warehouse_level,
            StorageBuilding::Granary => self.granary_level,
        }
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    /// Sum of stock over all kinds.
    pub fn total_amount(&self) -> Decimal {
        sum(&self.amounts)
    }

    /// Sum of capacity over all kinds.
    pub fn total_capacity(&self) -> Decimal {
        sum(&self.capacity)
    }

    /// Percentage of total capacity in use, in `[0, 100]`.
    ///
    /// Zero when the village has no storage at all.
    pub fn utilization_percentage(&self) -> Decimal {
        let capacity = self.total_capacity();
        if capacity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_amount()
            .saturating_mul(Decimal::ONE_HUNDRED)
            .checked_div(capacity)
            .map_or(Decimal::ONE_HUNDRED, |pct| {
                pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            })
    }

    /// Whether utilization has reached the nearly-full threshold.
    pub fn is_storage_nearly_full(&self) -> bool {
        self.utilization_percentage() >= self.thresholds.nearly_full_percent
    }

    /// Largest stock divided by smallest stock, at least 1.
    ///
    /// All-empty stock is perfectly balanced (1). If the smallest stock is
    /// zero while another is not, or the ratio is larger than
    /// [`MAX_BALANCE_RATIO`], the cap is returned.
    pub fn resource_balance(&self) -> Decimal {
        let max = *self.amounts.get(self.most_abundant_resource());
        let min = *self.amounts.get(self.least_abundant_resource());
        if max.is_zero() {
            return Decimal::ONE;
        }
        if min.is_zero() {
            return MAX_BALANCE_RATIO;
        }
        max.checked_div(min)
            .map_or(MAX_BALANCE_RATIO, |ratio| ratio.min(MAX_BALANCE_RATIO))
    }

    /// Whether the balance ratio is under the balanced threshold.
    pub fn is_balanced(&self) -> bool {
        self.resource_balance() < self.thresholds.balanced_ratio
    }

    /// Kind with the largest stock; ties go to the earliest canonical kind.
    pub fn most_abundant_resource(&self) -> ResourceKind {
        ResourceKind::ALL
            .into_iter()
            .fold(ResourceKind::Wood, |best, kind| {
                if self.amounts.get(kind) > self.amounts.get(best) {
                    kind
                } else {
                    best
                }
            })
    }

    /// Kind with the smallest stock; ties go to the earliest canonical kind.
    pub fn least_abundant_resource(&self) -> ResourceKind {
        ResourceKind::ALL
            .into_iter()
            .fold(ResourceKind::Wood, |best, kind| {
                if self.amounts.get(kind) < self.amounts.get(best) {
                    kind
                } else {
                    best
                }
            })
    }

    /// Sum of hourly production over all kinds.
    pub fn total_production(&self) -> Decimal {
        sum(&self.production)
    }

    /// Total hourly production divided by total capacity.
    ///
    /// Zero when the village has no storage at all.
    pub fn efficiency(&self) -> Decimal {
        let capacity = self.total_capacity();
        if capacity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_production()
            .checked_div(capacity)
            .unwrap_or(Decimal::ZERO)
    }

    /// Hours until `kind` reaches its capacity, or `None` if it does not
    /// produce.
    pub fn time_to_fill(&self, kind: ResourceKind) -> Option<Decimal> {
        let rate = *self.production.get(kind);
        if rate <= Decimal::ZERO {
            return None;
        }
        let headroom = self
            .capacity
            .get(kind)
            .saturating_sub(*self.amounts.get(kind))
            .max(Decimal::ZERO);
        Some(headroom.checked_div(rate).unwrap_or(UNBOUNDED_FILL_HOURS))
    }

    /// Hours until the fastest-filling kind reaches its capacity.
    ///
    /// [`UNBOUNDED_FILL_HOURS`] when no kind produces anything.
    pub fn time_to_fill_storage(&self) -> Decimal {
        ResourceKind::ALL
            .into_iter()
            .filter_map(|kind| self.time_to_fill(kind))
            .min()
            .unwrap_or(UNBOUNDED_FILL_HOURS)
    }

    /// Whether the stock covers `cost` for every kind.
    pub fn can_afford(&self, cost: &ResourceMap<Decimal>) -> bool {
        ResourceKind::ALL
            .into_iter()
            .all(|kind| cost.get(kind) <= self.amounts.get(kind))
    }

    /// Plain snapshot of the ledger and every analytic.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            amounts: self.amounts,
            production: self.production,
            capacity: self.capacity,
            storage_levels: ResourceMap::from_fn(|kind| self.level(kind)),
            total_amount: self.total_amount(),
            total_capacity: self.total_capacity(),
            utilization_percentage: self.utilization_percentage(),
            storage_nearly_full: self.is_storage_nearly_full(),
            resource_balance: self.resource_balance(),
            balanced: self.is_balanced(),
            most_abundant: self.most_abundant_resource(),
            least_abundant: self.least_abundant_resource(),
            total_production: self.total_production(),
            efficiency: self.efficiency(),
            time_to_fill_hours: self.time_to_fill_storage(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add `elapsed` worth of production to every kind, clamped at capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeDuration`] for a negative duration or
    /// [`LedgerError::ArithmeticOverflow`] if checked arithmetic fails. On
    /// error nothing changes.
    pub fn accrue(&mut self, elapsed: TimeDelta) -> Result<AccrualReport, LedgerError> {
        let milliseconds = elapsed.num_milliseconds();
        if milliseconds < 0 {
            return Err(LedgerError::NegativeDuration { milliseconds });
        }
        let hours = Decimal::from(milliseconds)
            .checked_div(Decimal::from(MILLIS_PER_HOUR))
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let added = self.production.map(|_, rate| rate.checked_mul(hours));
        let updated_at = self
            .updated_at
            .checked_add_signed(elapsed)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let report = self.apply_additions(&added)?;
        self.updated_at = updated_at;

        tracing::debug!(
            elapsed_ms = milliseconds,
            stored = %sum(&report.stored),
            wasted = %sum(&report.wasted),
            "Accrued production"
        );
        if report.has_waste() {
            tracing::warn!(
                wasted_wood = %report.wasted.wood,
                wasted_clay = %report.wasted.clay,
                wasted_iron = %report.wasted.iron,
                wasted_crop = %report.wasted.crop,
                "Storage full, production wasted"
            );
        }
        Ok(report)
    }

    /// Accrue production for the time between the last update and `now`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeDuration`] if `now` is before the last
    /// update, otherwise the errors of [`accrue`](Self::accrue).
    pub fn accrue_until(&mut self, now: DateTime<Utc>) -> Result<AccrualReport, LedgerError> {
        self.accrue(now.signed_duration_since(self.updated_at))
    }

    /// Debit `cost` from stock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeQuantity`] for a negative cost or
    /// [`LedgerError::InsufficientResources`] naming the first kind that is
    /// short. No kind is debited on error.
    pub fn spend(&mut self, cost: &ResourceMap<Decimal>) -> Result<(), LedgerError> {
        ensure_non_negative(cost)?;
        for kind in ResourceKind::ALL {
            let required = *cost.get(kind);
            let available = *self.amounts.get(kind);
            if required > available {
                return Err(LedgerError::InsufficientResources {
                    kind,
                    required,
                    available,
                });
            }
        }

        let mut next = self.amounts;
        for kind in ResourceKind::ALL {
            let slot = next.get_mut(kind);
            *slot = slot
                .checked_sub(*cost.get(kind))
                .ok_or(LedgerError::ArithmeticOverflow)?;
        }
        self.amounts = next;
        Ok(())
    }

    /// Credit `resources` to stock, clamped at capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeQuantity`] for a negative quantity or
    /// [`LedgerError::ArithmeticOverflow`]. No kind is credited on error.
    pub fn deposit(
        &mut self,
        resources: &ResourceMap<Decimal>,
    ) -> Result<AccrualReport, LedgerError> {
        ensure_non_negative(resources)?;
        let report = self.apply_additions(&resources.map(|_, q| Some(*q)))?;
        if report.has_waste() {
            tracing::warn!(wasted = %sum(&report.wasted), "Deposit overflowed storage");
        }
        Ok(report)
    }

    /// Set a storage building's level and the capacity of every kind it
    /// backs.
    ///
    /// Stock above a lowered capacity is discarded and returned.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeQuantity`] for a negative capacity.
    pub fn upgrade_storage(
        &mut self,
        building: StorageBuilding,
        level: u32,
        capacity: Decimal,
    ) -> Result<ResourceMap<Decimal>, LedgerError> {
        if capacity.is_sign_negative() && !capacity.is_zero() {
            return Err(LedgerError::NegativeQuantity {
                kind: backed_kind(building),
                quantity: capacity,
            });
        }

        let mut discarded = ResourceMap::splat(Decimal::ZERO);
        for kind in ResourceKind::ALL.into_iter().filter(|k| building.backs(*k)) {
            let amount = self.amounts.get_mut(kind);
            *discarded.get_mut(kind) = amount.saturating_sub(capacity).max(Decimal::ZERO);
            *amount = (*amount).min(capacity);
            *self.capacity.get_mut(kind) = capacity;
        }
        match building {
            StorageBuilding::Warehouse => self.warehouse_level = level,
            StorageBuilding::Granary => self.granary_level = level,
        }

        tracing::debug!(?building, level, %capacity, "Storage upgraded");
        Ok(discarded)
    }

    /// Replace the hourly production rates.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeQuantity`] for a negative rate.
    pub fn set_production(&mut self, rates: ResourceMap<Decimal>) -> Result<(), LedgerError> {
        ensure_non_negative(&rates)?;
        self.production = rates;
        Ok(())
    }

    /// Add per-kind quantities to stock, computing every kind before
    /// committing any.
    fn apply_additions(
        &mut self,
        added: &ResourceMap<Option<Decimal>>,
    ) -> Result<AccrualReport, LedgerError> {
        let mut next = self.amounts;
        let mut report = AccrualReport::default();
        for kind in ResourceKind::ALL {
            let quantity = (*added.get(kind)).ok_or(LedgerError::ArithmeticOverflow)?;
            let result = fill(*self.amounts.get(kind), *self.capacity.get(kind), quantity)?;
            *next.get_mut(kind) = result.amount;
            *report.stored.get_mut(kind) = result.stored;
            *report.wasted.get_mut(kind) = result.wasted;
        }
        self.amounts = next;
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sum(map: &ResourceMap<Decimal>) -> Decimal {
    map.iter()
        .fold(Decimal::ZERO, |acc, (_, value)| acc.saturating_add(*value))
}

fn ensure_non_negative(map: &ResourceMap<Decimal>) -> Result<(), LedgerError> {
    match map
        .iter()
        .find(|(_, q)| q.is_sign_negative() && !q.is_zero())
    {
        Some((kind, quantity)) => Err(LedgerError::NegativeQuantity {
            kind,
            quantity: *quantity,
        }),
        None => Ok(()),
    }
}

/// First kind a storage building backs, for error reporting.
fn backed_kind(building: StorageBuilding) -> ResourceKind {
    ResourceKind::ALL
        .into_iter()
        .find(|kind| building.backs(*kind))
        .unwrap_or(ResourceKind::Crop)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn params(
        amounts: ResourceMap<Decimal>,
        production: ResourceMap<Decimal>,
        capacity: ResourceMap<Decimal>,
    ) -> LedgerParams {
        LedgerParams {
            amounts,
            production,
            capacity,
            warehouse_level: 5,
            granary_level: 3,
            updated_at: epoch(),
        }
    }

    fn ledger(
        amounts: [Decimal; 4],
        production: [Decimal; 4],
        capacity: [Decimal; 4],
    ) -> ResourceLedger {
        let [w, c, i, r] = amounts;
        let [pw, pc, pi, pr] = production;
        let [cw, cc, ci, cr] = capacity;
        ResourceLedger::new(
            params(
                ResourceMap::new(w, c, i, r),
                ResourceMap::new(pw, pc, pi, pr),
                ResourceMap::new(cw, cc, ci, cr),
            ),
            LedgerThresholds::default(),
        )
        .unwrap()
    }

    fn even() -> ResourceLedger {
        ledger(
            [dec!(1000); 4],
            [dec!(0); 4],
            [dec!(2000); 4],
        )
    }

    // --- construction -----------------------------------------------------

    #[test]
    fn rejects_amount_over_capacity() {
        let result = ResourceLedger::new(
            params(
                ResourceMap::new(dec!(10), dec!(0), dec!(0), dec!(0)),
                ResourceMap::splat(dec!(0)),
                ResourceMap::new(dec!(5), dec!(5), dec!(5), dec!(5)),
            ),
            LedgerThresholds::default(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::AmountExceedsCapacity {
                kind: ResourceKind::Wood,
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_production() {
        let result = ResourceLedger::new(
            params(
                ResourceMap::splat(dec!(0)),
                ResourceMap::new(dec!(0), dec!(0), dec!(-1), dec!(0)),
                ResourceMap::splat(dec!(100)),
            ),
            LedgerThresholds::default(),
        );
        assert!(matches!(
            result,
            Err(LedgerError::NegativeQuantity {
                kind: ResourceKind::Iron,
                ..
            })
        ));
    }

    // --- levels -----------------------------------------------------------

    #[test]
    fn level_follows_storage_building() {
        let l = even();
        assert_eq!(l.level(ResourceKind::Wood), 5);
        assert_eq!(l.level(ResourceKind::Iron), 5);
        assert_eq!(l.level(ResourceKind::Crop), 3);
        assert_eq!(l.level_by_name("crop").ok(), Some(3));
    }

    #[test]
    fn level_by_unknown_name_fails() {
        assert!(matches!(
            even().level_by_name("gold"),
            Err(LedgerError::InvalidKind(_))
        ));
    }

    // --- analytics --------------------------------------------------------

    #[test]
    fn even_stock_at_half_capacity() {
        let l = even();
        assert_eq!(l.total_amount(), dec!(4000));
        assert_eq!(l.total_capacity(), dec!(8000));
        assert_eq!(l.resource_balance(), dec!(1));
        assert!(l.is_balanced());
        assert_eq!(l.utilization_percentage(), dec!(50));
        assert!(!l.is_storage_nearly_full());
    }

    #[test]
    fn nearly_full_at_threshold() {
        let l = ledger([dec!(900); 4], [dec!(0); 4], [dec!(1000); 4]);
        assert_eq!(l.utilization_percentage(), dec!(90));
        assert!(l.is_storage_nearly_full());

        let l = ledger([dec!(899); 4], [dec!(0); 4], [dec!(1000); 4]);
        assert!(!l.is_storage_nearly_full());
    }

    #[test]
    fn utilization_increases_with_stock() {
        let low = ledger([dec!(100), dec!(0), dec!(0), dec!(0)], [dec!(0); 4], [dec!(1000); 4]);
        let high = ledger([dec!(101), dec!(0), dec!(0), dec!(0)], [dec!(0); 4], [dec!(1000); 4]);
        assert!(high.utilization_percentage() > low.utilization_percentage());
    }

    #[test]
    fn zero_capacity_guards() {
        let l = ledger([dec!(0); 4], [dec!(10); 4], [dec!(0); 4]);
        assert_eq!(l.utilization_percentage(), Decimal::ZERO);
        assert_eq!(l.efficiency(), Decimal::ZERO);
        assert!(!l.is_storage_nearly_full());
    }

    #[test]
    fn balance_ratio_and_threshold() {
        let l = ledger(
            [dec!(400), dec!(200), dec!(300), dec!(250)],
            [dec!(0); 4],
            [dec!(1000); 4],
        );
        assert_eq!(l.resource_balance(), dec!(2));
        assert!(!l.is_balanced());

        let l = ledger(
            [dec!(399), dec!(200), dec!(300), dec!(250)],
            [dec!(0); 4],
            [dec!(1000); 4],
        );
        assert!(l.is_balanced());
    }

    #[test]
    fn balance_with_empty_kind_hits_cap() {
        let l = ledger(
            [dec!(500), dec!(0), dec!(300), dec!(250)],
            [dec!(0); 4],
            [dec!(1000); 4],
        );
        assert_eq!(l.resource_balance(), MAX_BALANCE_RATIO);
        assert!(!l.is_balanced());
    }

    #[test]
    fn balance_all_empty_is_one() {
        let l = ledger([dec!(0); 4], [dec!(0); 4], [dec!(1000); 4]);
        assert_eq!(l.resource_balance(), Decimal::ONE);
        assert!(l.is_balanced());
    }

    #[test]
    fn abundance_tie_breaks_canonically() {
        let l = ledger(
            [dec!(100), dec!(300), dec!(300), dec!(100)],
            [dec!(0); 4],
            [dec!(1000); 4],
        );
        assert_eq!(l.most_abundant_resource(), ResourceKind::Clay);
        assert_eq!(l.least_abundant_resource(), ResourceKind::Wood);
        assert_eq!(even().most_abundant_resource(), ResourceKind::Wood);
    }

    #[test]
    fn production_and_efficiency() {
        let l = ledger(
            [dec!(0); 4],
            [dec!(100), dec!(80), dec!(60), dec!(160)],
            [dec!(1000); 4],
        );
        assert_eq!(l.total_production(), dec!(400));
        assert_eq!(l.efficiency(), dec!(0.1));
    }

    #[test]
    fn time_to_fill_single_producer() {
        let l = ledger(
            [dec!(500), dec!(0), dec!(0), dec!(0)],
            [dec!(100), dec!(0), dec!(0), dec!(0)],
            [dec!(1000); 4],
        );
        assert_eq!(l.time_to_fill_storage(), dec!(5));
        assert_eq!(l.time_to_fill(ResourceKind::Clay), None);
    }

    #[test]
    fn time_to_fill_takes_fastest_kind() {
        let l = ledger(
            [dec!(0), dec!(900), dec!(0), dec!(0)],
            [dec!(100), dec!(50), dec!(0), dec!(0)],
            [dec!(1000); 4],
        );
        assert_eq!(l.time_to_fill(ResourceKind::Wood), Some(dec!(10)));
        assert_eq!(l.time_to_fill_storage(), dec!(2));
    }

    #[test]
    fn time_to_fill_without_production_is_unbounded() {
        assert_eq!(even().time_to_fill_storage(), UNBOUNDED_FILL_HOURS);
    }

    #[test]
    fn summary_mirrors_getters() {
        let l = even();
        let s = l.summary();
        assert_eq!(s.total_amount, l.total_amount());
        assert_eq!(s.utilization_percentage, dec!(50));
        assert_eq!(s.storage_levels, ResourceMap::new(5, 5, 5, 3));
        assert!(s.balanced);
        assert!(serde_json::to_string(&s).is_ok());
    }

    // --- mutations --------------------------------------------------------

    #[test]
    fn accrue_adds_hourly_production() {
        let mut l = ledger(
            [dec!(100); 4],
            [dec!(60), dec!(30), dec!(0), dec!(120)],
            [dec!(1000); 4],
        );
        let report = l.accrue(TimeDelta::minutes(30)).unwrap();
        assert_eq!(*l.amounts(), ResourceMap::new(dec!(130), dec!(115), dec!(100), dec!(160)));
        assert_eq!(report.stored.crop, dec!(60));
        assert!(!report.has_waste());
        assert_eq!(l.updated_at(), epoch() + TimeDelta::minutes(30));
    }

    #[test]
    fn accrue_clamps_and_reports_waste() {
        let mut l = ledger(
            [dec!(950), dec!(0), dec!(0), dec!(0)],
            [dec!(100), dec!(0), dec!(0), dec!(0)],
            [dec!(1000); 4],
        );
        let report = l.accrue(TimeDelta::hours(1)).unwrap();
        assert_eq!(l.amounts().wood, dec!(1000));
        assert_eq!(report.stored.wood, dec!(50));
        assert_eq!(report.wasted.wood, dec!(50));
        assert!(report.has_waste());
    }

    #[test]
    fn accrue_until_uses_timestamp() {
        let mut l = ledger([dec!(0); 4], [dec!(10); 4], [dec!(1000); 4]);
        l.accrue_until(epoch() + TimeDelta::hours(3)).unwrap();
        assert_eq!(l.total_amount(), dec!(120));
    }

    #[test]
    fn accrue_rejects_negative_duration() {
        let mut l = even();
        let before = l.clone();
        assert!(matches!(
            l.accrue_until(epoch() - TimeDelta::seconds(1)),
            Err(LedgerError::NegativeDuration { .. })
        ));
        assert_eq!(l, before);
    }

    #[test]
    fn spend_is_atomic() {
        let mut l = even();
        let cost = ResourceMap::new(dec!(500), dec!(500), dec!(1500), dec!(0));
        assert!(!l.can_afford(&cost));
        assert!(matches!(
            l.spend(&cost),
            Err(LedgerError::InsufficientResources {
                kind: ResourceKind::Iron,
                ..
            })
        ));
        assert_eq!(l.total_amount(), dec!(4000));

        let cost = ResourceMap::new(dec!(500), dec!(250), dec!(100), dec!(1000));
        assert!(l.can_afford(&cost));
        l.spend(&cost).unwrap();
        assert_eq!(*l.amounts(), ResourceMap::new(dec!(500), dec!(750), dec!(900), dec!(0)));
    }

    #[test]
    fn spend_rejects_negative_cost() {
        let mut l = even();
        let cost = ResourceMap::new(dec!(0), dec!(-5), dec!(0), dec!(0));
        assert!(matches!(l.spend(&cost), Err(LedgerError::NegativeQuantity { .. })));
    }

    #[test]
    fn deposit_clamps() {
        let mut l = even();
        let report = l
            .deposit(&ResourceMap::new(dec!(1500), dec!(0), dec!(0), dec!(10)))
            .unwrap();
        assert_eq!(l.amounts().wood, dec!(2000));
        assert_eq!(report.wasted.wood, dec!(500));
        assert_eq!(l.amounts().crop, dec!(1010));
    }

    #[test]
    fn upgrade_storage_sets_backed_kinds() {
        let mut l = even();
        let discarded = l
            .upgrade_storage(StorageBuilding::Warehouse, 7, dec!(3000))
            .unwrap();
        assert_eq!(discarded, ResourceMap::splat(Decimal::ZERO));
        assert_eq!(*l.capacity(), ResourceMap::new(dec!(3000), dec!(3000), dec!(3000), dec!(2000)));
        assert_eq!(l.level(ResourceKind::Clay), 7);
        assert_eq!(l.level(ResourceKind::Crop), 3);
    }

    #[test]
    fn lowering_capacity_discards_excess() {
        let mut l = even();
        let discarded = l
            .upgrade_storage(StorageBuilding::Granary, 1, dec!(800))
            .unwrap();
        assert_eq!(discarded.crop, dec!(200));
        assert_eq!(l.amounts().crop, dec!(800));
        assert_eq!(l.amounts().wood, dec!(1000));
    }

    #[test]
    fn set_production_validates() {
        let mut l = even();
        assert!(l.set_production(ResourceMap::splat(dec!(-1))).is_err());
        l.set_production(ResourceMap::splat(dec!(25))).unwrap();
        assert_eq!(l.total_production(), dec!(100));
    }
}
