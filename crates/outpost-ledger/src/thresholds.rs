//! Tunable thresholds and fixed sentinels for ledger analytics.

use rust_decimal::Decimal;

/// Cap on [`ResourceLedger::resource_balance`]. Also returned when one kind
/// is empty while another is not.
///
/// [`ResourceLedger::resource_balance`]: crate::ResourceLedger::resource_balance
pub const MAX_BALANCE_RATIO: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Returned by [`ResourceLedger::time_to_fill_storage`] when no kind has
/// positive production.
///
/// [`ResourceLedger::time_to_fill_storage`]: crate::ResourceLedger::time_to_fill_storage
pub const UNBOUNDED_FILL_HOURS: Decimal = Decimal::MAX;

/// Thresholds behind the boolean ledger analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerThresholds {
    /// Utilization percentage at or above which storage counts as nearly
    /// full (default: 90).
    pub nearly_full_percent: Decimal,

    /// Max/min ratio below which stock counts as balanced (default: 2.0).
    pub balanced_ratio: Decimal,
}

impl Default for LedgerThresholds {
    fn default() -> Self {
        Self {
            nearly_full_percent: Decimal::from(90),
            balanced_ratio: Decimal::new(20, 1),
        }
    }
}
