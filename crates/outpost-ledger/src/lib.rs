//! Per-village resource ledger for the Outpost village economy core.
//!
//! A [`ResourceLedger`] holds the stock, hourly production and storage
//! capacity of each of the four resource kinds, plus the levels of the
//! warehouse and granary backing that capacity. It answers the analytic
//! questions the village screen asks (how full, how balanced, how long
//! until storage overflows) and applies the mutations the game performs
//! (time-based accrual, spending, deposits, storage upgrades).
//!
//! # Invariant
//!
//! For every kind `k`, `0 <= amounts[k] <= capacity[k]`. Construction
//! rejects state that violates it; accrual and deposits clamp at capacity
//! and report the overflow as waste. Every mutation applies to all kinds
//! or to none.
//!
//! # Sentinels
//!
//! Empty storage and idle production are normal game states, not errors:
//!
//! - utilization and efficiency are 0 when total capacity is 0
//! - [`resource_balance`] is capped at [`MAX_BALANCE_RATIO`]
//! - [`time_to_fill_storage`] is [`UNBOUNDED_FILL_HOURS`] when nothing is
//!   produced
//!
//! [`resource_balance`]: ResourceLedger::resource_balance
//! [`time_to_fill_storage`]: ResourceLedger::time_to_fill_storage
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use outpost_ledger::{LedgerParams, LedgerThresholds, ResourceLedger};
//! use outpost_types::ResourceMap;
//! use rust_decimal::Decimal;
//!
//! let ledger = ResourceLedger::new(
//!     LedgerParams {
//!         amounts: ResourceMap::splat(Decimal::from(1000)),
//!         production: ResourceMap::splat(Decimal::from(50)),
//!         capacity: ResourceMap::splat(Decimal::from(2000)),
//!         warehouse_level: 3,
//!         granary_level: 2,
//!         updated_at: Utc::now(),
//!     },
//!     LedgerThresholds::default(),
//! );
//! assert!(ledger.is_ok_and(|l| l.is_balanced()));
//! ```

pub mod accrual;
pub mod ledger;
pub mod thresholds;

// Re-export primary types at crate root.
pub use accrual::AccrualReport;
pub use ledger::{LedgerParams, ResourceLedger};
pub use thresholds::{LedgerThresholds, MAX_BALANCE_RATIO, UNBOUNDED_FILL_HOURS};

use rust_decimal::Decimal;

use outpost_types::{ParseKindError, ResourceKind};

/// Errors raised by ledger construction and mutation.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A resource kind was named that does not exist.
    #[error(transparent)]
    InvalidKind(#[from] ParseKindError),

    /// An amount, rate, capacity or cost was negative.
    #[error("{kind} quantity must not be negative, got {quantity}")]
    NegativeQuantity {
        /// The kind carrying the bad value.
        kind: ResourceKind,
        /// The invalid quantity.
        quantity: Decimal,
    },

    /// Stock exceeds the storage capacity for its kind.
    #[error("{kind} amount {amount} exceeds capacity {capacity}")]
    AmountExceedsCapacity {
        /// The overfilled kind.
        kind: ResourceKind,
        /// Stored amount.
        amount: Decimal,
        /// Storage capacity.
        capacity: Decimal,
    },

    /// A spend asked for more than the village holds.
    #[error("insufficient {kind}: need {required}, have {available}")]
    InsufficientResources {
        /// First kind found short, in canonical order.
        kind: ResourceKind,
        /// Requested quantity.
        required: Decimal,
        /// Stock on hand.
        available: Decimal,
    },

    /// Accrual was asked to run backwards in time.
    #[error("accrual duration must not be negative, got {milliseconds}ms")]
    NegativeDuration {
        /// The requested duration.
        milliseconds: i64,
    },

    /// Checked decimal arithmetic failed.
    #[error("arithmetic overflow in ledger calculation")]
    ArithmeticOverflow,
}
