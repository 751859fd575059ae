//! Clamped additions to stock.
//!
//! Both time-based accrual and deposits add to a kind's stock and discard
//! whatever does not fit. The discarded part is reported back to the caller
//! so the presentation layer can tell the player production went to waste.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use outpost_types::ResourceMap;

use crate::LedgerError;

/// What an accrual or deposit actually did to each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualReport {
    /// Units that landed in storage.
    pub stored: ResourceMap<Decimal>,
    /// Units discarded because storage was full.
    pub wasted: ResourceMap<Decimal>,
}

impl AccrualReport {
    /// Whether any kind overflowed.
    pub fn has_waste(&self) -> bool {
        self.wasted.iter().any(|(_, w)| w.is_sign_positive() && !w.is_zero())
    }
}

/// Outcome of adding `added` to a stock of `amount` held in `capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fill {
    /// New stock.
    pub amount: Decimal,
    /// Units that landed in storage.
    pub stored: Decimal,
    /// Units that did not fit.
    pub wasted: Decimal,
}

/// Add `added` to `amount`, clamping at `capacity`.
pub(crate) fn fill(amount: Decimal, capacity: Decimal, added: Decimal) -> Result<Fill, LedgerError> {
    let target = amount
        .checked_add(added)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    let new_amount = target.min(capacity);
    let stored = new_amount
        .checked_sub(amount)
        .ok_or(LedgerError::ArithmeticOverflow)?
        .max(Decimal::ZERO);
    let wasted = target
        .checked_sub(new_amount)
        .ok_or(LedgerError::ArithmeticOverflow)?
        .max(Decimal::ZERO);
    Ok(Fill {
        amount: new_amount,
        stored,
        wasted,
    })
}
