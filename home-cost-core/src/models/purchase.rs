use serde::{Deserialize, Serialize};

use crate::CashPercent;

/// The three values the screen feeds into one recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurchaseInputs {
    pub price: u64,
    pub existing_mortgage: u64,
    pub cash_percent: CashPercent,
}

/// What buying at a given price costs up front, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PurchaseBreakdown {
    /// Cash share of the price.
    pub cash: u64,

    /// Fee for registering new mortgage deeds; zero when the existing
    /// mortgage already covers the loan.
    pub mortgage_fee: u64,

    /// Title deed fee, charged on every purchase.
    pub deed_fee: u64,

    pub total: u64,
}
