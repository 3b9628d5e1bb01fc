//! Up-front cost of buying a home.
//!
//! Given a price, an existing mortgage that can be taken over and the share
//! of the price paid in cash, the calculator works out:
//!
//! | Step | Value |
//! |------|-------|
//! | 1 | Cash: `floor(price × cash% / 100)` |
//! | 2 | Loan portion: price − cash |
//! | 3 | Left to mortgage: loan portion − existing mortgage |
//! | 4 | Mortgage deed fee: 0 if step 3 ≤ 0, else `round(step 3 × rate) + fixed` |
//! | 5 | Title deed fee: `round(price × rate) + fixed`, always charged |
//! | 6 | Total: cash + mortgage deed fee + title deed fee |
//!
//! # Example
//!
//! ```
//! use home_cost_core::{CashPercent, PricingCalculator, PurchaseInputs};
//!
//! let calculator = PricingCalculator::default();
//! let breakdown = calculator.compute(&PurchaseInputs {
//!     price: 1_000_000,
//!     existing_mortgage: 0,
//!     cash_percent: CashPercent::clamped(15, 15),
//! });
//!
//! assert_eq!(breakdown.cash, 150_000);
//! assert_eq!(breakdown.mortgage_fee, 17_375);
//! assert_eq!(breakdown.deed_fee, 15_875);
//! assert_eq!(breakdown.total, 183_250);
//! ```

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::calculations::common::percent_of;
use crate::{
    CashPercent, FeeSchedule, FeeScheduleError, NumberFormat, ParseAmountError,
    PurchaseBreakdown, PurchaseInputs,
};

/// The text fields the calculator reads amounts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Price,
    ExistingMortgage,
}

impl fmt::Display for AmountField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Price => f.write_str("price"),
            Self::ExistingMortgage => f.write_str("existing mortgage"),
        }
    }
}

/// Errors that can occur while turning field text into a breakdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A non-empty field is not a non-negative whole number.
    #[error("invalid number in {field}: '{input}'")]
    InvalidNumber {
        field: AmountField,
        input: String,
        #[source]
        source: ParseAmountError,
    },
}

/// Computes a [`PurchaseBreakdown`] from purchase inputs.
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    schedule: FeeSchedule,
}

impl PricingCalculator {
    /// Creates a calculator after validating `schedule`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeScheduleError`] if the schedule is invalid.
    pub fn new(schedule: FeeSchedule) -> Result<Self, FeeScheduleError> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Clamps a raw slider value to this calculator's allowed cash range.
    pub fn cash_percent(
        &self,
        raw: u8,
    ) -> CashPercent {
        CashPercent::clamped(raw, self.schedule.min_cash_percent)
    }

    /// Computes the breakdown for already-parsed inputs.
    ///
    /// All sums saturate at `u64::MAX`; amounts parsed through
    /// [`NumberFormat::parse`] are small enough never to get there.
    pub fn compute(
        &self,
        inputs: &PurchaseInputs,
    ) -> PurchaseBreakdown {
        // Step 1: cash share, truncated
        let cash = self.cash_portion(inputs.price, inputs.cash_percent);

        // Steps 2-3: what the existing mortgage does not cover
        let loan_portion = inputs.price - cash;
        let left_to_mortgage = i128::from(loan_portion) - i128::from(inputs.existing_mortgage);

        // Step 4
        let mortgage_fee = self.mortgage_fee(left_to_mortgage);

        // Step 5
        let deed_fee = self.deed_fee(inputs.price);

        // Step 6
        let total = cash.saturating_add(deed_fee).saturating_add(mortgage_fee);

        debug!(
            price = inputs.price,
            existing_mortgage = inputs.existing_mortgage,
            cash_percent = inputs.cash_percent.value(),
            cash,
            mortgage_fee,
            deed_fee,
            total,
            "computed purchase breakdown"
        );

        PurchaseBreakdown {
            cash,
            mortgage_fee,
            deed_fee,
            total,
        }
    }

    /// Parses the two amount fields and computes the breakdown.
    ///
    /// Empty fields count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidNumber`] naming the first field that
    /// does not parse.
    ///
    /// # Example
    ///
    /// ```
    /// use home_cost_core::{AmountField, NumberFormat, PricingCalculator, PricingError};
    ///
    /// let calculator = PricingCalculator::default();
    /// let format = NumberFormat::default();
    /// let percent = calculator.cash_percent(15);
    ///
    /// let breakdown = calculator.compute_text("", "", percent, &format).unwrap();
    /// assert_eq!(breakdown.total, 875);
    ///
    /// let error = calculator.compute_text("12a", "", percent, &format).unwrap_err();
    /// assert!(matches!(
    ///     error,
    ///     PricingError::InvalidNumber { field: AmountField::Price, .. }
    /// ));
    /// ```
    pub fn compute_text(
        &self,
        price_text: &str,
        mortgage_text: &str,
        cash_percent: CashPercent,
        format: &NumberFormat,
    ) -> Result<PurchaseBreakdown, PricingError> {
        let price = parse_field(AmountField::Price, price_text, format)?;
        let existing_mortgage = parse_field(AmountField::ExistingMortgage, mortgage_text, format)?;

        Ok(self.compute(&PurchaseInputs {
            price,
            existing_mortgage,
            cash_percent,
        }))
    }

    fn cash_portion(
        &self,
        price: u64,
        cash_percent: CashPercent,
    ) -> u64 {
        let cash = u128::from(price) * u128::from(cash_percent.value()) / 100;
        // cash_percent <= 100, so cash <= price
        cash as u64
    }

    fn mortgage_fee(
        &self,
        left_to_mortgage: i128,
    ) -> u64 {
        if left_to_mortgage <= 0 {
            return 0;
        }
        let amount = u64::try_from(left_to_mortgage).unwrap_or(u64::MAX);
        percent_of(amount, self.schedule.mortgage_fee_rate)
            .saturating_add(self.schedule.mortgage_fee_fixed)
    }

    fn deed_fee(
        &self,
        price: u64,
    ) -> u64 {
        percent_of(price, self.schedule.deed_fee_rate).saturating_add(self.schedule.deed_fee_fixed)
    }
}

fn parse_field(
    field: AmountField,
    text: &str,
    format: &NumberFormat,
) -> Result<u64, PricingError> {
    format.parse(text).map_err(|source| {
        debug!(%field, input = %text, %source, "rejected amount");
        PricingError::InvalidNumber {
            field,
            input: text.to_string(),
            source,
        }
    })
}
