use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DEFAULT_MIN_CASH_PERCENT, MAX_CASH_PERCENT};

/// Errors reported by [`FeeSchedule::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeeScheduleError {
    #[error("minimum cash percentage must be at most 100, got {0}")]
    InvalidMinCashPercent(u8),

    #[error("mortgage fee rate must be between 0 and 1, got {0}")]
    InvalidMortgageFeeRate(Decimal),

    #[error("deed fee rate must be between 0 and 1, got {0}")]
    InvalidDeedFeeRate(Decimal),
}

/// Rates and fixed charges used by the pricing calculation.
///
/// The defaults are the statutory values the calculator was built around:
/// a 15 % cash minimum, a mortgage deed fee of 2 % plus 375 and a title deed
/// fee of 1.5 % plus 875. Every field can be overridden from the config file;
/// missing fields keep their default.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use home_cost_core::FeeSchedule;
///
/// let schedule = FeeSchedule::default();
///
/// assert_eq!(schedule.min_cash_percent, 15);
/// assert_eq!(schedule.mortgage_fee_rate, dec!(0.02));
/// assert_eq!(schedule.deed_fee_fixed, 875);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Lowest cash percentage the slider may select.
    pub min_cash_percent: u8,

    /// Share of the newly mortgaged amount charged as mortgage deed fee.
    pub mortgage_fee_rate: Decimal,

    /// Fixed administrative charge added whenever a mortgage deed fee applies.
    pub mortgage_fee_fixed: u64,

    /// Share of the price charged as title deed fee.
    pub deed_fee_rate: Decimal,

    /// Fixed administrative charge added to every title deed fee.
    pub deed_fee_fixed: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            min_cash_percent: DEFAULT_MIN_CASH_PERCENT,
            mortgage_fee_rate: Decimal::new(2, 2),
            mortgage_fee_fixed: 375,
            deed_fee_rate: Decimal::new(15, 3),
            deed_fee_fixed: 875,
        }
    }
}

impl FeeSchedule {
    /// Validates the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`FeeScheduleError`] if:
    /// - `min_cash_percent` is above 100
    /// - `mortgage_fee_rate` is not in [0, 1]
    /// - `deed_fee_rate` is not in [0, 1]
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use home_cost_core::{FeeSchedule, FeeScheduleError};
    ///
    /// let schedule = FeeSchedule {
    ///     deed_fee_rate: dec!(-0.015),
    ///     ..FeeSchedule::default()
    /// };
    ///
    /// assert_eq!(
    ///     schedule.validate(),
    ///     Err(FeeScheduleError::InvalidDeedFeeRate(dec!(-0.015)))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), FeeScheduleError> {
        if self.min_cash_percent > MAX_CASH_PERCENT {
            return Err(FeeScheduleError::InvalidMinCashPercent(
                self.min_cash_percent,
            ));
        }
        if !is_unit_rate(self.mortgage_fee_rate) {
            return Err(FeeScheduleError::InvalidMortgageFeeRate(
                self.mortgage_fee_rate,
            ));
        }
        if !is_unit_rate(self.deed_fee_rate) {
            return Err(FeeScheduleError::InvalidDeedFeeRate(self.deed_fee_rate));
        }
        Ok(())
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn validate_accepts_default_schedule() {
        assert_eq!(FeeSchedule::default().validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_zero_rates() {
        let schedule = FeeSchedule {
            mortgage_fee_rate: dec!(0),
            deed_fee_rate: dec!(0),
            ..FeeSchedule::default()
        };

        assert_eq!(schedule.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_min_cash_percent_above_one_hundred() {
        let schedule = FeeSchedule {
            min_cash_percent: 101,
            ..FeeSchedule::default()
        };

        assert_eq!(
            schedule.validate(),
            Err(FeeScheduleError::InvalidMinCashPercent(101))
        );
    }

    #[test]
    fn validate_rejects_negative_mortgage_fee_rate() {
        let schedule = FeeSchedule {
            mortgage_fee_rate: dec!(-0.02),
            ..FeeSchedule::default()
        };

        assert_eq!(
            schedule.validate(),
            Err(FeeScheduleError::InvalidMortgageFeeRate(dec!(-0.02)))
        );
    }

    #[test]
    fn validate_rejects_deed_fee_rate_greater_than_one() {
        let schedule = FeeSchedule {
            deed_fee_rate: dec!(1.5),
            ..FeeSchedule::default()
        };

        assert_eq!(
            schedule.validate(),
            Err(FeeScheduleError::InvalidDeedFeeRate(dec!(1.5)))
        );
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let schedule: FeeSchedule =
            serde_json::from_str(r#"{ "deed_fee_fixed": 1000 }"#).unwrap();

        assert_eq!(schedule.deed_fee_fixed, 1000);
        assert_eq!(schedule.mortgage_fee_fixed, 375);
        assert_eq!(schedule.deed_fee_rate, dec!(0.015));
    }
}
