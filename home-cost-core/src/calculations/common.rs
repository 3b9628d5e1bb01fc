//! Rounding helpers shared by the fee calculations.
//!
//! Fees are computed exactly in [`Decimal`] and only then brought back to
//! whole currency units, so a product such as `850_000 × 0.02` never picks
//! up binary floating point error.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Rounds a decimal value to a whole number using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use home_cost_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(17000.4)), dec!(17000));
/// assert_eq!(round_half_up(dec!(17000.5)), dec!(17001));
/// assert_eq!(round_half_up(dec!(-2.5)), dec!(-3)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies `rate` to `amount` and rounds the product half-up to whole units.
///
/// Negative products (only possible with an unvalidated negative rate) are
/// floored at zero; products beyond `u64` saturate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use home_cost_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(850_000, dec!(0.02)), 17_000);
/// assert_eq!(percent_of(1_033, dec!(0.015)), 15); // 15.495
/// assert_eq!(percent_of(1_100, dec!(0.015)), 17); // 16.5
/// ```
pub fn percent_of(
    amount: u64,
    rate: Decimal,
) -> u64 {
    let rounded = round_half_up(Decimal::from(amount) * rate);
    if rounded <= Decimal::ZERO {
        return 0;
    }
    rounded.to_u64().unwrap_or(u64::MAX)
}
