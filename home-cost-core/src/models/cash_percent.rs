use std::fmt;

/// Smallest share of the price that must be paid in cash unless configured otherwise.
pub const DEFAULT_MIN_CASH_PERCENT: u8 = 15;

pub const MAX_CASH_PERCENT: u8 = 100;

/// Share of the purchase price paid in cash, in whole percent.
///
/// The only way to build one is [`CashPercent::clamped`], so a value below the
/// configured minimum or above 100 never reaches the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CashPercent(u8);

impl CashPercent {
    /// Clamps `raw` into `[min, 100]`.
    ///
    /// A minimum above 100 is treated as 100.
    ///
    /// # Example
    ///
    /// ```
    /// use home_cost_core::CashPercent;
    ///
    /// assert_eq!(CashPercent::clamped(3, 15).value(), 15);
    /// assert_eq!(CashPercent::clamped(40, 15).value(), 40);
    /// assert_eq!(CashPercent::clamped(250, 15).value(), 100);
    /// ```
    pub fn clamped(
        raw: u8,
        min: u8,
    ) -> Self {
        let min = min.min(MAX_CASH_PERCENT);
        Self(raw.clamp(min, MAX_CASH_PERCENT))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for CashPercent {
    fn default() -> Self {
        Self(DEFAULT_MIN_CASH_PERCENT)
    }
}

impl fmt::Display for CashPercent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clamped_raises_values_below_minimum() {
        assert_eq!(CashPercent::clamped(0, 15).value(), 15);
        assert_eq!(CashPercent::clamped(14, 15).value(), 15);
    }

    #[test]
    fn clamped_keeps_values_in_range() {
        assert_eq!(CashPercent::clamped(15, 15).value(), 15);
        assert_eq!(CashPercent::clamped(63, 15).value(), 63);
        assert_eq!(CashPercent::clamped(100, 15).value(), 100);
    }

    #[test]
    fn clamped_caps_values_above_one_hundred() {
        assert_eq!(CashPercent::clamped(101, 15).value(), 100);
        assert_eq!(CashPercent::clamped(u8::MAX, 15).value(), 100);
    }

    #[test]
    fn clamped_handles_minimum_above_one_hundred() {
        assert_eq!(CashPercent::clamped(20, 180).value(), 100);
    }

    #[test]
    fn default_is_the_legal_minimum() {
        assert_eq!(CashPercent::default().value(), DEFAULT_MIN_CASH_PERCENT);
    }
}
