//! Display strings for the calculator screen.

use home_cost_core::{CashPercent, NumberFormat, PricingError, PurchaseBreakdown};

/// Renders the four result values, each grouped with `format`.
pub fn result_text(
    breakdown: &PurchaseBreakdown,
    format: &NumberFormat,
) -> String {
    format!(
        "Cash: {}\nMortgage deed fee: {}\nTitle deed fee: {}\nTotal: {}",
        format.format(breakdown.cash),
        format.format(breakdown.mortgage_fee),
        format.format(breakdown.deed_fee),
        format.format(breakdown.total),
    )
}

/// Label above the cash percentage slider.
pub fn cash_label(percent: CashPercent) -> String {
    format!("Cash: {percent}%")
}

pub fn invalid_number_notice(error: &PricingError) -> String {
    match error {
        PricingError::InvalidNumber { field, .. } => {
            format!("Please enter a valid number for the {field}")
        }
    }
}

#[cfg(test)]
mod tests {
    use home_cost_core::{AmountField, ParseAmountError};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn result_text_groups_every_value() {
        let breakdown = PurchaseBreakdown {
            cash: 150_000,
            mortgage_fee: 17_375,
            deed_fee: 15_875,
            total: 183_250,
        };

        assert_eq!(
            result_text(&breakdown, &NumberFormat::default()),
            "Cash: 150,000\nMortgage deed fee: 17,375\nTitle deed fee: 15,875\nTotal: 183,250"
        );
    }

    #[test]
    fn cash_label_shows_percent() {
        assert_eq!(cash_label(CashPercent::clamped(40, 15)), "Cash: 40%");
    }

    #[test]
    fn invalid_number_notice_names_field() {
        let error = PricingError::InvalidNumber {
            field: AmountField::ExistingMortgage,
            input: "x".to_string(),
            source: ParseAmountError::InvalidCharacter('x'),
        };

        assert_eq!(
            invalid_number_notice(&error),
            "Please enter a valid number for the existing mortgage"
        );
    }
}
