//! One-shot, non-interactive calculation for the `quote` subcommand.

use anyhow::{Context, Result};
use home_cost_core::{PricingCalculator, PurchaseBreakdown};
use serde::Serialize;

use crate::{config::AppConfig, templates};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub price: String,
    pub mortgage: String,
    /// Cash percentage; the configured minimum when absent.
    pub percent: Option<u8>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct QuoteOutput<'a> {
    cash_percent: u8,
    #[serde(flatten)]
    breakdown: &'a PurchaseBreakdown,
}

/// Computes the breakdown for `request` and renders it as text or JSON.
///
/// # Errors
///
/// Fails when the fee schedule is invalid or an amount does not parse.
pub fn render_quote(
    config: &AppConfig,
    request: &QuoteRequest,
) -> Result<String> {
    let calculator = PricingCalculator::new(config.fees.clone())?;
    let cash_percent =
        calculator.cash_percent(request.percent.unwrap_or(config.fees.min_cash_percent));

    let breakdown = calculator.compute_text(
        &request.price,
        &request.mortgage,
        cash_percent,
        &config.format,
    )?;

    if request.json {
        let output = QuoteOutput {
            cash_percent: cash_percent.value(),
            breakdown: &breakdown,
        };
        serde_json::to_string_pretty(&output).context("failed to serialize quote")
    } else {
        Ok(format!(
            "{}\n{}",
            templates::cash_label(cash_percent),
            templates::result_text(&breakdown, &config.format)
        ))
    }
}
