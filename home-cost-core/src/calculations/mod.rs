//! Purchase cost calculations.

pub mod common;
pub mod pricing;

pub use pricing::{AmountField, PricingCalculator, PricingError};
