mod cash_percent;
mod fee_schedule;
mod purchase;

pub use cash_percent::{CashPercent, DEFAULT_MIN_CASH_PERCENT, MAX_CASH_PERCENT};
pub use fee_schedule::{FeeSchedule, FeeScheduleError};
pub use purchase::{PurchaseBreakdown, PurchaseInputs};
