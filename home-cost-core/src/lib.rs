pub mod calculations;
pub mod format;
pub mod live;
pub mod models;
pub mod session;

pub use calculations::{AmountField, PricingCalculator, PricingError};
pub use format::{MAX_AMOUNT, NumberFormat, ParseAmountError};
pub use live::{Dispatch, EditableText, LiveFieldBinding, LiveNumberFormatter, Reformatted};
pub use models::*;
pub use session::{SessionError, SessionSnapshot};
