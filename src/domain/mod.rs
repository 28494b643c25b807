//! Pricing state and input handling for the calculator.

pub mod input;
pub mod pricing;

#[allow(unused_imports)]
pub use input::{parse_amount, InputError};
#[allow(unused_imports)]
pub use pricing::{ItemId, LineItem, PricingError, PricingModel, ReferencePrices, VAT_MULTIPLIER};
