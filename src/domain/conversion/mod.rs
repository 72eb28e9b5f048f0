//! Conversion Context - 货币换算上下文

mod entity;
mod json_decimal;

pub use entity::{CurrencyConversion, ExchangeClientKind, ExchangeQuote, CONVERSION_ID};
