//! Command Handlers

mod conversion_handlers;

pub use conversion_handlers::CalculateConversionHandler;
