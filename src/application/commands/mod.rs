//! CQRS Commands

mod conversion_commands;
pub mod handlers;

pub use conversion_commands::CalculateConversion;
