//! HTTP Handlers

mod conversion;
mod gateway;
mod ping;

pub use conversion::*;
pub use gateway::*;
pub use ping::*;
