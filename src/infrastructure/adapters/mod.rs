//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod exchange;
pub mod gateway;

pub use exchange::*;
pub use gateway::*;
