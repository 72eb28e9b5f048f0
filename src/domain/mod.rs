//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Conversion Context: 货币换算
//! - Routing Context: 网关路由

pub mod conversion;
pub mod routing;
