//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（RestClient、CurrencyExchangeProxy、ServiceResolver）
//! - commands: 换算命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{handlers::CalculateConversionHandler, CalculateConversion};

pub use error::ApplicationError;

pub use ports::{
    exchange_value_uri_template,
    // Exchange clients
    CurrencyExchangeProxyPort,
    ExchangeClientError,
    ResponseEntity,
    RestClientPort,
    // Service discovery
    ResolveError,
    ServiceInstance,
    ServiceResolverPort,
};
