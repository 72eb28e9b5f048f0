//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod exchange_proxy;
mod rest_client;
mod service_resolver;

pub use exchange_proxy::{
    exchange_value_uri_template, CurrencyExchangeProxyPort, EXCHANGE_VALUE_PATH,
};
pub use rest_client::{ExchangeClientError, ResponseEntity, RestClientPort};
pub use service_resolver::{ResolveError, ServiceInstance, ServiceResolverPort};
