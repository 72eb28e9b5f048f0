//! Exchange Adapter - 汇率服务出站客户端
//!
//! 通用形态（LoadBalancedRestClient）与声明式形态（HttpCurrencyExchangeProxy）

mod exchange_proxy;
mod rest_client;

pub use exchange_proxy::{HttpCurrencyExchangeProxy, CURRENCY_EXCHANGE_SERVICE};
pub use rest_client::{build_http_client, expand_uri_template, LoadBalancedRestClient};
