//! Currency Exchange Proxy Port - 声明式汇率客户端
//!
//! 调用方只提供 from/to，URI 模板、方法和服务名由适配器持有

use async_trait::async_trait;

use super::ExchangeClientError;
use crate::domain::conversion::ExchangeQuote;

/// 汇率服务的报价路径模板
pub const EXCHANGE_VALUE_PATH: &str = "/currency-exchange/from/{from}/to/{to}";

/// 指向逻辑服务 `service` 的完整 URI 模板
pub fn exchange_value_uri_template(service: &str) -> String {
    format!("lb://{}{}", service, EXCHANGE_VALUE_PATH)
}

#[async_trait]
pub trait CurrencyExchangeProxyPort: Send + Sync {
    /// `GET /currency-exchange/from/{from}/to/{to}`
    async fn retrieve_exchange_value(
        &self,
        from: &str,
        to: &str,
    ) -> Result<ExchangeQuote, ExchangeClientError>;
}
